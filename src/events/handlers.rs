// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::{
    App,
    commander::Command,
    config,
    dialogs::{DialogKind, DialogRequest},
    events::AppEvent,
    model::{AddTarget, ItemId},
    tasks::{AppTask, ScanOutcome},
};

pub(super) fn handle_select_root(app: &mut App, id: ItemId) -> Result<()> {
    let node = app
        .panel
        .set_root(id)
        .with_context(|| format!("Cannot show playlist item {}", id))?;
    app.event_tx.send(AppEvent::RootChanged(node))?;

    Ok(())
}

pub(super) fn handle_root_changed(app: &mut App, id: ItemId) {
    app.panel.root_changed(id);
    app.selector.set_active(id);
}

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,

        Command::SaveConfig => {
            app.update_config();
            match config::save_config(&app.config) {
                Ok(()) => app.status = Some("Configuration saved".to_string()),
                Err(e) => {
                    warn!("Failed to save configuration: {}", e);
                    app.status = Some(format!("Failed to save configuration: {}", e));
                }
            }
        }

        Command::SetRoot(id) => match app.panel.set_root(id) {
            Ok(node) => app.event_tx.send(AppEvent::RootChanged(node))?,
            Err(e) => {
                warn!("Cannot show playlist item {}: {}", id, e);
                app.status = Some(e.to_string());
            }
        },

        Command::Remove(id) => {
            let result = app.playlist.borrow_mut().delete(id);
            match result {
                Ok(removed) => {
                    info!("Removed {} playlist items", removed.len());
                    for item in removed {
                        app.panel.remove_item(item);
                    }
                }
                Err(e) => app.status = Some(e.to_string()),
            }
        }

        Command::Filter(text) => app.panel.set_filter_text(&text),

        Command::ToggleRandom => app.panel.toggle_random(),
        Command::ToggleRepeat => app.panel.toggle_repeat(),

        Command::Add { kind, target, location } => {
            let task = match kind {
                DialogKind::SimpleAppend => AppTask::ReadFile { path: PathBuf::from(location), target },
                DialogKind::AdvancedAppend => AppTask::ReadLocation { location, target },
                DialogKind::AppendDirectory => AppTask::ScanDirectory { path: PathBuf::from(location), target },
            };
            app.task_tx.send(task)?;
        }
    }

    Ok(())
}

pub(super) fn handle_open_dialog(app: &mut App, request: DialogRequest) {
    app.commander.open_with(request.command_prefix());
}

pub(super) fn handle_media_scanned(app: &mut App, target: AddTarget, outcome: ScanOutcome) {
    let result = match outcome {
        ScanOutcome::Media(media) => app.playlist.borrow_mut().add_media(target, media).map(|_| 1),
        ScanOutcome::Directory(directory) => {
            let count = directory.media.len();
            app.playlist
                .borrow_mut()
                .add_directory(target, &directory.name, directory.media)
                .map(|_| count)
        }
    };

    match result {
        Ok(count) => {
            app.panel.model_mut().refresh_rows();
            app.status = Some(format!("Added {} items", count));
        }
        Err(e) => {
            warn!("Cannot add media: {}", e);
            app.status = Some(e.to_string());
        }
    }
}

pub(super) fn handle_status(app: &mut App, message: String) {
    app.status = Some(message);
}

pub(super) fn handle_error(app: &mut App, message: String) {
    error!("{}", message);
    app.status = Some(message);
}
