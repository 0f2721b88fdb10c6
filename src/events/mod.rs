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

//! Application events and the main event loop.
//!
//! Every input, worker result and internal notification reaches the UI
//! thread as an [`AppEvent`] on a single channel. [`process_events`]
//! handles them one at a time; after each one the panel picks up the
//! model's data changes and the screen is redrawn.
//!
//! # Organization
//!
//! * `handlers`: one handler per application event.
//! * `key_handlers`: routing of terminal input to the command line, the
//!   root selector and the playlist panel.

mod handlers;
mod key_handlers;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};

use crate::{
    App,
    commander::Command,
    dialogs::DialogRequest,
    model::{AddTarget, ItemId},
    render::draw,
    tasks::ScanOutcome,
    util::term::Tui,
};

use handlers::*;
use key_handlers::{process_key_event, process_mouse_event};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),

    /// Show the node an item resolves to. The id always comes from the
    /// playlist, so failing to resolve it is fatal.
    SelectRoot(ItemId),
    /// The panel now shows this node.
    RootChanged(ItemId),

    Command(Command),
    OpenDialog(DialogRequest),

    MediaScanned(AddTarget, ScanOutcome),

    Status(String),
    Error(String),

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until an exit event is received, the event channel
/// is closed, or a handler fails.
pub(crate) fn process_events(terminal: &mut Tui, app: &mut App) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if !handle_event(app, event)? {
            break;
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Handles a single event, returning `false` when the application should
/// exit.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<bool> {
    match event {
        AppEvent::ExitApplication => return Ok(false),

        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse)?,
        AppEvent::SelectRoot(id) => handle_select_root(app, id)?,
        AppEvent::RootChanged(id) => handle_root_changed(app, id),
        AppEvent::Command(command) => handle_command(app, command)?,
        AppEvent::OpenDialog(request) => handle_open_dialog(app, request),
        AppEvent::MediaScanned(target, outcome) => handle_media_scanned(app, target, outcome),
        AppEvent::Status(message) => handle_status(app, message),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick => {}
    }

    app.panel.process_model_changes();

    Ok(true)
}
