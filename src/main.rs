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

//! # plview
//!
//! A terminal browser for a hierarchical media playlist.
//!
//! The heart of the application is the playlist panel: a tree view over one
//! node of the playlist with a toolbar of add, shuffle, repeat, go-to-playing,
//! filter and clear controls. A sidebar selects which top-level node the panel
//! shows, and a command line answers the panel's add dialogs.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern so the
//! terminal state is restored even when the event loop fails.
//!
//! * The **Main Thread** owns the playlist, the panel and the terminal, and
//!   handles every [`AppEvent`] in turn.
//! * A **Task Worker** reads tags and walks directories off the UI thread.
//! * **Input and Tick Threads** feed terminal input and periodic redraws into
//!   the same event channel.
//!
//! Communication between threads uses `std::sync::mpsc` channels.

mod commander;
mod components;
mod config;
mod dialogs;
mod events;
mod media;
mod model;
mod render;
mod tasks;
mod theme;
mod util;

use std::{
    fs::File,
    panic,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{LevelFilter, error, info, warn};

use crate::{
    commander::Commander,
    components::{PlaylistPanel, RootSelector},
    config::AppConfig,
    dialogs::DialogRequester,
    events::{AppEvent, process_events},
    model::{
        AddTarget,
        pl_model::PlModel,
        playlist::{Playlist, PlaylistHandle},
        tree_model::PlaylistModel,
    },
    tasks::AppTask,
    theme::Theme,
    util::term::{Tui, restore_terminal, setup_terminal},
};

/// Application state.
pub(crate) struct App {
    pub(crate) config: AppConfig,
    pub(crate) theme: Theme,

    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,

    pub(crate) task_tx: Sender<AppTask>,

    pub(crate) playlist: PlaylistHandle,
    pub(crate) panel: PlaylistPanel<PlModel, DialogRequester>,
    pub(crate) selector: RootSelector,
    pub(crate) commander: Commander,

    /// Last message for the status line.
    pub(crate) status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub(crate) fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let mut playlist = Playlist::new(config.media_library, config.prefer_tree);
        playlist.set_random(config.random);
        playlist.set_repeat(config.repeat);
        playlist.set_loop(config.loop_all);

        let roots = playlist.roots();
        let playlist = playlist.into_handle();

        let model = PlModel::new(playlist.clone(), roots.local_category, config.shown_columns());
        let dialogs = DialogRequester::new(event_tx.clone());
        let panel = PlaylistPanel::new(playlist.clone(), model, dialogs);

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            playlist,
            panel,
            selector: RootSelector::new(roots),
            commander: Commander::new(),
            status: None,
        })
    }

    /// Copies the model's flags and shown columns back into the
    /// configuration, ready to be stored.
    pub(crate) fn update_config(&mut self) {
        let model = self.panel.model();
        self.config.random = model.has_random();
        self.config.repeat = model.has_repeat();
        self.config.loop_all = model.has_loop();
        self.config.set_shown_columns(model.shown_columns());
    }

    /// Where media found in the configured directories ends up.
    fn startup_target(&self) -> AddTarget {
        if self.playlist.borrow().roots().ml_category.is_some() {
            AddTarget::MediaLibrary
        } else {
            AddTarget::Playlist
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, initialises logging, manages the terminal
/// lifecycle and stores the configuration again on the way out.
fn main() -> Result<()> {
    let config = config::load_config();

    init_logging(&config);

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initialise application")?;

    let background = Theme::to_hex(app.theme.background_colour).unwrap_or_default();
    let mut terminal = setup_terminal(&background)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        error!("Application error: {:#}", e);
    }

    app.update_config();
    if let Err(e) = config::save_config(&app.config) {
        warn!("Failed to save configuration: {}", e);
    }

    info!("Exiting");

    res.context("Application error occurred")
}

/// Sends log output to a file next to the configuration, since the terminal
/// belongs to the interface. Without a usable file, logging stays off.
fn init_logging(config: &AppConfig) {
    let Some(file) = config::log_file_path().and_then(|path| open_log_file(&path)) else {
        return;
    };

    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);

    let mut clog = colog::default_builder();
    clog.filter(None, level);
    clog.target(env_logger::Target::Pipe(Box::new(file)));
    clog.write_style(env_logger::WriteStyle::Never);
    if clog.try_init().is_err() {
        return;
    }

    panic::set_hook(Box::new(|panic_info| {
        let current_thread = thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    info!("Logging at level {}", level);
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok()?;
    }
    File::create(path).ok()
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process blocking [`AppTask`]s.
/// * An input thread to poll for terminal key and mouse events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// It then queues the startup scans and the initial root selection, and
/// hands control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Tui, app: &mut App, task_rx: Receiver<AppTask>) -> Result<()> {
    // Spawn a background worker to process application tasks.
    tasks::spawn_task_worker(task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let sent = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx_input.send(AppEvent::Key(key))
                }
                Ok(Event::Mouse(mouse)) => tx_input.send(AppEvent::Mouse(mouse)),
                _ => Ok(()),
            };
            if sent.is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(250));
        }
    });

    let target = app.startup_target();
    for dir in &app.config.media_dirs {
        info!("Scanning {} at startup", dir);
        app.task_tx
            .send(AppTask::ScanDirectory { path: PathBuf::from(dir), target })
            .context("Task worker is gone")?;
    }

    if let Some(id) = app.selector.selected_id() {
        app.event_tx.send(AppEvent::SelectRoot(id))?;
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
