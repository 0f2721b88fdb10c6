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

//! Asynchronous application task processing.
//!
//! Blocking work, reading tags and walking directories, is offloaded from
//! the UI thread to a dedicated worker. The worker translates [`AppTask`]
//! requests into scans and broadcasts the results back to the application
//! as [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of
//! time, should be tasks. Everything else is handled by events.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::Result;
use log::warn;

use crate::{
    events::AppEvent,
    media::scan::ScannedDirectory,
    model::{AddTarget, MediaInfo},
};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Read a single local file.
    ReadFile { path: PathBuf, target: AddTarget },
    /// Read a file or accept any other locator as a stream.
    ReadLocation { location: String, target: AddTarget },
    ScanDirectory { path: PathBuf, target: AddTarget },
}

/// What a finished task found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanOutcome {
    Media(MediaInfo),
    Directory(ScannedDirectory),
}

/// Spawns a background thread to process application tasks until the task
/// channel closes.
pub(crate) fn spawn_task_worker(task_rx: Receiver<AppTask>, event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &event_tx) {
                warn!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

fn handle_task(task: AppTask, event_tx: &Sender<AppEvent>) -> Result<()> {
    match task {
        AppTask::ReadFile { path, target } => handlers::read_file(event_tx, &path, target),
        AppTask::ReadLocation { location, target } => {
            handlers::read_location(event_tx, &location, target)
        }
        AppTask::ScanDirectory { path, target } => {
            handlers::scan_directory(event_tx, &path, target)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;

    #[test]
    fn worker_reports_results_and_errors() {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        spawn_task_worker(task_rx, event_tx);

        task_tx
            .send(AppTask::ReadLocation {
                location: "http://radio.example/live".into(),
                target: AddTarget::Playlist,
            })
            .unwrap();
        task_tx
            .send(AppTask::ReadFile {
                path: PathBuf::from("/definitely/not/here.mp3"),
                target: AddTarget::Playlist,
            })
            .unwrap();

        let timeout = Duration::from_secs(5);
        assert!(matches!(
            event_rx.recv_timeout(timeout),
            Ok(AppEvent::MediaScanned(AddTarget::Playlist, ScanOutcome::Media(m)))
                if m.uri == "http://radio.example/live"
        ));
        assert!(matches!(event_rx.recv_timeout(timeout), Ok(AppEvent::Error(_))));
    }
}
