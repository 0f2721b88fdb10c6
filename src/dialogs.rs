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

//! File and directory add dialogs.
//!
//! The playlist panel asks for dialogs through the [`DialogProvider`] trait
//! and never implements them. The application's provider posts the request
//! to the event loop, which answers it by opening the command line with the
//! matching add command typed in.

use std::sync::mpsc::Sender;

use anyhow::{Context, Result};
use log::debug;

use crate::{events::AppEvent, model::AddTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogKind {
    /// Add one or more files.
    SimpleAppend,
    /// Add any media resource locator, files or streams.
    AdvancedAppend,
    AppendDirectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DialogRequest {
    pub(crate) kind: DialogKind,
    pub(crate) target: AddTarget,
}

impl DialogRequest {
    /// The command line text that performs this request.
    pub(crate) fn command_prefix(&self) -> &'static str {
        match (self.kind, self.target) {
            (DialogKind::SimpleAppend, AddTarget::Playlist) => "add ",
            (DialogKind::SimpleAppend, AddTarget::MediaLibrary) => "mladd ",
            (DialogKind::AdvancedAppend, AddTarget::Playlist) => "open ",
            (DialogKind::AdvancedAppend, AddTarget::MediaLibrary) => "mlopen ",
            (DialogKind::AppendDirectory, AddTarget::Playlist) => "adddir ",
            (DialogKind::AppendDirectory, AddTarget::MediaLibrary) => "mladddir ",
        }
    }
}

pub(crate) trait DialogProvider {
    fn open(&self, request: DialogRequest) -> Result<()>;
}

/// Forwards dialog requests to the application event loop.
pub(crate) struct DialogRequester {
    event_tx: Sender<AppEvent>,
}

impl DialogRequester {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl DialogProvider for DialogRequester {
    fn open(&self, request: DialogRequest) -> Result<()> {
        debug!("Requesting {:?} dialog for {:?}", request.kind, request.target);
        self.event_tx
            .send(AppEvent::OpenDialog(request))
            .context("Event loop has gone away")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn prefixes_follow_target() {
        let request = DialogRequest {
            kind: DialogKind::AppendDirectory,
            target: AddTarget::MediaLibrary,
        };
        assert_eq!(request.command_prefix(), "mladddir ");

        let request = DialogRequest {
            kind: DialogKind::AdvancedAppend,
            target: AddTarget::Playlist,
        };
        assert_eq!(request.command_prefix(), "open ");
    }

    #[test]
    fn requester_posts_event() {
        let (tx, rx) = mpsc::channel();
        let requester = DialogRequester::new(tx);
        let request = DialogRequest {
            kind: DialogKind::SimpleAppend,
            target: AddTarget::Playlist,
        };

        requester.open(request).unwrap();
        assert!(matches!(rx.try_recv(), Ok(AppEvent::OpenDialog(r)) if r == request));
    }
}
