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

use std::{path::Path, sync::mpsc::Sender};

use anyhow::{Result, bail};

use crate::{
    events::AppEvent,
    media::{self, scan},
    model::AddTarget,
    tasks::ScanOutcome,
};

pub(super) fn read_file(event_tx: &Sender<AppEvent>, path: &Path, target: AddTarget) -> Result<()> {
    if !path.is_file() {
        bail!("No such file: {}", path.display());
    }

    let media = media::read_media(path);
    event_tx.send(AppEvent::MediaScanned(target, ScanOutcome::Media(media)))?;

    Ok(())
}

pub(super) fn read_location(event_tx: &Sender<AppEvent>, location: &str, target: AddTarget) -> Result<()> {
    let media = media::media_for_location(location);
    event_tx.send(AppEvent::MediaScanned(target, ScanOutcome::Media(media)))?;

    Ok(())
}

pub(super) fn scan_directory(event_tx: &Sender<AppEvent>, path: &Path, target: AddTarget) -> Result<()> {
    let scanned = scan::scan_directory(path)?;
    event_tx.send(AppEvent::MediaScanned(target, ScanOutcome::Directory(scanned)))?;

    Ok(())
}
