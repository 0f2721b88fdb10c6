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

//! Directory scanning.
//!
//! A scan walks a directory tree with `walkdir`, in file name order, and
//! collects the audio files below it.

use std::path::Path;

use anyhow::{Result, bail};
use log::{debug, info};
use walkdir::WalkDir;

use crate::{
    media::{is_audio_file, read_media},
    model::MediaInfo,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedDirectory {
    /// Name of the directory, used for its playlist node.
    pub(crate) name: String,
    pub(crate) media: Vec<MediaInfo>,
}

pub(crate) fn scan_directory(dir: &Path) -> Result<ScannedDirectory> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string());

    info!("Scanning {}", dir.display());

    let media: Vec<MediaInfo> = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| {
            debug!("Reading {}", e.path().display());
            read_media(e.path())
        })
        .collect();

    info!("Found {} media files in {}", media.len(), dir.display());

    Ok(ScannedDirectory { name, media })
}
