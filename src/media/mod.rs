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

//! Media discovery and metadata.
//!
//! Turns filesystem paths and other media locations into [`MediaInfo`]
//! records for the playlist. Tags are read with `lofty`; files whose tags
//! cannot be read are still added, named after the file.

pub(crate) mod scan;

use std::path::Path;

use lofty::{prelude::*, probe::Probe};
use log::warn;

use crate::model::MediaInfo;

pub(crate) const AUDIO_EXTENSIONS: [&str; 10] =
    ["mp3", "flac", "ogg", "opus", "m4a", "wav", "aac", "wma", "ape", "wv"];

pub(crate) fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Reads the metadata of a local file.
pub(crate) fn read_media(path: &Path) -> MediaInfo {
    let mut media = MediaInfo::from_uri(path.to_string_lossy());

    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            warn!("Cannot read tags of {}: {}", path.display(), e);
            return media;
        }
    };

    let duration = tagged_file.properties().duration().as_secs();
    media.duration = (duration > 0).then_some(duration);

    if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        media.title = tag.title().map(|s| s.to_string());
        media.artist = tag.artist().map(|s| s.to_string());
        media.album = tag.album().map(|s| s.to_string());
        media.genre = tag.genre().map(|s| s.to_string());
        media.track_number = tag.track();
        media.description = tag.comment().map(|s| s.to_string());
    }

    media
}

/// Media for a location typed by the user: an existing path is read as a
/// file, anything else is kept as a stream locator.
pub(crate) fn media_for_location(location: &str) -> MediaInfo {
    let path = Path::new(location);
    if path.is_file() {
        read_media(path)
    } else {
        MediaInfo::from_uri(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_extensions_are_case_insensitive() {
        assert!(is_audio_file(Path::new("/a/b.flac")));
        assert!(is_audio_file(Path::new("/a/b.MP3")));
        assert!(!is_audio_file(Path::new("/a/cover.jpg")));
        assert!(!is_audio_file(Path::new("/a/README")));
    }

    #[test]
    fn stream_locations_are_kept_verbatim() {
        let media = media_for_location("http://radio.example/stream");
        assert_eq!(media.uri, "http://radio.example/stream");
        assert_eq!(media.display_title(), "stream");
        assert_eq!(media.duration, None);
    }

    #[test]
    fn unreadable_files_fall_back_to_file_name() {
        let dir = std::env::temp_dir().join(format!("plview-media-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("broken.mp3");
        std::fs::write(&file, b"not really audio").unwrap();

        let media = read_media(&file);
        assert_eq!(media.display_title(), "broken.mp3");
        assert_eq!(media.artist, None);

        std::fs::remove_dir_all(&dir).ok();
    }
}
