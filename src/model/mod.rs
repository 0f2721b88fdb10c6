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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, playlist
//! item identifiers, media metadata and the set of displayable columns, along
//! with the playlist tree itself and the view model the playlist panel binds
//! to.

pub(crate) mod pl_model;
pub(crate) mod playlist;
pub(crate) mod tree_model;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single item (node or leaf) in the playlist tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ItemId(pub(crate) u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the media (input) an item represents. The same input may be
/// shown by several items, for example once in the tree and once in the flat
/// representation of the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct InputId(pub(crate) u32);

/// Where newly added media ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddTarget {
    Playlist,
    MediaLibrary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MediaInfo {
    pub(crate) uri: String,
    pub(crate) title: Option<String>,
    pub(crate) artist: Option<String>,
    pub(crate) album: Option<String>,
    pub(crate) genre: Option<String>,
    pub(crate) track_number: Option<u32>,
    pub(crate) duration: Option<u64>,
    pub(crate) description: Option<String>,
}

impl MediaInfo {
    pub(crate) fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub(crate) fn named(name: impl Into<String>) -> Self {
        Self {
            title: Some(name.into()),
            ..Self::default()
        }
    }

    /// The title, falling back to the last path segment of the URI.
    pub(crate) fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }

        self.uri
            .trim_end_matches('/')
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Case-insensitive match of `needle` (already lowercased) against the
    /// searchable text fields.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        let fields = [
            Some(self.display_title()),
            self.artist.clone(),
            self.album.clone(),
            self.genre.clone(),
            self.description.clone(),
            Some(self.uri.clone()),
        ];

        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The metadata columns the playlist tree can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Column {
    Number,
    Title,
    Duration,
    Artist,
    Genre,
    Album,
    TrackNumber,
    Description,
}

impl Column {
    /// Every column in display and menu order.
    pub(crate) const ALL: [Column; 8] = [
        Column::Number,
        Column::Title,
        Column::Duration,
        Column::Artist,
        Column::Genre,
        Column::Album,
        Column::TrackNumber,
        Column::Description,
    ];

    pub(crate) const fn bit(self) -> u32 {
        match self {
            Column::Number => 0x0001,
            Column::Title => 0x0002,
            Column::Duration => 0x0004,
            Column::Artist => 0x0008,
            Column::Genre => 0x0010,
            Column::Album => 0x0020,
            Column::TrackNumber => 0x0040,
            Column::Description => 0x0080,
        }
    }

    pub(crate) const fn title(self) -> &'static str {
        match self {
            Column::Number => "ID",
            Column::Title => "Title",
            Column::Duration => "Duration",
            Column::Artist => "Artist",
            Column::Genre => "Genre",
            Column::Album => "Album",
            Column::TrackNumber => "Track number",
            Column::Description => "Description",
        }
    }
}

/// Bitmask of the columns currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ColumnSet(u32);

impl ColumnSet {
    pub(crate) const fn bits(self) -> u32 {
        self.0
    }

    pub(crate) const fn contains(self, column: Column) -> bool {
        self.0 & column.bit() != 0
    }

    pub(crate) fn toggle(&mut self, column: Column) {
        self.0 ^= column.bit();
    }

    /// Shown columns, in display order.
    pub(crate) fn iter(self) -> impl Iterator<Item = Column> {
        Column::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        Self(iter.into_iter().fold(0, |bits, c| bits | c.bit()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub(crate) const fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_bits_are_distinct_and_ordered() {
        let bits: Vec<u32> = Column::ALL.iter().map(|c| c.bit()).collect();
        assert_eq!(bits, vec![0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80]);
    }

    #[test]
    fn column_set_toggle_flips_single_bit() {
        let mut set: ColumnSet = [Column::Title, Column::Duration].into_iter().collect();
        assert_eq!(set.bits(), 0x06);

        set.toggle(Column::Artist);
        assert!(set.contains(Column::Artist));
        set.toggle(Column::Title);
        assert!(!set.contains(Column::Title));

        let shown: Vec<Column> = set.iter().collect();
        assert_eq!(shown, vec![Column::Duration, Column::Artist]);
    }

    #[test]
    fn display_title_falls_back_to_file_name() {
        let media = MediaInfo::from_uri("/music/album/02 - song.flac");
        assert_eq!(media.display_title(), "02 - song.flac");

        let titled = MediaInfo {
            title: Some("Song".into()),
            ..media
        };
        assert_eq!(titled.display_title(), "Song");
    }

    #[test]
    fn media_matches_any_text_field() {
        let media = MediaInfo {
            uri: "/x/y.mp3".into(),
            artist: Some("Boards of Canada".into()),
            genre: Some("Electronic".into()),
            ..MediaInfo::default()
        };

        assert!(media.matches("canada"));
        assert!(media.matches("electro"));
        assert!(media.matches("y.mp3"));
        assert!(!media.matches("jazz"));
    }
}
