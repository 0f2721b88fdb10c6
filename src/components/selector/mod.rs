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

//! Root selector sidebar.
//!
//! Lists the top-level playlist nodes the panel can show. Choosing one asks
//! the application to make it the panel's root; the entry of the root
//! actually shown is marked once the panel reports the change.

mod event;
mod render;

use ratatui::{layout::Rect, widgets::ListState};

use crate::model::{ItemId, playlist::WellKnownRoots};

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorEntry {
    label: &'static str,
    /// Tree representation, the id sent when the entry is chosen.
    id: ItemId,
    /// Flat representation of the same node.
    flat_id: ItemId,
}

#[derive(Debug, Default)]
pub(crate) struct RootSelector {
    entries: Vec<SelectorEntry>,
    state: ListState,
    active: Option<ItemId>,
    focused: bool,
    area: Rect,
}

impl RootSelector {
    pub(crate) fn new(roots: WellKnownRoots) -> Self {
        let mut entries = vec![SelectorEntry {
            label: "Playlist",
            id: roots.local_category,
            flat_id: roots.local_onelevel,
        }];

        if let Some((id, flat_id)) = roots.ml_category.zip(roots.ml_onelevel) {
            entries.push(SelectorEntry { label: "Media library", id, flat_id });
        }

        let mut state = ListState::default();
        state.select(Some(0));

        Self {
            entries,
            state,
            ..Self::default()
        }
    }

    pub(crate) fn selected_id(&self) -> Option<ItemId> {
        self.state.selected().and_then(|i| self.entries.get(i)).map(|e| e.id)
    }

    pub(crate) fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Marks the entry showing `id`, in either representation.
    pub(crate) fn set_active(&mut self, id: ItemId) {
        self.active = self
            .entries
            .iter()
            .find(|e| e.id == id || e.flat_id == id)
            .map(|e| e.id);
    }

    #[cfg(test)]
    pub(crate) fn active_label(&self) -> Option<&'static str> {
        let active = self.active?;
        self.entries.iter().find(|e| e.id == active).map(|e| e.label)
    }

    fn next(&mut self) {
        let len = self.entries.len();
        if len == 0 { return; }
        let i = self.state.selected().map_or(0, |i| (i + 1) % len);
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.entries.len();
        if len == 0 { return; }
        let i = self.state.selected().map_or(0, |i| (i + len - 1) % len);
        self.state.select(Some(i));
    }
}
