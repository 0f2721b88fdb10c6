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

//! Playlist tree view model.
//!
//! [`PlModel`] flattens the part of the playlist tree below a root node into
//! display rows. It owns the view-only concerns: which nodes are collapsed,
//! the search filter, the sort order and the shown columns. Mutations such as
//! deletion, drag and drop, and activation are applied to the shared playlist
//! and the rows are refreshed afterwards.

use std::{cmp::Ordering, collections::HashSet};

use log::{debug, info, warn};
use ratatui::layout::Position;

use crate::{
    components::PopupMenu,
    model::{
        AddTarget, Column, ColumnSet, ItemId, MediaInfo, SortOrder,
        playlist::{Playlist, PlaylistHandle},
        tree_model::{ContextAction, ModelIndex, PlaylistModel, RowKind, ViewRow},
    },
    util::format::format_time,
};

pub(crate) struct PlModel {
    playlist: PlaylistHandle,
    root: ItemId,
    rows: Vec<ViewRow>,
    collapsed: HashSet<ItemId>,
    filter: String,
    shown: ColumnSet,
    sort: Option<(Column, SortOrder)>,
    changes: Vec<ModelIndex>,
}

/// The view settings a row walk needs.
struct RowFilter<'a> {
    needle: String,
    collapsed: &'a HashSet<ItemId>,
    sort: Option<(Column, SortOrder)>,
}

impl PlModel {
    pub(crate) fn new(playlist: PlaylistHandle, root: ItemId, shown: ColumnSet) -> Self {
        let mut model = Self {
            playlist,
            root,
            rows: vec![],
            collapsed: HashSet::new(),
            filter: String::new(),
            shown,
            sort: None,
            changes: vec![],
        };
        model.refresh_rows();
        model
    }

    #[cfg(test)]
    pub(crate) fn filter(&self) -> &str {
        &self.filter
    }

    /// Re-reads the playlist, for example after media was added to it.
    pub(crate) fn refresh_rows(&mut self) {
        let rows = {
            let playlist = self.playlist.borrow();
            let settings = RowFilter {
                needle: self.filter.to_lowercase(),
                collapsed: &self.collapsed,
                sort: self.sort,
            };
            let mut rows = vec![];
            collect_rows(&playlist, self.root, 0, &settings, &mut rows);
            rows
        };
        self.rows = rows;
    }

    fn current_rows(&self) -> Vec<ModelIndex> {
        let playlist = self.playlist.borrow();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| playlist.is_current(r.id))
            .map(|(row, r)| ModelIndex { row, id: r.id })
            .collect()
    }

    fn record_current_change(&mut self, before: Vec<ModelIndex>) {
        let after = self.current_rows();
        self.changes.extend(before);
        self.changes.extend(after);
    }
}

fn collect_rows(
    playlist: &Playlist,
    parent: ItemId,
    depth: usize,
    settings: &RowFilter,
    rows: &mut Vec<ViewRow>,
) {
    let mut children = playlist.children(parent).to_vec();
    if let Some((column, order)) = settings.sort {
        children.sort_by(|a, b| {
            let ordering = compare(playlist, *a, *b, column);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    let filtering = !settings.needle.is_empty();

    for child in children {
        if filtering && !matches(playlist, child, &settings.needle) {
            continue;
        }

        let kind = if playlist.is_node(child) {
            RowKind::Node {
                expanded: filtering || !settings.collapsed.contains(&child),
            }
        } else {
            RowKind::Leaf
        };

        rows.push(ViewRow { id: child, depth, kind });

        if let RowKind::Node { expanded: true } = kind {
            collect_rows(playlist, child, depth + 1, settings, rows);
        }
    }
}

fn matches(playlist: &Playlist, id: ItemId, needle: &str) -> bool {
    playlist.media(id).is_some_and(|m| m.matches(needle))
        || playlist.children(id).iter().any(|c| matches(playlist, *c, needle))
}

fn compare(playlist: &Playlist, a: ItemId, b: ItemId, column: Column) -> Ordering {
    let fallback = MediaInfo::default();
    let left = playlist.media(a).unwrap_or(&fallback);
    let right = playlist.media(b).unwrap_or(&fallback);

    match column {
        Column::Number => Ordering::Equal,
        Column::Duration => left.duration.cmp(&right.duration),
        Column::TrackNumber => left.track_number.cmp(&right.track_number),
        _ => column_text(left, column)
            .to_lowercase()
            .cmp(&column_text(right, column).to_lowercase()),
    }
}

/// Display text of a media column. The number column depends on the item's
/// position and is handled by the model.
fn column_text(media: &MediaInfo, column: Column) -> String {
    match column {
        Column::Number => String::new(),
        Column::Title => media.display_title(),
        Column::Duration => media
            .duration
            .map_or_else(|| "--:--".to_string(), format_time),
        Column::Artist => media.artist.clone().unwrap_or_default(),
        Column::Genre => media.genre.clone().unwrap_or_default(),
        Column::Album => media.album.clone().unwrap_or_default(),
        Column::TrackNumber => media.track_number.map(|n| n.to_string()).unwrap_or_default(),
        Column::Description => media.description.clone().unwrap_or_default(),
    }
}

impl PlaylistModel for PlModel {
    fn root(&self) -> ItemId {
        self.root
    }

    fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    fn data(&self, index: ModelIndex, column: Column) -> String {
        let playlist = self.playlist.borrow();

        match column {
            Column::Number => playlist
                .position(index.id)
                .map(|p| p.to_string())
                .unwrap_or_default(),
            Column::Title => playlist
                .media(index.id)
                .map(MediaInfo::display_title)
                .unwrap_or_default(),
            // Nodes carry a name only
            _ if playlist.is_node(index.id) => String::new(),
            _ => playlist
                .media(index.id)
                .map(|m| column_text(m, column))
                .unwrap_or_default(),
        }
    }

    fn current_index(&self) -> Option<ModelIndex> {
        self.current_rows().into_iter().next()
    }

    fn is_current(&self, index: ModelIndex) -> bool {
        self.playlist.borrow().is_current(index.id)
    }

    fn activate(&mut self, index: ModelIndex) {
        let target = {
            let playlist = self.playlist.borrow();
            if playlist.is_node(index.id) {
                playlist.leaves_under(index.id).first().copied()
            } else {
                playlist.item(index.id).map(|item| item.id)
            }
        };

        let Some(target) = target else {
            debug!("Nothing to play below playlist item {}", index.id);
            return;
        };

        let before = self.current_rows();
        self.playlist.borrow_mut().set_current(target);

        if let Some(media) = self.playlist.borrow().media(target) {
            info!("Playing {}", media.display_title());
        }

        self.record_current_change(before);
    }

    fn activate_next(&mut self) {
        let before = self.current_rows();
        let next = self.playlist.borrow_mut().advance();

        match next {
            Some(id) => info!("Advanced to playlist item {}", id),
            None => info!("Reached the end of the playlist"),
        }

        self.record_current_change(before);
    }

    fn search(&mut self, text: &str) {
        debug!("Filtering playlist with {:?}", text);
        self.filter = text.to_string();
        self.refresh_rows();
    }

    fn has_random(&self) -> bool {
        self.playlist.borrow().random()
    }

    fn set_random(&mut self, random: bool) {
        self.playlist.borrow_mut().set_random(random);
    }

    fn has_repeat(&self) -> bool {
        self.playlist.borrow().repeat()
    }

    fn set_repeat(&mut self, repeat: bool) {
        self.playlist.borrow_mut().set_repeat(repeat);
    }

    fn has_loop(&self) -> bool {
        self.playlist.borrow().loop_all()
    }

    fn set_loop(&mut self, loop_all: bool) {
        self.playlist.borrow_mut().set_loop(loop_all);
    }

    fn shown_columns(&self) -> ColumnSet {
        self.shown
    }

    fn toggle_column(&mut self, column: Column) {
        self.shown.toggle(column);
        debug!("Shown columns are now {:#06x}", self.shown.bits());
    }

    fn sort(&mut self, column: Column, order: SortOrder) {
        // Sorting by number restores the playlist order
        self.sort = (column != Column::Number).then_some((column, order));
        self.refresh_rows();
    }

    fn sort_state(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    fn set_expanded(&mut self, index: ModelIndex, expanded: bool) {
        if !self.playlist.borrow().is_node(index.id) {
            return;
        }
        if expanded {
            self.collapsed.remove(&index.id);
        } else {
            self.collapsed.insert(index.id);
        }
        self.refresh_rows();
    }

    fn rebuild(&mut self, root: ItemId) {
        info!("Showing playlist node {}", root);
        self.root = root;
        self.refresh_rows();
    }

    fn remove_item(&mut self, id: ItemId) {
        self.collapsed.remove(&id);

        let Some(row) = self.rows.iter().position(|r| r.id == id) else {
            return;
        };
        let depth = self.rows[row].depth;
        let end = self.rows[row + 1..]
            .iter()
            .position(|r| r.depth <= depth)
            .map_or(self.rows.len(), |p| row + 1 + p);
        self.rows.drain(row..end);
    }

    fn delete(&mut self, indices: &[ModelIndex]) {
        if indices.is_empty() {
            debug!("Empty selection, nothing to delete");
            return;
        }

        for index in indices {
            // Already gone together with an earlier item of the selection
            if self.playlist.borrow().item(index.id).is_none() {
                continue;
            }

            let result = self.playlist.borrow_mut().delete(index.id);
            match result {
                Ok(removed) => removed.into_iter().for_each(|id| self.remove_item(id)),
                Err(e) => warn!("Cannot delete playlist item {}: {}", index.id, e),
            }
        }
    }

    fn drop_items(&mut self, items: &[ModelIndex], target: ModelIndex) {
        let ids: Vec<ItemId> = items
            .iter()
            .map(|i| i.id)
            .filter(|id| *id != target.id)
            .collect();
        if ids.is_empty() {
            return;
        }

        let result = self.playlist.borrow_mut().move_items(&ids, target.id);
        match result {
            Ok(()) => self.refresh_rows(),
            Err(e) => warn!("Cannot drop items on playlist item {}: {}", target.id, e),
        }
    }

    fn popup(
        &self,
        index: ModelIndex,
        point: Position,
        selection: &[ModelIndex],
    ) -> PopupMenu<ContextAction> {
        let targets = if selection.is_empty() {
            vec![index]
        } else {
            selection.to_vec()
        };

        let mut menu = PopupMenu::new(point).with_entry("Play", ContextAction::Play(index));

        match self.rows.get(index.row).map(|r| r.kind) {
            Some(RowKind::Node { expanded: true }) => {
                menu = menu.with_entry("Collapse", ContextAction::Collapse(index));
            }
            Some(RowKind::Node { expanded: false }) => {
                menu = menu.with_entry("Expand", ContextAction::Expand(index));
            }
            _ => {}
        }

        menu = menu
            .with_entry("Delete", ContextAction::Delete(targets.clone()))
            .with_entry("Sort ascending", ContextAction::Sort(Column::Title, SortOrder::Ascending))
            .with_entry("Sort descending", ContextAction::Sort(Column::Title, SortOrder::Descending));

        let playlist = self.playlist.borrow();
        let roots = playlist.roots();
        let in_library = playlist
            .top_level(index.id)
            .and_then(|top| roots.add_target(top))
            == Some(AddTarget::MediaLibrary);

        if roots.ml_category.is_some() && !in_library {
            menu = menu.with_entry("Add to media library", ContextAction::AddToMediaLibrary(targets));
        }

        menu
    }

    fn run_context_action(&mut self, action: ContextAction) {
        match action {
            ContextAction::Play(index) => self.activate(index),
            ContextAction::Expand(index) => self.set_expanded(index, true),
            ContextAction::Collapse(index) => self.set_expanded(index, false),
            ContextAction::Delete(indices) => self.delete(&indices),
            ContextAction::Sort(column, order) => self.sort(column, order),
            ContextAction::AddToMediaLibrary(indices) => {
                for index in indices {
                    let result = self.playlist.borrow_mut().copy_to_media_library(index.id);
                    match result {
                        Ok(copy) => info!("Added playlist item {} to the media library as {}", index.id, copy),
                        Err(e) => warn!("Cannot add playlist item {} to the media library: {}", index.id, e),
                    }
                }
            }
        }
    }

    fn take_data_changes(&mut self) -> Vec<ModelIndex> {
        std::mem::take(&mut self.changes)
    }
}
