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

//! The query and command surface the playlist panel depends on.
//!
//! The panel never touches the playlist tree directly for display or
//! mutation; everything goes through a [`PlaylistModel`], which makes the
//! panel testable against a recording fake.

use ratatui::layout::Position;

use crate::{
    components::PopupMenu,
    model::{Column, ColumnSet, ItemId, SortOrder},
};

/// A transient reference to a visible row. Like any view index it is only
/// meaningful until the model's rows are rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ModelIndex {
    pub(crate) row: usize,
    pub(crate) id: ItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowKind {
    Leaf,
    Node { expanded: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ViewRow {
    pub(crate) id: ItemId,
    pub(crate) depth: usize,
    pub(crate) kind: RowKind,
}

/// Actions offered by the item context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContextAction {
    Play(ModelIndex),
    Expand(ModelIndex),
    Collapse(ModelIndex),
    Delete(Vec<ModelIndex>),
    Sort(Column, SortOrder),
    AddToMediaLibrary(Vec<ModelIndex>),
}

pub(crate) trait PlaylistModel {
    /// The node the visible rows are rooted at.
    fn root(&self) -> ItemId;

    fn rows(&self) -> &[ViewRow];

    fn index(&self, row: usize) -> Option<ModelIndex> {
        self.rows().get(row).map(|r| ModelIndex { row, id: r.id })
    }

    /// Display text of a cell.
    fn data(&self, index: ModelIndex, column: Column) -> String;

    fn current_index(&self) -> Option<ModelIndex>;

    fn is_current(&self, index: ModelIndex) -> bool;

    fn activate(&mut self, index: ModelIndex);

    fn activate_next(&mut self);

    fn search(&mut self, text: &str);

    fn has_random(&self) -> bool;
    fn set_random(&mut self, random: bool);

    fn has_repeat(&self) -> bool;
    fn set_repeat(&mut self, repeat: bool);

    fn has_loop(&self) -> bool;
    fn set_loop(&mut self, loop_all: bool);

    fn shown_columns(&self) -> ColumnSet;

    fn toggle_column(&mut self, column: Column);

    fn sort(&mut self, column: Column, order: SortOrder);

    fn sort_state(&self) -> Option<(Column, SortOrder)>;

    fn set_expanded(&mut self, index: ModelIndex, expanded: bool);

    /// Rebuilds the visible rows rooted at `root`.
    fn rebuild(&mut self, root: ItemId);

    /// Drops an item, already gone from the playlist, from the view.
    fn remove_item(&mut self, id: ItemId);

    fn delete(&mut self, indices: &[ModelIndex]);

    fn drop_items(&mut self, items: &[ModelIndex], target: ModelIndex);

    /// Builds the context menu for `index`, shown at `point`.
    fn popup(
        &self,
        index: ModelIndex,
        point: Position,
        selection: &[ModelIndex],
    ) -> PopupMenu<ContextAction>;

    fn run_context_action(&mut self, action: ContextAction);

    /// Indices whose data changed since the last call.
    fn take_data_changes(&mut self) -> Vec<ModelIndex>;
}
