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

//! Interactive tree table widget state.
//!
//! The tree view displays the rows of a [`PlaylistModel`] and keeps only view
//! state: the cursor, the scroll offset and the selection. The selection is
//! the set of marked items plus the row picked with the mouse; the cursor on
//! its own selects nothing. It never mutates the model itself; navigation is handled
//! internally and anything with an effect on the model is reported back to the
//! owner as a [`TreeAction`].
//!
//! [`PlaylistModel`]: crate::model::tree_model::PlaylistModel

mod event;
mod render;

use std::collections::HashSet;

use ratatui::{
    layout::{Position, Rect},
    widgets::TableState,
};

use crate::model::{
    Column, ItemId,
    tree_model::{ModelIndex, ViewRow},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TreeAction {
    Activate(usize),
    Expand(usize),
    Collapse(usize),
    DeleteSelection,
}

/// Screen geometry of the last draw, for mouse hit-testing.
#[derive(Debug, Default, Clone)]
struct TreeLayout {
    header: Rect,
    body: Rect,
    columns: Vec<(Column, Rect)>,
}

#[derive(Debug, Default)]
pub(crate) struct TreeView {
    table_state: TableState,
    marks: HashSet<ItemId>,
    picked: Option<ItemId>,
    layout: TreeLayout,
}

impl TreeView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cursor(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub(crate) fn set_cursor(&mut self, row: Option<usize>) {
        self.table_state.select(row);
    }

    /// Brings a row into view. The cursor follows it so the table keeps the
    /// row on screen.
    pub(crate) fn scroll_to(&mut self, row: usize) {
        self.table_state.select(Some(row));
    }

    pub(crate) fn is_marked(&self, id: ItemId) -> bool {
        self.marks.contains(&id)
    }

    pub(crate) fn marked_count(&self) -> usize {
        self.marks.len()
    }

    /// The selection, in row order.
    pub(crate) fn selected_indices(&self, rows: &[ViewRow]) -> Vec<ModelIndex> {
        rows.iter()
            .enumerate()
            .filter(|(_, r)| self.marks.contains(&r.id) || self.picked == Some(r.id))
            .map(|(row, r)| ModelIndex { row, id: r.id })
            .collect()
    }

    /// Moves the cursor to a row and picks it. Picking an unmarked row
    /// replaces the marks, so the row alone is the selection; picking a
    /// marked row keeps the marks.
    pub(crate) fn pick_row(&mut self, row: usize, rows: &[ViewRow]) {
        let Some(id) = rows.get(row).map(|r| r.id) else {
            return;
        };
        if !self.marks.contains(&id) {
            self.marks.clear();
        }
        self.picked = Some(id);
        self.table_state.select(Some(row));
    }

    /// Drops marks of rows that are gone and keeps the cursor in range after
    /// the model's rows changed.
    pub(crate) fn sync(&mut self, rows: &[ViewRow]) {
        let visible: HashSet<ItemId> = rows.iter().map(|r| r.id).collect();
        self.marks.retain(|id| visible.contains(id));
        self.picked = self.picked.filter(|id| visible.contains(id));

        match self.cursor() {
            _ if rows.is_empty() => self.table_state.select(None),
            Some(row) if row >= rows.len() => self.table_state.select(Some(rows.len() - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Row under a screen position, if the position is on a visible row.
    pub(crate) fn row_at(&self, position: Position, len: usize) -> Option<usize> {
        if !self.layout.body.contains(position) {
            return None;
        }
        let row = self.table_state.offset() + usize::from(position.y - self.layout.body.y);
        (row < len).then_some(row)
    }

    /// Screen position of a row's first cell, if the row is on screen.
    pub(crate) fn row_position(&self, row: usize) -> Option<Position> {
        let offset = self.table_state.offset();
        let visible = usize::from(self.layout.body.height);
        if row < offset || row >= offset + visible {
            return None;
        }
        Some(Position::new(self.layout.body.x, self.layout.body.y + (row - offset) as u16))
    }

    pub(crate) fn header_contains(&self, position: Position) -> bool {
        self.layout.header.contains(position)
    }

    /// Header column under a screen position.
    pub(crate) fn column_at(&self, position: Position) -> Option<Column> {
        if !self.header_contains(position) {
            return None;
        }
        self.layout
            .columns
            .iter()
            .find(|(_, area)| position.x >= area.x && position.x < area.right())
            .map(|(column, _)| *column)
    }

    fn goto_next(&mut self, len: usize) {
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self, len: usize) {
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self, len: usize) {
        if len > 0 {
            self.table_state.select(Some(len - 1));
        }
    }

    fn goto_page_forward(&mut self, len: usize) {
        if len == 0 { return; }
        let page = usize::from(self.layout.body.height.max(1));
        let i = self.cursor().map_or(0, |i| (i + page).min(len - 1));
        self.table_state.select(Some(i));
    }

    fn goto_page_back(&mut self, len: usize) {
        if len == 0 { return; }
        let page = usize::from(self.layout.body.height.max(1));
        let i = self.cursor().map_or(0, |i| i.saturating_sub(page));
        self.table_state.select(Some(i));
    }

    fn toggle_mark(&mut self, id: ItemId) {
        if !self.marks.insert(id) {
            self.marks.remove(&id);
        }
    }

    fn mark_all(&mut self, rows: &[ViewRow]) {
        self.marks.extend(rows.iter().map(|r| r.id));
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
        self.picked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree_model::RowKind;

    fn rows(n: u32) -> Vec<ViewRow> {
        (0..n)
            .map(|i| ViewRow { id: ItemId(10 + i), depth: 0, kind: RowKind::Leaf })
            .collect()
    }

    #[test]
    fn navigation_wraps_around() {
        let rows = rows(3);
        let mut tree = TreeView::new();
        tree.goto_next(rows.len());
        assert_eq!(tree.cursor(), Some(0));
        tree.goto_previous(rows.len());
        assert_eq!(tree.cursor(), Some(2));
        tree.goto_next(rows.len());
        assert_eq!(tree.cursor(), Some(0));
        tree.goto_last(rows.len());
        assert_eq!(tree.cursor(), Some(2));
    }

    #[test]
    fn cursor_alone_selects_nothing() {
        let rows = rows(3);
        let mut tree = TreeView::new();
        tree.sync(&rows);
        assert_eq!(tree.cursor(), Some(0));
        assert!(tree.selected_indices(&rows).is_empty());

        tree.toggle_mark(ItemId(12));
        tree.toggle_mark(ItemId(10));
        assert_eq!(
            tree.selected_indices(&rows),
            vec![ModelIndex { row: 0, id: ItemId(10) }, ModelIndex { row: 2, id: ItemId(12) }]
        );
    }

    #[test]
    fn picking_unmarked_row_replaces_marks() {
        let rows = rows(4);
        let mut tree = TreeView::new();
        tree.toggle_mark(ItemId(10));
        tree.toggle_mark(ItemId(11));

        // A marked row keeps the marks
        tree.pick_row(1, &rows);
        assert_eq!(tree.selected_indices(&rows).len(), 2);

        tree.pick_row(3, &rows);
        assert_eq!(tree.cursor(), Some(3));
        assert_eq!(tree.selected_indices(&rows), vec![ModelIndex { row: 3, id: ItemId(13) }]);

        tree.sync(&rows[..2]);
        assert!(tree.selected_indices(&rows).is_empty());
    }

    #[test]
    fn sync_prunes_marks_and_clamps_cursor() {
        let mut tree = TreeView::new();
        tree.mark_all(&rows(5));
        tree.set_cursor(Some(4));

        tree.sync(&rows(2));
        assert_eq!(tree.marked_count(), 2);
        assert_eq!(tree.cursor(), Some(1));

        tree.sync(&[]);
        assert_eq!(tree.cursor(), None);
    }
}
