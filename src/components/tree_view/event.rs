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

//! Input handling for the tree view.
//!
//! This module maps keyboard events to cursor navigation and marking, and
//! reports the remaining ones as [`TreeAction`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    components::{TreeAction, TreeView},
    model::tree_model::{RowKind, ViewRow},
};

impl TreeView {
    pub(crate) fn process_key(&mut self, key: &KeyEvent, rows: &[ViewRow]) -> Option<TreeAction> {
        let len = rows.len();

        // Internal events
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => self.goto_next(len),
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => self.goto_previous(len),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => self.goto_first(len),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.goto_last(len),

            (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => self.goto_page_forward(len),
            (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => self.goto_page_back(len),

            (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.mark_all(rows),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => self.clear_marks(),

            (KeyCode::Char(' '), _) => {
                if let Some(row) = self.cursor().and_then(|i| rows.get(i)) {
                    self.toggle_mark(row.id);
                }
                self.goto_next(len);
            }

            // External events that result in a tree action
            _ => return self.action_for(key, rows),
        }

        // The keyboard took over from the mouse
        self.picked = None;

        None
    }

    fn action_for(&mut self, key: &KeyEvent, rows: &[ViewRow]) -> Option<TreeAction> {
        let cursor = self.cursor().filter(|i| *i < rows.len());

        match key.code {
            KeyCode::Enter => cursor.map(TreeAction::Activate),

            KeyCode::Delete | KeyCode::Backspace => Some(TreeAction::DeleteSelection),

            KeyCode::Right | KeyCode::Char('l') => {
                let row = cursor?;
                match rows[row].kind {
                    RowKind::Node { expanded: false } => Some(TreeAction::Expand(row)),
                    RowKind::Node { expanded: true } if row + 1 < rows.len() => {
                        self.goto_next(rows.len());
                        None
                    }
                    _ => None,
                }
            }

            KeyCode::Left | KeyCode::Char('h') => {
                let row = cursor?;
                match rows[row].kind {
                    RowKind::Node { expanded: true } => Some(TreeAction::Collapse(row)),
                    _ => {
                        // Jump to the parent row
                        let depth = rows[row].depth;
                        let parent = rows[..row].iter().rposition(|r| r.depth < depth);
                        if parent.is_some() {
                            self.set_cursor(parent);
                        }
                        None
                    }
                }
            }

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tree_rows() -> Vec<ViewRow> {
        vec![
            ViewRow { id: ItemId(1), depth: 0, kind: RowKind::Node { expanded: true } },
            ViewRow { id: ItemId(2), depth: 1, kind: RowKind::Leaf },
            ViewRow { id: ItemId(3), depth: 0, kind: RowKind::Node { expanded: false } },
        ]
    }

    #[test]
    fn space_marks_and_advances() {
        let rows = tree_rows();
        let mut tree = TreeView::new();
        tree.set_cursor(Some(0));

        assert_eq!(tree.process_key(&key(KeyCode::Char(' ')), &rows), None);
        assert!(tree.is_marked(ItemId(1)));
        assert_eq!(tree.cursor(), Some(1));
    }

    #[test]
    fn space_after_click_selects_only_marks() {
        let rows = tree_rows();
        let mut tree = TreeView::new();
        tree.pick_row(2, &rows);
        tree.set_cursor(Some(1));

        tree.process_key(&key(KeyCode::Char(' ')), &rows);
        assert_eq!(
            tree.selected_indices(&rows),
            vec![crate::model::tree_model::ModelIndex { row: 1, id: ItemId(2) }]
        );
    }

    #[test]
    fn enter_and_delete_become_actions() {
        let rows = tree_rows();
        let mut tree = TreeView::new();
        tree.set_cursor(Some(1));

        assert_eq!(tree.process_key(&key(KeyCode::Enter), &rows), Some(TreeAction::Activate(1)));
        assert_eq!(
            tree.process_key(&key(KeyCode::Backspace), &rows),
            Some(TreeAction::DeleteSelection)
        );
        assert_eq!(
            tree.process_key(&key(KeyCode::Delete), &rows),
            Some(TreeAction::DeleteSelection)
        );
    }

    #[test]
    fn left_and_right_fold_nodes() {
        let rows = tree_rows();
        let mut tree = TreeView::new();

        tree.set_cursor(Some(2));
        assert_eq!(tree.process_key(&key(KeyCode::Right), &rows), Some(TreeAction::Expand(2)));

        tree.set_cursor(Some(0));
        assert_eq!(tree.process_key(&key(KeyCode::Left), &rows), Some(TreeAction::Collapse(0)));

        tree.set_cursor(Some(1));
        assert_eq!(tree.process_key(&key(KeyCode::Left), &rows), None);
        assert_eq!(tree.cursor(), Some(0));
    }
}
