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

//! Input handling for the playlist panel.
//!
//! Events go to the open popup menu first, then to the filter box when it
//! has focus, and otherwise to the panel's own key and mouse bindings with
//! the remaining keys handed to the tree view.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use tui_input::backend::crossterm::EventHandler;

use crate::{
    components::{MenuOutcome, TreeAction},
    dialogs::DialogProvider,
    model::tree_model::PlaylistModel,
};

use super::{PanelFocus, PanelMenu, PlaylistPanel, ToolbarButton};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

impl<M: PlaylistModel, D: DialogProvider> PlaylistPanel<M, D> {
    /// Processes an input event, returning whether the panel consumed it.
    pub(crate) fn process_event(&mut self, event: &Event) -> Result<bool> {
        if self.menu.is_some() {
            self.process_menu_event(event)?;
            return Ok(true);
        }

        match event {
            Event::Key(key) => match self.focus {
                PanelFocus::Search => Ok(self.process_search_key(event, key)),
                PanelFocus::Tree => Ok(self.process_tree_key(key)),
            },
            Event::Mouse(mouse) => self.process_mouse(mouse),
            _ => Ok(false),
        }
    }

    fn process_menu_event(&mut self, event: &Event) -> Result<()> {
        match self.menu.as_mut() {
            Some(PanelMenu::Add(menu)) => match menu.process_event(event) {
                MenuOutcome::Pending => {}
                MenuOutcome::Dismissed => self.menu = None,
                MenuOutcome::Triggered(kind) => {
                    self.menu = None;
                    self.open_dialog(kind)?;
                }
            },

            Some(PanelMenu::Columns(menu)) => match menu.process_event(event) {
                MenuOutcome::Pending => {}
                MenuOutcome::Dismissed => self.menu = None,
                MenuOutcome::Triggered(column) => {
                    self.menu = None;
                    self.model.toggle_column(column);
                }
            },

            Some(PanelMenu::Context(menu)) => match menu.process_event(event) {
                MenuOutcome::Pending => {}
                MenuOutcome::Dismissed => self.menu = None,
                MenuOutcome::Triggered(action) => {
                    self.menu = None;
                    self.model.run_context_action(action);
                    self.tree.sync(self.model.rows());
                }
            },

            None => {}
        }

        Ok(())
    }

    fn process_search_key(&mut self, event: &Event, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = PanelFocus::Tree,
            _ => {
                let before = self.search.value().to_string();
                self.search.handle_event(event);
                if self.search.value() != before {
                    self.apply_filter();
                }
            }
        }
        true
    }

    fn process_tree_key(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::NONE) => self.popup_add(),
            (KeyCode::Char('s'), KeyModifiers::NONE) => self.toggle_random(),
            (KeyCode::Char('r'), KeyModifiers::NONE) => self.toggle_repeat(),
            (KeyCode::Char('o'), KeyModifiers::NONE) => self.goto_playing_item(),
            (KeyCode::Char('n'), KeyModifiers::NONE) => self.model.activate_next(),

            (KeyCode::Char('/'), _) => self.focus = PanelFocus::Search,
            (KeyCode::Char('c'), KeyModifiers::NONE) => self.clear_filter(),

            (KeyCode::Char('m'), KeyModifiers::NONE) => {
                let row = self.tree.cursor();
                let point = row
                    .and_then(|row| self.tree.row_position(row))
                    .unwrap_or(self.layout.tree.as_position());
                let index = row.and_then(|row| self.model.index(row));
                self.do_popup(index, point);
            }
            (KeyCode::Char('v'), KeyModifiers::NONE) => {
                self.popup_select_column(self.layout.tree.as_position());
            }

            _ => {
                if let Some(action) = self.tree.process_key(key, self.model.rows()) {
                    self.run_tree_action(action);
                }
            }
        }
        true
    }

    fn run_tree_action(&mut self, action: TreeAction) {
        match action {
            TreeAction::Activate(row) => self.activate_row(row),
            TreeAction::Expand(row) | TreeAction::Collapse(row) => {
                if let Some(index) = self.model.index(row) {
                    self.model.set_expanded(index, matches!(action, TreeAction::Expand(_)));
                    self.tree.sync(self.model.rows());
                }
            }
            TreeAction::DeleteSelection => self.delete_selection(),
        }
    }

    fn process_mouse(&mut self, mouse: &MouseEvent) -> Result<bool> {
        let position = Position::new(mouse.column, mouse.row);
        let len = self.model.rows().len();

        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered = self.layout.button_at(position);
            }

            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(button) = self.layout.button_at(position) {
                    self.click_button(button);
                } else if let Some(column) = self.tree.column_at(position) {
                    self.sort_by(column);
                } else if let Some(row) = self.tree.row_at(position, len) {
                    self.focus = PanelFocus::Tree;
                    self.click_row(row);
                } else {
                    return Ok(false);
                }
            }

            MouseEventKind::Down(MouseButton::Right) => {
                if self.tree.header_contains(position) {
                    self.popup_select_column(position);
                } else if let Some(row) = self.tree.row_at(position, len) {
                    self.tree.pick_row(row, self.model.rows());
                    self.do_popup(self.model.index(row), position);
                } else {
                    return Ok(false);
                }
            }

            MouseEventKind::Up(MouseButton::Left) => {
                let Some(from) = self.drag_from.take() else {
                    return Ok(false);
                };
                let target = self
                    .tree
                    .row_at(position, len)
                    .filter(|row| *row != from)
                    .and_then(|row| self.model.index(row));
                if let Some(target) = target {
                    let selection = self.tree.selected_indices(self.model.rows());
                    self.model.drop_items(&selection, target);
                    self.tree.sync(self.model.rows());
                }
            }

            MouseEventKind::ScrollDown => {
                self.process_tree_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
            }
            MouseEventKind::ScrollUp => {
                self.process_tree_key(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
            }

            _ => return Ok(false),
        }

        Ok(true)
    }

    fn click_button(&mut self, button: ToolbarButton) {
        match button {
            ToolbarButton::Add => self.popup_add(),
            ToolbarButton::Random => self.toggle_random(),
            ToolbarButton::Repeat => self.toggle_repeat(),
            ToolbarButton::Goto => self.goto_playing_item(),
            ToolbarButton::Filter => self.focus = PanelFocus::Search,
            ToolbarButton::Clear => self.clear_filter(),
        }
    }

    fn click_row(&mut self, row: usize) {
        let now = Instant::now();
        let double = self
            .last_click
            .is_some_and(|(last, at)| last == row && now.duration_since(at) <= DOUBLE_CLICK);

        // The pressed row becomes the drag payload unless it is already marked
        self.tree.pick_row(row, self.model.rows());

        if double {
            self.last_click = None;
            self.drag_from = None;
            self.activate_row(row);
        } else {
            self.last_click = Some((row, now));
            self.drag_from = Some(row);
        }
    }
}
