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

//! Input handling for popup menus.

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Position;

use crate::components::{MenuOutcome, PopupMenu};

impl<A: Clone> PopupMenu<A> {
    pub(crate) fn process_event(&mut self, event: &Event) -> MenuOutcome<A> {
        match event {
            Event::Key(key_event) => match key_event.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.goto_next();
                    MenuOutcome::Pending
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.goto_previous();
                    MenuOutcome::Pending
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.trigger_selected(),
                KeyCode::Esc | KeyCode::Char('q') => MenuOutcome::Dismissed,
                _ => MenuOutcome::Pending,
            },

            Event::Mouse(mouse) => {
                let position = Position::new(mouse.column, mouse.row);
                let entry = self.entry_at(position);

                match mouse.kind {
                    MouseEventKind::Moved => {
                        if entry.is_some() {
                            self.state.select(entry);
                        }
                        MenuOutcome::Pending
                    }
                    MouseEventKind::Down(MouseButton::Left) => match entry {
                        Some(i) => {
                            self.state.select(Some(i));
                            self.trigger_selected()
                        }
                        None if self.area.contains(position) => MenuOutcome::Pending,
                        None => MenuOutcome::Dismissed,
                    },
                    MouseEventKind::Down(_) if !self.area.contains(position) => {
                        MenuOutcome::Dismissed
                    }
                    _ => MenuOutcome::Pending,
                }
            }

            _ => MenuOutcome::Pending,
        }
    }

    fn trigger_selected(&self) -> MenuOutcome<A> {
        self.state
            .selected()
            .and_then(|i| self.entries.get(i))
            .map_or(MenuOutcome::Dismissed, |entry| {
                MenuOutcome::Triggered(entry.action.clone())
            })
    }

    /// Entry under a screen position, using the area of the last draw.
    fn entry_at(&self, position: Position) -> Option<usize> {
        let inner = self.area.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(position) {
            return None;
        }
        let index = self.state.offset() + usize::from(position.y - inner.y);
        (index < self.entries.len()).then_some(index)
    }
}
