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

//! Input handling for the root selector.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Position;

use crate::{components::RootSelector, events::AppEvent};

impl RootSelector {
    /// Processes an input event, returning whether the selector consumed it.
    pub(crate) fn process_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        match event {
            Event::Key(key) if self.focused => {
                match key.code {
                    KeyCode::Char('j') | KeyCode::Down => self.next(),
                    KeyCode::Char('k') | KeyCode::Up => self.previous(),
                    KeyCode::Enter => self.choose(event_tx)?,
                    _ => return Ok(false),
                }
                Ok(true)
            }

            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let Some(row) = self.entry_at(Position::new(mouse.column, mouse.row)) else {
                    return Ok(false);
                };
                self.focused = true;
                self.state.select(Some(row));
                self.choose(event_tx)?;
                Ok(true)
            }

            _ => Ok(false),
        }
    }

    fn choose(&self, event_tx: &Sender<AppEvent>) -> Result<()> {
        if let Some(id) = self.selected_id() {
            event_tx.send(AppEvent::SelectRoot(id))?;
        }
        Ok(())
    }

    fn entry_at(&self, position: Position) -> Option<usize> {
        let inner = self.area.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(position) {
            return None;
        }
        let index = self.state.offset() + usize::from(position.y - inner.y);
        (index < self.entries.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::layout::Rect;

    use super::*;
    use crate::model::playlist::Playlist;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_selects_highlighted_root() {
        let roots = Playlist::new(true, true).roots();
        let mut selector = RootSelector::new(roots);
        let (tx, rx) = mpsc::channel();

        // Unfocused selectors ignore keys
        assert!(!selector.process_event(&key(KeyCode::Enter), &tx).unwrap());

        selector.set_focused(true);
        assert!(selector.process_event(&key(KeyCode::Down), &tx).unwrap());
        assert!(selector.process_event(&key(KeyCode::Enter), &tx).unwrap());

        assert!(matches!(rx.try_recv(), Ok(AppEvent::SelectRoot(id)) if Some(id) == roots.ml_category));
    }

    #[test]
    fn click_selects_root() {
        let roots = Playlist::new(true, true).roots();
        let mut selector = RootSelector::new(roots);
        selector.area = Rect::new(0, 0, 20, 6);
        let (tx, rx) = mpsc::channel();

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert!(selector.process_event(&click, &tx).unwrap());
        assert!(selector.is_focused());
        assert!(matches!(rx.try_recv(), Ok(AppEvent::SelectRoot(id)) if id == roots.local_category));
    }
}
