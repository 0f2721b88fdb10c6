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

//! Modal popup menus.
//!
//! A [`PopupMenu`] is a list of entries, each carrying the action it stands
//! for, anchored at a screen position. While a menu is open its owner routes
//! every input event to it until it reports a [`MenuOutcome`] other than
//! `Pending`.

mod event;
mod render;

use ratatui::{
    layout::{Position, Rect},
    widgets::ListState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuEntry<A> {
    pub(crate) label: String,
    pub(crate) action: A,
    /// `Some` for checkable entries.
    pub(crate) checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuOutcome<A> {
    Pending,
    Triggered(A),
    Dismissed,
}

#[derive(Debug)]
pub(crate) struct PopupMenu<A> {
    position: Position,
    entries: Vec<MenuEntry<A>>,
    state: ListState,
    area: Rect,
}

impl<A> PopupMenu<A> {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            position,
            entries: vec![],
            state: ListState::default(),
            area: Rect::default(),
        }
    }

    pub(crate) fn with_entry(mut self, label: impl Into<String>, action: A) -> Self {
        self.push(label.into(), action, None);
        self
    }

    pub(crate) fn with_checkable(mut self, label: impl Into<String>, action: A, checked: bool) -> Self {
        self.push(label.into(), action, Some(checked));
        self
    }

    fn push(&mut self, label: String, action: A, checked: Option<bool>) {
        self.entries.push(MenuEntry { label, action, checked });
        if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[MenuEntry<A>] {
        &self.entries
    }

    #[cfg(test)]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn goto_next(&mut self) {
        let len = self.entries.len();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.entries.len();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn menu() -> PopupMenu<u8> {
        PopupMenu::new(Position::new(3, 4))
            .with_entry("one", 1)
            .with_checkable("two", 2, true)
            .with_entry("three", 3)
    }

    #[test]
    fn first_entry_is_selected() {
        let menu = menu();
        assert_eq!(menu.selected(), Some(0));
        assert_eq!(menu.entries()[1].checked, Some(true));
        assert_eq!(menu.entries()[0].checked, None);
    }

    #[test]
    fn navigation_wraps_and_enter_triggers() {
        let mut menu = menu();
        assert_eq!(menu.process_event(&key(KeyCode::Up)), MenuOutcome::Pending);
        assert_eq!(menu.selected(), Some(2));
        assert_eq!(menu.process_event(&key(KeyCode::Char('j'))), MenuOutcome::Pending);
        assert_eq!(menu.process_event(&key(KeyCode::Down)), MenuOutcome::Pending);
        assert_eq!(menu.process_event(&key(KeyCode::Enter)), MenuOutcome::Triggered(2));
    }

    #[test]
    fn escape_dismisses() {
        let mut menu = menu();
        assert_eq!(menu.process_event(&key(KeyCode::Esc)), MenuOutcome::Dismissed);
    }

    #[test]
    fn click_in_scrolled_menu_hits_visible_entry() {
        use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
        use ratatui::{Terminal, backend::TestBackend};

        use crate::theme::Theme;

        let mut menu = (0..6u8).fold(PopupMenu::new(Position::ORIGIN), |menu, i| {
            menu.with_entry(format!("entry {}", i), i)
        });
        // Select the last entry so the list scrolls within three visible rows
        menu.process_event(&key(KeyCode::Up));

        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let bounds = f.area();
                menu.draw(f, bounds, &theme);
            })
            .unwrap();

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(menu.process_event(&click), MenuOutcome::Triggered(3));
    }

    #[test]
    fn empty_menu_dismisses_on_trigger() {
        let mut menu: PopupMenu<u8> = PopupMenu::new(Position::ORIGIN);
        assert!(menu.is_empty());
        assert_eq!(menu.process_event(&key(KeyCode::Enter)), MenuOutcome::Dismissed);
    }
}
