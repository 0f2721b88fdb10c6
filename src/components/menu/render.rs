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

//! Popup menu rendering.
//!
//! The menu is drawn over whatever is below it, anchored at its position and
//! pushed back inside the bounds when it would overflow them.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use crate::{components::PopupMenu, theme::Theme};

impl<A> PopupMenu<A> {
    pub(crate) fn draw(&mut self, f: &mut Frame, bounds: Rect, theme: &Theme) {
        let checkable = self.entries.iter().any(|e| e.checked.is_some());
        let label_width = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);

        let width = (label_width + if checkable { 4 } else { 0 } + 4) as u16;
        let height = self.entries.len() as u16 + 2;

        let width = width.min(bounds.width);
        let height = height.min(bounds.height);
        let x = self.position.x.min(bounds.right().saturating_sub(width)).max(bounds.x);
        let y = self.position.y.min(bounds.bottom().saturating_sub(height)).max(bounds.y);
        let area = Rect::new(x, y, width, height);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let text = match entry.checked {
                    Some(true) => format!(" [x] {}", entry.label),
                    Some(false) => format!(" [ ] {}", entry.label),
                    None if checkable => format!("     {}", entry.label),
                    None => format!(" {}", entry.label),
                };
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent_colour))
                    .style(Style::default().bg(theme.menu_bg)),
            )
            .highlight_style(Style::default().bg(theme.accent_colour).fg(Color::Black));

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut self.state);
        self.area = area;
    }
}
