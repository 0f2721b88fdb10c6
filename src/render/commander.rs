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

//! Render the command-line interface.
//!
//! This module renders the visual representation of the command-line, the
//! current text and the cursor while it is open.

use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let line = area.inner(Margin::new(1, 0));

    let text = if commander.active() { format!(":{}", commander.input.value()) } else { String::new() };

    f.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(app.theme.commander_colour)
                .bg(app.theme.commander_bg),
        ),
        line,
    );

    if commander.active() {
        let cursor_x = line.x + 1 + commander.input.visual_cursor() as u16;
        f.set_cursor_position((cursor_x.min(line.right().saturating_sub(1)), line.y));
    }
}
