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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. The components draw themselves;
//! this module partitions the screen between them and draws the status
//! line.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every handled event.

mod commander;
pub(crate) mod icons;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, render::commander::draw_commander};

const SIDEBAR_WIDTH: u16 = 20;

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the root selector sidebar and the playlist panel,
/// with the status line and the command line below them.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let [main, status, command] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let [sidebar, content] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(main);

    app.selector.draw(f, sidebar, &app.theme);
    draw_status(f, status, app);
    draw_commander(f, command, app);

    // Last, so an open menu is drawn over everything else
    app.panel.draw(f, content, &app.theme);
}

/// The hovered button's tooltip wins over the last status message.
fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let text = app
        .panel
        .hovered_tooltip()
        .or(app.status.as_deref())
        .unwrap_or_default();

    f.render_widget(
        Paragraph::new(format!(" {}", text)).style(Style::default().fg(app.theme.status_colour)),
        area,
    );
}
