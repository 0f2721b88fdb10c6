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

//! UI rendering logic for the playlist panel.
//!
//! The tree fills a bordered block titled with the root node's name, with
//! the toolbar on the line below it. An open popup menu is drawn last, over
//! everything else.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    dialogs::DialogProvider,
    model::{MediaInfo, tree_model::PlaylistModel},
    theme::Theme,
};

use super::{PanelFocus, PanelMenu, PlaylistPanel, ToolbarButton};

const BUTTON_WIDTH: u16 = 3;

impl<M: PlaylistModel, D: DialogProvider> PlaylistPanel<M, D> {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [tree_area, toolbar_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let title = self
            .playlist
            .borrow()
            .media(self.model.root())
            .map(MediaInfo::display_title)
            .unwrap_or_default();

        let mut block_title = format!(" {} | {} items ", title, self.model.rows().len());
        if self.tree.marked_count() > 0 {
            block_title.push_str(&format!("| {} selected ", self.tree.marked_count()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
            .title(block_title);
        let inner = block.inner(tree_area);
        f.render_widget(block, tree_area);

        self.tree.draw(f, inner, &self.model, theme);
        self.layout.tree = inner;

        self.draw_toolbar(f, toolbar_area, theme);

        let bounds = f.area();
        match self.menu.as_mut() {
            Some(PanelMenu::Add(menu)) => menu.draw(f, bounds, theme),
            Some(PanelMenu::Columns(menu)) => menu.draw(f, bounds, theme),
            Some(PanelMenu::Context(menu)) => menu.draw(f, bounds, theme),
            None => {}
        }
    }

    fn draw_toolbar(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let buttons = [
            ToolbarButton::Add,
            ToolbarButton::Random,
            ToolbarButton::Repeat,
            ToolbarButton::Goto,
            ToolbarButton::Filter,
            ToolbarButton::Clear,
        ];

        let areas = Layout::horizontal(buttons.map(|button| match button {
            ToolbarButton::Filter => Constraint::Fill(1),
            _ => Constraint::Length(BUTTON_WIDTH),
        }))
        .split(area);

        self.layout.toolbar = buttons.iter().copied().zip(areas.iter().copied()).collect();

        for (button, button_area) in buttons.iter().zip(areas.iter()) {
            if *button == ToolbarButton::Filter {
                self.draw_filter(f, *button_area, theme);
                continue;
            }

            let mut style = match button {
                ToolbarButton::Add if !self.is_add_enabled() => {
                    Style::default().fg(theme.disabled_colour)
                }
                ToolbarButton::Random if self.random.flag() => {
                    Style::default().fg(theme.accent_colour)
                }
                _ => Style::default(),
            };
            if self.hovered == Some(*button) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            f.render_widget(
                Paragraph::new(self.face(*button).icon)
                    .alignment(Alignment::Center)
                    .style(style),
                *button_area,
            );
        }
    }

    fn draw_filter(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == PanelFocus::Search;

        let text = if self.filter_text().is_empty() && !focused {
            Span::styled("Filter", Style::default().fg(theme.disabled_colour))
        } else {
            Span::raw(self.filter_text())
        };

        let line = Line::from(vec![
            Span::styled("/", Style::default().fg(theme.accent_colour)),
            text,
        ]);
        f.render_widget(Paragraph::new(line).style(Style::default().bg(theme.menu_bg)), area);

        if focused {
            let x = area.x + 1 + self.search.visual_cursor() as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::{
        components::PlaylistPanel,
        model::{playlist::Playlist, tree_model::PlaylistModel},
        theme::Theme,
    };

    use super::super::tests::{RecordingDialogs, RecordingModel};

    fn render(panel: &mut PlaylistPanel<RecordingModel, RecordingDialogs>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.draw(f, area, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_header_rows_and_toolbar() {
        let playlist = Playlist::new(false, true).into_handle();
        let mut panel = PlaylistPanel::new(
            playlist,
            RecordingModel::with_leaves(2),
            RecordingDialogs::default(),
        );

        let screen = render(&mut panel);
        assert!(screen.contains("2 items"));
        assert!(screen.contains("Title"));
        assert!(screen.contains("Duration"));
        assert!(screen.contains("Title 101"));
        assert!(screen.contains("/Filter"));
        assert_eq!(panel.model().rows().len(), 2);
    }

    #[test]
    fn open_menu_is_drawn_on_top() {
        let playlist = Playlist::new(false, true).into_handle();
        let mut panel = PlaylistPanel::new(
            playlist,
            RecordingModel::with_leaves(2),
            RecordingDialogs::default(),
        );

        panel.popup_select_column(ratatui::layout::Position::new(5, 2));
        let screen = render(&mut panel);
        assert!(screen.contains("[x] Title"));
        assert!(screen.contains("[ ] Artist"));
    }
}
