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

//! UI rendering logic for the tree view.
//!
//! This module handles the visual representation of the model rows,
//! including indentation of nested rows, the now-playing and selection
//! markers, the column layout of the shown columns and the sort indicator in
//! the header. The geometry of each draw is kept for mouse hit-testing.

use std::iter;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Cell, Row, Table},
};

use crate::{
    components::TreeView,
    model::{
        Column, SortOrder,
        tree_model::{ModelIndex, PlaylistModel, RowKind},
    },
    render::icons::{ICON_MARK, ICON_NODE_CLOSED, ICON_NODE_OPEN, ICON_PLAY, ICON_SORT_ASC, ICON_SORT_DESC},
    theme::Theme,
};

use super::TreeLayout;

const COLUMN_SPACING: u16 = 1;

fn column_constraint(column: Column) -> Constraint {
    match column {
        Column::Number => Constraint::Length(4),
        Column::Title => Constraint::Fill(3),
        Column::Duration => Constraint::Length(8),
        Column::Artist => Constraint::Fill(2),
        Column::Genre => Constraint::Fill(1),
        Column::Album => Constraint::Fill(2),
        Column::TrackNumber => Constraint::Length(5),
        Column::Description => Constraint::Fill(2),
    }
}

fn column_style(column: Column, theme: &Theme) -> Style {
    let fg = match column {
        Column::Number | Column::TrackNumber => theme.table_track_number_fg,
        Column::Title => theme.table_track_fg,
        Column::Duration => theme.table_time_fg,
        Column::Artist => theme.table_artist_fg,
        Column::Genre | Column::Description => theme.table_genre_fg,
        Column::Album => theme.table_album_fg,
    };
    Style::default().fg(fg)
}

fn column_alignment(column: Column) -> Alignment {
    match column {
        Column::Number | Column::Duration | Column::TrackNumber => Alignment::Right,
        _ => Alignment::Left,
    }
}

impl TreeView {
    pub(crate) fn draw<M: PlaylistModel>(&mut self, f: &mut Frame, area: Rect, model: &M, theme: &Theme) {
        let shown: Vec<Column> = model.shown_columns().iter().collect();

        let widths: Vec<Constraint> = iter::once(Constraint::Length(1))
            .chain(shown.iter().map(|c| column_constraint(*c)))
            .collect();

        let sort = model.sort_state();
        let header_cells = iter::once(Cell::from("")).chain(shown.iter().map(|column| {
            let title = match sort {
                Some((sorted, SortOrder::Ascending)) if sorted == *column => {
                    format!("{} {}", column.title(), ICON_SORT_ASC)
                }
                Some((sorted, SortOrder::Descending)) if sorted == *column => {
                    format!("{} {}", column.title(), ICON_SORT_DESC)
                }
                _ => column.title().to_string(),
            };
            Cell::from(Line::from(title).alignment(column_alignment(*column)))
        }));

        let rows = model.rows().iter().enumerate().map(|(row, view_row)| {
            let index = ModelIndex { row, id: view_row.id };
            let playing = model.is_current(index);

            let marker = if playing {
                Line::from(ICON_PLAY).style(Style::default().fg(theme.accent_colour))
            } else if self.is_marked(view_row.id) {
                Line::from(ICON_MARK).style(Style::default().fg(Color::Black).bg(theme.accent_colour))
            } else {
                Line::from("")
            };

            let cells = shown.iter().enumerate().map(|(i, column)| {
                let mut text = model.data(index, *column);
                if i == 0 {
                    let glyph = match view_row.kind {
                        RowKind::Node { expanded: true } => ICON_NODE_OPEN,
                        RowKind::Node { expanded: false } => ICON_NODE_CLOSED,
                        RowKind::Leaf => " ",
                    };
                    text = format!("{}{} {}", "  ".repeat(view_row.depth), glyph, text);
                }
                Cell::from(
                    Line::from(text)
                        .style(column_style(*column, theme))
                        .alignment(if i == 0 { Alignment::Left } else { column_alignment(*column) }),
                )
            });

            let style = match view_row.kind {
                _ if playing => Style::default().add_modifier(Modifier::BOLD),
                RowKind::Node { .. } => Style::default().fg(theme.table_node_fg),
                RowKind::Leaf => Style::default(),
            };

            Row::new(iter::once(Cell::from(marker)).chain(cells)).style(style)
        });

        let table = Table::new(rows, widths.clone())
            .header(Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD).fg(theme.accent_colour)))
            .flex(Flex::Start)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

        f.render_stateful_widget(table, area, &mut self.table_state);

        let header = Rect { height: area.height.min(1), ..area };
        let body = Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        };
        let spans = Layout::horizontal(widths)
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .split(area);

        self.layout = TreeLayout {
            header,
            body,
            columns: shown.iter().copied().zip(spans.iter().skip(1).copied()).collect(),
        };
    }
}
