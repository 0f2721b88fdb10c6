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

//! Routing of terminal input.
//!
//! The command line sees keys first while it is open or when `:` opens it,
//! unless the panel's filter box or a menu is taking input. Then come the
//! few global keys. The rest goes to whichever of the root selector and the
//! playlist panel has focus. Mouse events go to the component under the
//! pointer.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::{App, components::PanelFocus, events::AppEvent};

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);

    let panel_captures = !app.selector.is_focused()
        && (app.panel.has_menu() || app.panel.focus() == PanelFocus::Search);

    if (app.commander.active() || !panel_captures) && app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if !panel_captures && process_global_key_event(app, key)? {
        return Ok(());
    }

    if app.selector.is_focused() {
        app.selector.process_event(&event, &app.event_tx)?;
    } else {
        app.panel.process_event(&event)?;
    }

    Ok(())
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab | KeyCode::BackTab => {
            let focused = !app.selector.is_focused();
            app.selector.set_focused(focused);
        }

        _ => return Ok(false),
    }

    Ok(true)
}

pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let event = Event::Mouse(mouse);

    if !app.panel.has_menu() && app.selector.process_event(&event, &app.event_tx)? {
        if app.selector.is_focused() {
            app.panel.focus_tree();
        }
        return Ok(());
    }

    if app.panel.process_event(&event)? && matches!(mouse.kind, MouseEventKind::Down(_)) {
        app.selector.set_focused(false);
    }

    Ok(())
}
