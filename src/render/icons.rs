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

//! Unicode symbols for the TUI.
//!
//! Toolbar faces, tree glyphs and markers. These are chosen to render in
//! most terminal fonts without emoji presentation.

pub(crate) const ICON_PLAY: &str = "\u{25B6}";

// Tree
pub(crate) const ICON_NODE_OPEN: &str = "\u{25BE}";
pub(crate) const ICON_NODE_CLOSED: &str = "\u{25B8}";
pub(crate) const ICON_MARK: &str = "\u{2022}";
pub(crate) const ICON_SORT_ASC: &str = "\u{25B4}";
pub(crate) const ICON_SORT_DESC: &str = "\u{25BE}";

// Toolbar, with Variation Selector-15 forcing text presentation
pub(crate) const ICON_ADD: &str = "+";
pub(crate) const ICON_SHUFFLE_ON: &str = "\u{1F500}\u{FE0E}";
pub(crate) const ICON_SHUFFLE_OFF: &str = "\u{2192}";
pub(crate) const ICON_REPEAT_ONE: &str = "\u{1F502}\u{FE0E}";
pub(crate) const ICON_REPEAT_ALL: &str = "\u{1F501}\u{FE0E}";
pub(crate) const ICON_REPEAT_OFF: &str = "\u{21E5}";
pub(crate) const ICON_GOTO: &str = "\u{25CE}";
pub(crate) const ICON_CLEAR: &str = "\u{2715}";
