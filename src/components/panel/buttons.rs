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

//! Toolbar button states and faces.
//!
//! Toggle buttons are explicit state machines. Each state knows the model
//! flags it stands for and the face (icon and tooltip) it shows, so the
//! face can never drift from the flags it was derived from.

use crate::{
    dialogs::DialogKind,
    model::AddTarget,
    render::icons::{
        ICON_ADD, ICON_CLEAR, ICON_GOTO, ICON_REPEAT_ALL, ICON_REPEAT_OFF, ICON_REPEAT_ONE,
        ICON_SHUFFLE_OFF, ICON_SHUFFLE_ON,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ButtonFace {
    pub(crate) icon: &'static str,
    pub(crate) tooltip: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RepeatState {
    RepeatOne,
    LoopAll,
    Off,
}

impl RepeatState {
    /// Repeat wins over loop when a model has both set.
    pub(crate) const fn from_flags(repeat: bool, loop_all: bool) -> Self {
        match (repeat, loop_all) {
            (true, _) => RepeatState::RepeatOne,
            (false, true) => RepeatState::LoopAll,
            (false, false) => RepeatState::Off,
        }
    }

    pub(crate) const fn next(self) -> Self {
        match self {
            RepeatState::RepeatOne => RepeatState::LoopAll,
            RepeatState::LoopAll => RepeatState::Off,
            RepeatState::Off => RepeatState::RepeatOne,
        }
    }

    /// The `(repeat, loop)` model flags.
    pub(crate) const fn flags(self) -> (bool, bool) {
        match self {
            RepeatState::RepeatOne => (true, false),
            RepeatState::LoopAll => (false, true),
            RepeatState::Off => (false, false),
        }
    }

    pub(crate) const fn face(self) -> ButtonFace {
        match self {
            RepeatState::RepeatOne => ButtonFace { icon: ICON_REPEAT_ONE, tooltip: "Repeat one" },
            RepeatState::LoopAll => ButtonFace { icon: ICON_REPEAT_ALL, tooltip: "Repeat all" },
            RepeatState::Off => ButtonFace { icon: ICON_REPEAT_OFF, tooltip: "No repeat" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RandomState {
    On,
    Off,
}

impl RandomState {
    pub(crate) const fn from_flag(random: bool) -> Self {
        if random { RandomState::On } else { RandomState::Off }
    }

    pub(crate) const fn toggled(self) -> Self {
        match self {
            RandomState::On => RandomState::Off,
            RandomState::Off => RandomState::On,
        }
    }

    pub(crate) const fn flag(self) -> bool {
        matches!(self, RandomState::On)
    }

    pub(crate) const fn face(self) -> ButtonFace {
        match self {
            RandomState::On => ButtonFace { icon: ICON_SHUFFLE_ON, tooltip: "Random" },
            RandomState::Off => ButtonFace { icon: ICON_SHUFFLE_OFF, tooltip: "No random" },
        }
    }
}

pub(crate) const fn add_face(target: Option<AddTarget>) -> ButtonFace {
    match target {
        Some(AddTarget::MediaLibrary) => ButtonFace { icon: ICON_ADD, tooltip: "Add to media library" },
        _ => ButtonFace { icon: ICON_ADD, tooltip: "Add to playlist" },
    }
}

pub(crate) const GOTO_FACE: ButtonFace = ButtonFace { icon: ICON_GOTO, tooltip: "Show the current item" };

pub(crate) const CLEAR_FACE: ButtonFace = ButtonFace { icon: ICON_CLEAR, tooltip: "Clear" };

/// Entries of the add menu, in display order.
pub(crate) const ADD_MENU: [(&str, DialogKind); 3] = [
    ("Add File...", DialogKind::SimpleAppend),
    ("Advanced Open...", DialogKind::AdvancedAppend),
    ("Add Directory...", DialogKind::AppendDirectory),
];

/// Clickable toolbar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToolbarButton {
    Add,
    Random,
    Repeat,
    Goto,
    Filter,
    Clear,
}
