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

//! Command-line input logic and state management.
//!
//! This module implements a command-line component: a text input that is
//! opened with `:` (or prefilled by an add dialog request), parsed into a
//! [`Command`] when submitted, and dispatched to the application as an
//! event.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use log::debug;
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    dialogs::DialogKind,
    events::AppEvent,
    model::{AddTarget, ItemId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    SaveConfig,
    SetRoot(ItemId),
    Remove(ItemId),
    Filter(String),
    ToggleRandom,
    ToggleRepeat,
    Add {
        kind: DialogKind,
        target: AddTarget,
        location: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for {0}")]
    MissingArgument(String),
    #[error("Not an item id: {0}")]
    InvalidId(String),
}

impl Command {
    /// Parses a command line. A blank line is no command.
    pub(crate) fn parse(buffer: &str) -> Result<Option<Command>, CommandError> {
        let buffer = buffer.trim();
        let (name, rest) = buffer
            .split_once(char::is_whitespace)
            .map_or((buffer, ""), |(name, rest)| (name, rest.trim()));

        let command = match name {
            "" => return Ok(None),

            "q" => Command::Quit,
            "w" => Command::SaveConfig,
            "random" => Command::ToggleRandom,
            "repeat" => Command::ToggleRepeat,

            "root" => Command::SetRoot(parse_id(name, rest)?),
            "rm" => Command::Remove(parse_id(name, rest)?),

            "filter" => Command::Filter(rest.to_string()),

            "add" => add(name, DialogKind::SimpleAppend, AddTarget::Playlist, rest)?,
            "mladd" => add(name, DialogKind::SimpleAppend, AddTarget::MediaLibrary, rest)?,
            "open" => add(name, DialogKind::AdvancedAppend, AddTarget::Playlist, rest)?,
            "mlopen" => add(name, DialogKind::AdvancedAppend, AddTarget::MediaLibrary, rest)?,
            "adddir" => add(name, DialogKind::AppendDirectory, AddTarget::Playlist, rest)?,
            "mladddir" => add(name, DialogKind::AppendDirectory, AddTarget::MediaLibrary, rest)?,

            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(name: &str, arg: &str) -> Result<ItemId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(name.to_string()));
    }
    arg.parse()
        .map(ItemId)
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

fn add(name: &str, kind: DialogKind, target: AddTarget, location: &str) -> Result<Command, CommandError> {
    if location.is_empty() {
        return Err(CommandError::MissingArgument(name.to_string()));
    }
    Ok(Command::Add {
        kind,
        target,
        location: location.to_string(),
    })
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Opens the command line with `text` already typed in.
    pub(crate) fn open_with(&mut self, text: &str) {
        self.active = true;
        self.input = Input::new(text.to_string());
    }

    /// Processes an input event, returning whether the command line consumed
    /// it. Submitted commands are sent as [`AppEvent::Command`], parse
    /// failures as a status message.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => self.close(),

            KeyCode::Enter => {
                let buffer = self.input.value().to_string();
                self.close();

                debug!("Running command {:?}", buffer);
                match Command::parse(&buffer) {
                    Ok(Some(command)) => event_tx.send(AppEvent::Command(command))?,
                    Ok(None) => {}
                    Err(e) => event_tx.send(AppEvent::Status(e.to_string()))?,
                }
            }

            // Delegate all other key events to the managed input component
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }

    fn close(&mut self) {
        self.active = false;
        self.input.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("w"), Ok(Some(Command::SaveConfig)));
        assert_eq!(Command::parse("random"), Ok(Some(Command::ToggleRandom)));
        assert_eq!(Command::parse("root 12"), Ok(Some(Command::SetRoot(ItemId(12)))));
        assert_eq!(Command::parse("rm 3"), Ok(Some(Command::Remove(ItemId(3)))));
    }

    #[test]
    fn filter_keeps_inner_spaces_and_may_be_empty() {
        assert_eq!(
            Command::parse("filter  boards of canada "),
            Ok(Some(Command::Filter("boards of canada".into())))
        );
        assert_eq!(Command::parse("filter"), Ok(Some(Command::Filter(String::new()))));
    }

    #[test]
    fn add_commands_carry_target_and_location() {
        assert_eq!(
            Command::parse("mladddir /music/Some Album"),
            Ok(Some(Command::Add {
                kind: DialogKind::AppendDirectory,
                target: AddTarget::MediaLibrary,
                location: "/music/Some Album".into(),
            }))
        );
        assert_eq!(Command::parse("add"), Err(CommandError::MissingArgument("add".into())));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("root x"), Err(CommandError::InvalidId("x".into())));
        assert_eq!(Command::parse("root"), Err(CommandError::MissingArgument("root".into())));
        assert_eq!(Command::parse("dance"), Err(CommandError::Unknown("dance".into())));
    }

    #[test]
    fn submit_sends_command_and_closes() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('x')), &tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx).unwrap());
        assert!(commander.active());

        commander.handle_event(&key(KeyCode::Char('q')), &tx).unwrap();
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();

        assert!(!commander.active());
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Command(Command::Quit))));
    }

    #[test]
    fn parse_errors_become_status() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.open_with("root nope");
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();

        assert!(matches!(rx.try_recv(), Ok(AppEvent::Status(s)) if s == "Not an item id: nope"));
    }
}
