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

//! Application configuration.
//!
//! This module manages the application configuration file, stored with
//! `confy`, and the location of the log file written next to it. Missing
//! fields take their defaults, so older files keep loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{Column, ColumnSet};

const CONFIG_NAME: &str = "plview";

const LOG_FILE: &str = "plview.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// Directories scanned at startup.
    pub(crate) media_dirs: Vec<String>,
    /// Whether the media library nodes exist.
    pub(crate) media_library: bool,
    /// Show nodes in their tree rather than their flat representation.
    pub(crate) prefer_tree: bool,
    pub(crate) random: bool,
    pub(crate) repeat: bool,
    pub(crate) loop_all: bool,
    pub(crate) columns: Vec<Column>,
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: vec![],
            media_library: true,
            prefer_tree: true,
            random: false,
            repeat: false,
            loop_all: false,
            columns: vec![Column::Title, Column::Duration, Column::Artist, Column::Album],
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn shown_columns(&self) -> ColumnSet {
        self.columns.iter().copied().collect()
    }

    pub(crate) fn set_shown_columns(&mut self, shown: ColumnSet) {
        self.columns = shown.iter().collect();
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// The log file, in the configuration directory.
pub(crate) fn log_file_path() -> Option<PathBuf> {
    let config_file = confy::get_configuration_file_path(CONFIG_NAME, None).ok()?;
    Some(config_file.parent()?.join(LOG_FILE))
}
