/*
settings.rs

Copyright 2025 Hervé Quatremain

This file is part of Hue More.

Hue More is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hue More is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hue More. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! User preferences.
//!
//! The settings are read when a game starts and every time the player changes them.
//! See the [`crate::saver::settings`] module that saves and restores the [`Settings`] object.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::generator::levels::{Difficulty, Level, LevelError};

/// Color theme of the interface.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// User preferences.
///
/// Missing entries in a saved file take their default value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Selected level.
    level: Difficulty,

    /// Whether to draw a mark on the fixed tiles.
    mark_fixed: bool,

    /// Color theme.
    theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create a [`Settings`] object with the default preferences.
    pub fn new() -> Self {
        Self {
            level: Difficulty::Easy,
            mark_fixed: true,
            theme: Theme::Light,
        }
    }

    /// Return the selected level.
    pub fn level(&self) -> Level {
        Level::get(self.level)
    }

    /// Select the level with the given name.
    ///
    /// # Errors
    ///
    /// The method returns an error, and keeps the previous level, if no level has that name.
    pub fn set_level(&mut self, name: &str) -> Result<(), LevelError> {
        self.level = name.parse::<Difficulty>()?;
        debug!("Level set to {}", self.level);
        Ok(())
    }

    /// Whether to draw a mark on the fixed tiles.
    pub fn mark_fixed(&self) -> bool {
        self.mark_fixed
    }

    /// Set whether to draw a mark on the fixed tiles.
    pub fn set_mark_fixed(&mut self, mark_fixed: bool) {
        self.mark_fixed = mark_fixed;
    }

    /// Return the color theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set the color theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings: Settings = Settings::default();
        assert_eq!(settings.level().difficulty, Difficulty::Easy);
        assert!(settings.mark_fixed());
        assert_eq!(settings.theme(), Theme::Light);
    }

    #[test]
    fn unknown_level_keeps_the_previous_one() {
        let mut settings: Settings = Settings::new();
        settings.set_level("Hard").unwrap();
        assert_eq!(
            settings.set_level("Nightmare"),
            Err(LevelError::UnknownLevel("Nightmare".to_string()))
        );
        assert_eq!(settings.level().difficulty, Difficulty::Hard);
    }

    #[test]
    fn missing_entries_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.level().difficulty, Difficulty::Easy);
        assert!(settings.mark_fixed());
        assert_eq!(settings.theme(), Theme::Dark);

        let empty: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Settings::default());
    }
}
