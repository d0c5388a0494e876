/*
levels.rs

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

//! Difficulty levels.
//!
//! A level sets the board size, the position classes of the fixed tiles, and the rule that a
//! random color scheme must satisfy to be used for the board.
//! Higher levels do not only use larger boards: the Extreme level requires a subtle gradient so
//! that neighboring tiles are hard to tell apart.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use strum_macros::FromRepr;

use super::layout::PositionClass;

/// Level difficulty.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash, FromRepr, Default,
)]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Extreme => write!(f, "Extreme"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = LevelError;

    /// Convert a level name, such as `Easy` or `extreme`, into a [`Difficulty`].
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .find(|d| d.to_string().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| LevelError::UnknownLevel(name.to_string()))
    }
}

impl Difficulty {
    /// Iterate over all the difficulties, from the easiest to the hardest.
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (0..).map_while(Difficulty::from_repr)
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum LevelError {
    /// No level with that name.
    UnknownLevel(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::UnknownLevel(name) => write!(f, "unknown level \"{name}\""),
        }
    }
}

impl Error for LevelError {}

/// Acceptance rule for the separation score of a color scheme.
///
/// See [`super::color_scheme::ColorScheme::score`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorDiffRule {
    /// The score must be at least `min`.
    AtLeast { min: f64 },

    /// The score must be in the `[min, max)` range.
    InRange { min: f64, max: f64 },
}

impl ColorDiffRule {
    /// Whether the given score satisfies the rule.
    pub fn accepts(&self, score: f64) -> bool {
        match *self {
            ColorDiffRule::AtLeast { min } => score >= min,
            ColorDiffRule::InRange { min, max } => min <= score && score < max,
        }
    }
}

/// Level parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Difficulty, which is also the level name.
    pub difficulty: Difficulty,

    /// Number of cells from the center to a corner of the board, center included.
    pub board_size: usize,

    /// Position classes of the tiles that cannot be moved.
    pub fixed_types: Vec<PositionClass>,

    /// Rule that the color scheme must satisfy.
    pub color_rule: ColorDiffRule,

    /// Whether to discard color schemes where two channels vary in opposite directions.
    /// Such schemes produce harsh green/magenta transitions, and get a low score when the two
    /// gradients are parallel.
    pub reject_clashes: bool,
}

impl Default for Level {
    fn default() -> Self {
        Level::get(Difficulty::default())
    }
}

impl Level {
    /// Return the [`Level`] object for the given difficulty.
    pub fn get(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                board_size: 3,
                fixed_types: vec![PositionClass::Corner, PositionClass::Side],
                color_rule: ColorDiffRule::AtLeast { min: 0.1 },
                reject_clashes: false,
            },
            Difficulty::Medium => Self {
                difficulty,
                board_size: 4,
                fixed_types: vec![PositionClass::Corner, PositionClass::Side],
                color_rule: ColorDiffRule::AtLeast { min: 0.1 },
                reject_clashes: false,
            },
            Difficulty::Hard => Self {
                difficulty,
                board_size: 4,
                fixed_types: vec![PositionClass::Corner],
                color_rule: ColorDiffRule::AtLeast { min: 0.08 },
                reject_clashes: false,
            },
            Difficulty::Extreme => Self {
                difficulty,
                board_size: 4,
                fixed_types: vec![PositionClass::Corner],
                color_rule: ColorDiffRule::InRange {
                    min: 0.015,
                    max: 0.025,
                },
                reject_clashes: true,
            },
        }
    }

    /// Level name.
    pub fn name(&self) -> String {
        self.difficulty.to_string()
    }

    /// Whether the separation score of a color scheme is acceptable for the level.
    pub fn valid_color_diff(&self, score: f64) -> bool {
        self.color_rule.accepts(score)
    }

    /// Whether tiles of the given position class are fixed.
    pub fn is_fixed(&self, class: PositionClass) -> bool {
        self.fixed_types.contains(&class)
    }
}
