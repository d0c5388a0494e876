/*
generator.rs

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

//! Generate the color scheme and the layout of a board.
//!
//! [`levels::Level`] objects describe a difficulty level: the size of the board, which cells are
//! fixed, and how distinguishable the tile colors must be.
//! The list of levels is provided at built time.
//!
//! To play, a random game must be created.
//! A game is composed of two parts:
//!
//! * A random color gradient represented by a [`color_scheme::ColorScheme`] object.
//!   You create this object with [`color_scheme::ColorScheme::generate`], which keeps drawing
//!   random gradients until one of them is accepted by the level.
//!
//! * The list of the board cells represented by a [`layout::BoardLayout`] object.
//!   Each cell has a position, a position class (corner, side, or middle), and the color that
//!   the gradient gives at that position.
//!   The [`crate::board::PuzzleState`] object then shuffles the cells that are not fixed.

pub mod color_scheme;
pub mod layout;
pub mod levels;
