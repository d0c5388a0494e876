/*
board.rs

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

//! Manage the position of the tiles on the board.
//!
//! Each cell of the [`BoardLayout`] becomes a tile. Tiles keep the identifier and the color of
//! the cell they were created from, and the [`PuzzleState`] object tracks where each tile
//! currently is. The fixed tiles never move, the movable tiles are shuffled when the board is
//! built and then exchanged by the player two at a time.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::generator::color_scheme::Rgb;
use crate::generator::layout::{BoardLayout, HexCoordinate, PositionClass};
use crate::generator::levels::Level;

/// Tile identifier.
///
/// The identifier is the position of the tile when the puzzle is solved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub HexCoordinate);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "hexagon_{}_{}", self.0.x, self.0.y)
    }
}

/// Tile details that do not change during the game.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tile {
    /// Tile identifier.
    pub id: TileId,

    /// Position class of the cell the tile belongs to.
    pub class: PositionClass,

    /// Tile color.
    pub color: Rgb,

    /// Whether the player can move the tile.
    pub movable: bool,
}

/// Current and expected positions of a tile.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileLocation {
    /// Where the tile is now.
    pub current: HexCoordinate,

    /// Where the tile is when the puzzle is solved.
    pub correct: HexCoordinate,
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum SwapError {
    /// No tile with that identifier.
    UnknownTile(TileId),

    /// The tile cannot be moved.
    FixedTile(TileId),
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SwapError::UnknownTile(id) => write!(f, "no tile {id} on the board"),
            SwapError::FixedTile(id) => write!(f, "tile {id} is fixed"),
        }
    }
}

impl Error for SwapError {}

/// Tiles and their positions.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    /// Fixed tiles first, then the movable tiles, each group in the layout order.
    tiles: Vec<Tile>,

    /// Positions of the tiles indexed by the tile identifiers.
    locations: HashMap<TileId, TileLocation>,

    /// Number of swaps performed since the board was built.
    swaps: usize,
}

impl PuzzleState {
    /// Create a [`PuzzleState`] object with the movable tiles shuffled.
    pub fn build<R: Rng + ?Sized>(layout: &BoardLayout, level: &Level, rng: &mut R) -> Self {
        let mut state: PuzzleState = Self::unshuffled(layout, level);

        let mut positions: Vec<HexCoordinate> = state
            .tiles
            .iter()
            .filter(|t| t.movable)
            .map(|t| t.id.0)
            .collect();
        positions.shuffle(rng);

        let movable: Vec<TileId> = state
            .tiles
            .iter()
            .filter(|t| t.movable)
            .map(|t| t.id)
            .collect();
        for (id, position) in movable.iter().zip(positions) {
            if let Some(location) = state.locations.get_mut(id) {
                location.current = position;
            }
        }
        debug!(
            "Board built: {} tiles, {} movable, {} misplaced",
            state.tiles.len(),
            movable.len(),
            state.misplaced()
        );
        state
    }

    /// Create a [`PuzzleState`] object with all the tiles at their correct position.
    pub fn unshuffled(layout: &BoardLayout, level: &Level) -> Self {
        let (fixed, movable): (Vec<Tile>, Vec<Tile>) = layout
            .cells
            .iter()
            .map(|cell| Tile {
                id: TileId(cell.position),
                class: cell.class,
                color: cell.color,
                movable: !level.is_fixed(cell.class),
            })
            .partition(|t| !t.movable);

        let tiles: Vec<Tile> = fixed.into_iter().chain(movable).collect();
        let locations: HashMap<TileId, TileLocation> = tiles
            .iter()
            .map(|t| {
                (
                    t.id,
                    TileLocation {
                        current: t.id.0,
                        correct: t.id.0,
                    },
                )
            })
            .collect();
        Self {
            tiles,
            locations,
            swaps: 0,
        }
    }

    /// Return the tiles, fixed tiles first.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Return the tile with the given identifier.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Return the positions of the given tile.
    pub fn location(&self, id: TileId) -> Option<&TileLocation> {
        self.locations.get(&id)
    }

    /// Return the identifier of the tile currently at the given position.
    pub fn tile_at(&self, position: HexCoordinate) -> Option<TileId> {
        self.locations
            .iter()
            .find(|(_, l)| l.current == position)
            .map(|(id, _)| *id)
    }

    /// Whether the given tile can be moved.
    pub fn is_movable(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(|t| t.movable)
    }

    /// Number of tiles that the player can move.
    pub fn movable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.movable).count()
    }

    /// Number of swaps performed since the board was built.
    pub fn swap_count(&self) -> usize {
        self.swaps
    }

    /// Number of tiles that are not at their correct position.
    pub fn misplaced(&self) -> usize {
        self.locations
            .values()
            .filter(|l| l.current != l.correct)
            .count()
    }

    /// Exchange the current positions of two tiles.
    ///
    /// Swapping a tile with itself does nothing.
    ///
    /// # Errors
    ///
    /// The method returns an error, and leaves the board unchanged, if one of the tiles does not
    /// exist or is fixed.
    pub fn swap(&mut self, a: TileId, b: TileId) -> Result<(), SwapError> {
        for id in [a, b] {
            match self.tile(id) {
                None => return Err(SwapError::UnknownTile(id)),
                Some(t) if !t.movable => return Err(SwapError::FixedTile(id)),
                Some(_) => (),
            }
        }
        if a == b {
            return Ok(());
        }

        let (current_a, current_b) = match (self.locations.get(&a), self.locations.get(&b)) {
            (Some(la), Some(lb)) => (la.current, lb.current),
            (None, _) => return Err(SwapError::UnknownTile(a)),
            (_, None) => return Err(SwapError::UnknownTile(b)),
        };
        if let Some(l) = self.locations.get_mut(&a) {
            l.current = current_b;
        }
        if let Some(l) = self.locations.get_mut(&b) {
            l.current = current_a;
        }
        self.swaps += 1;
        debug!("Swapped {a} ({current_a}) and {b} ({current_b})");
        Ok(())
    }

    /// Whether every tile is at its correct position.
    pub fn is_solved(&self) -> bool {
        self.locations.values().all(|l| l.current == l.correct)
    }
}
