/*
geometry.rs

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

//! Convert board coordinates to pixel coordinates and back.
//!
//! Tiles are pointy-top hexagons. With `size` being the half-width of a hexagon, two neighbors
//! in the same row are `2 * size` apart and two rows are `√3 * size` apart, which matches the
//! `(x, y)` addressing of [`crate::generator::layout`] where columns step by two.

use log::{Level, debug, log_enabled};

use crate::board::{PuzzleState, TileId};
use crate::generator::layout::HexCoordinate;

const SQRT_3: f64 = 1.732_050_807_568_877_2_f64;
const TWO_DIV_SQRT_3: f64 = 1.154_700_538_379_251_7_f64;

// Space around the board, in hexagon half-widths.
const MARGIN: f64 = 0.2;

/// Pixel coordinates in the viewport.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] object.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placement of the board in the viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoardGeometry {
    /// Board size (see [`crate::generator::levels::Level::board_size`]).
    board_size: usize,

    /// Viewport width in pixels.
    width: f64,

    /// Viewport height in pixels.
    height: f64,

    /// Half-width of a hexagon in pixels.
    hexagon_size: f64,
}

impl BoardGeometry {
    /// Create a [`BoardGeometry`] object for a viewport of the given size.
    pub fn new(board_size: usize, width: f64, height: f64) -> Self {
        let mut geometry: BoardGeometry = Self {
            board_size,
            width,
            height,
            hexagon_size: 0.0,
        };
        geometry.resize(width, height);
        geometry
    }

    /// Compute the hexagon size so that the whole board fits in the viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        let n: f64 = self.board_size as f64;
        self.width = width;
        self.height = height;
        self.hexagon_size = (width / (n * 4.0 - 2.0 + MARGIN))
            .min(height / (n * 2.0 * SQRT_3 - 2.0 / SQRT_3 + MARGIN));

        if log_enabled!(Level::Debug) {
            debug!("Board geometry:");
            debug!("        width = {width}");
            debug!("       height = {height}");
            debug!("  hexagon size = {}", self.hexagon_size);
        }
    }

    /// Return the viewport width and height.
    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Half-width of a hexagon in pixels.
    pub fn hexagon_size(&self) -> f64 {
        self.hexagon_size
    }

    /// Return the pixel coordinates of the center of the given cell.
    pub fn to_pixel(&self, position: HexCoordinate) -> Point {
        Point {
            x: self.width / 2.0 + position.x as f64 * self.hexagon_size,
            y: self.height / 2.0 + position.y as f64 * SQRT_3 * self.hexagon_size,
        }
    }

    /// Whether the point is inside the hexagon of the given cell.
    pub fn contains(&self, position: HexCoordinate, point: Point) -> bool {
        if self.hexagon_size <= 0.0 {
            return false;
        }
        let center: Point = self.to_pixel(position);
        let dist_x: f64 = (point.x - center.x).abs() / self.hexagon_size;
        let dist_y: f64 = (point.y - center.y).abs() / self.hexagon_size;

        // Quick checks
        if dist_x > 1.0 || dist_y > TWO_DIV_SQRT_3 {
            return false;
        }
        // The point is in the hexagon incircle
        if dist_x * dist_x + dist_y * dist_y <= 1.0 {
            return true;
        }
        // Between the incircle and the slanted edges
        dist_y <= TWO_DIV_SQRT_3 - dist_x / SQRT_3
    }

    /// Return the tile whose current cell is under the given point.
    pub fn tile_at(&self, point: Point, puzzle: &PuzzleState) -> Option<TileId> {
        let found: Option<TileId> = puzzle.tiles().iter().map(|t| t.id).find(|id| {
            puzzle
                .location(*id)
                .is_some_and(|l| self.contains(l.current, point))
        });
        match found {
            Some(id) => debug!("Point ({}, {}) is in tile {id}", point.x, point.y),
            None => debug!("No tile at ({}, {})", point.x, point.y),
        }
        found
    }
}
