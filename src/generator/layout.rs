/*
layout.rs

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

//! Cells of the hexagonal board.
//!
//! The board is a large hexagon made of hexagonal cells.
//! Cells are addressed with `(x, y)` coordinates where `y` is the row and `x` the column.
//! Columns step by two from one cell to the next in a row, and each row is shifted by one
//! column from its neighbors, so that `x + y` is always even:
//!
//! ```text
//! y = -1        (-1,-1) ( 1,-1)
//! y =  0    (-2, 0) ( 0, 0) ( 2, 0)
//! y =  1        (-1, 1) ( 1, 1)
//! ```
//!
//! The `radius` of the board is the number of rows from the center row to the top row, which is
//! the level's board size minus one.

use log::debug;
use std::fmt;

use super::color_scheme::{ColorScheme, Rgb};

const SQRT_3: f64 = 1.732_050_807_568_877_2_f64;

/// Cell coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoordinate {
    /// Column.
    pub x: i32,

    /// Row.
    pub y: i32,
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl HexCoordinate {
    /// Create a [`HexCoordinate`] object.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the coordinates scaled so that the board fits in the unit disk.
    ///
    /// The six corners of the board are on the unit circle.
    /// The aspect ratio of the board is preserved: one row is `√3` columns high.
    pub fn normalized(&self, radius: i32) -> (f64, f64) {
        if radius == 0 {
            return (0.0, 0.0);
        }
        let r: f64 = 2.0 * radius as f64;
        (self.x as f64 / r, self.y as f64 * SQRT_3 / r)
    }
}

/// Position of a cell on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PositionClass {
    Corner,
    Side,
    Middle,
}

impl fmt::Display for PositionClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PositionClass::Corner => write!(f, "corner"),
            PositionClass::Side => write!(f, "side"),
            PositionClass::Middle => write!(f, "middle"),
        }
    }
}

/// Return the largest column in the given row.
fn max_x(radius: i32, y: i32) -> i32 {
    2 * radius - y.abs()
}

/// Return the position class of the cell.
pub fn classify(position: HexCoordinate, radius: i32) -> PositionClass {
    let max_x: i32 = max_x(radius, position.y);
    let extreme_row: bool = position.y.abs() == radius;
    let extreme_column: bool = position.x.abs() == max_x;

    if extreme_column && (extreme_row || position.y == 0) {
        PositionClass::Corner
    } else if extreme_row || extreme_column {
        PositionClass::Side
    } else {
        PositionClass::Middle
    }
}

/// Return the coordinates and the position class of all the cells, row by row from the top.
///
/// A board of size `n + 1` has `3n(n+1) + 1` cells.
pub fn enumerate_cells(board_size: usize) -> Vec<(HexCoordinate, PositionClass)> {
    let radius: i32 = board_size.saturating_sub(1) as i32;
    let mut cells: Vec<(HexCoordinate, PositionClass)> =
        Vec::with_capacity((3 * radius * (radius + 1) + 1) as usize);

    for y in -radius..=radius {
        let max_x: i32 = max_x(radius, y);
        for x in (-max_x..=max_x).step_by(2) {
            let position: HexCoordinate = HexCoordinate::new(x, y);
            cells.push((position, classify(position, radius)));
        }
    }
    cells
}

/// Cell of the board in its solved state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    /// Cell coordinates.
    pub position: HexCoordinate,

    /// Position class of the cell.
    pub class: PositionClass,

    /// Color given by the color scheme at this position.
    pub color: Rgb,
}

/// Cells of a board with their colors.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    /// Board size (see [`super::levels::Level::board_size`]).
    pub board_size: usize,

    /// Cells, row by row from the top.
    pub cells: Vec<Cell>,
}

impl BoardLayout {
    /// Create a [`BoardLayout`] object and color its cells with the given scheme.
    pub fn new(board_size: usize, scheme: &ColorScheme) -> Self {
        let radius: i32 = board_size.saturating_sub(1) as i32;
        let cells: Vec<Cell> = enumerate_cells(board_size)
            .into_iter()
            .map(|(position, class)| {
                let (u, v) = position.normalized(radius);
                Cell {
                    position,
                    class,
                    color: scheme.color_at(u, v),
                }
            })
            .collect();
        debug!("Board of size {board_size}: {} cells", cells.len());
        Self { board_size, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::color_scheme::ChannelGradient;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn count(cells: &[(HexCoordinate, PositionClass)], class: PositionClass) -> usize {
        cells.iter().filter(|(_, c)| *c == class).count()
    }

    #[test]
    fn single_cell_board() {
        let cells: Vec<(HexCoordinate, PositionClass)> = enumerate_cells(1);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].0, HexCoordinate::new(0, 0));
        assert_eq!(cells[0].0.normalized(0), (0.0, 0.0));
    }

    #[test]
    fn board_of_size_two() {
        let cells: Vec<(HexCoordinate, PositionClass)> = enumerate_cells(2);
        let positions: Vec<HexCoordinate> = cells.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            positions,
            vec![
                HexCoordinate::new(-1, -1),
                HexCoordinate::new(1, -1),
                HexCoordinate::new(-2, 0),
                HexCoordinate::new(0, 0),
                HexCoordinate::new(2, 0),
                HexCoordinate::new(-1, 1),
                HexCoordinate::new(1, 1),
            ]
        );
        assert_eq!(count(&cells, PositionClass::Corner), 6);
        assert_eq!(count(&cells, PositionClass::Middle), 1);
        assert_eq!(classify(HexCoordinate::new(0, 0), 1), PositionClass::Middle);
    }

    #[test]
    fn board_of_size_three() {
        let cells: Vec<(HexCoordinate, PositionClass)> = enumerate_cells(3);
        assert_eq!(cells.len(), 19);
        assert_eq!(count(&cells, PositionClass::Corner), 6);
        assert_eq!(count(&cells, PositionClass::Side), 6);
        assert_eq!(count(&cells, PositionClass::Middle), 7);

        assert_eq!(classify(HexCoordinate::new(-4, 0), 2), PositionClass::Corner);
        assert_eq!(classify(HexCoordinate::new(2, -2), 2), PositionClass::Corner);
        assert_eq!(classify(HexCoordinate::new(0, -2), 2), PositionClass::Side);
        assert_eq!(classify(HexCoordinate::new(3, 1), 2), PositionClass::Side);
        assert_eq!(classify(HexCoordinate::new(1, 1), 2), PositionClass::Middle);
    }

    #[test]
    fn corners_on_unit_circle() {
        for (position, class) in enumerate_cells(4) {
            let (u, v) = position.normalized(3);
            let norm: f64 = (u * u + v * v).sqrt();
            if class == PositionClass::Corner {
                assert!((norm - 1.0).abs() < 1e-9, "{position} at {norm}");
            } else {
                assert!(norm < 1.0, "{position} at {norm}");
            }
        }
    }

    #[test]
    fn layout_colors_every_cell() {
        let flat: ChannelGradient = ChannelGradient {
            offset: 0.5,
            scale: 0.0,
            angle: 0.0,
        };
        let scheme: ColorScheme = ColorScheme {
            channels: [flat, flat, flat],
        };
        let layout: BoardLayout = BoardLayout::new(4, &scheme);
        assert_eq!(layout.cells.len(), 37);
        assert!(
            layout
                .cells
                .iter()
                .all(|c| c.color == Rgb { r: 127, g: 127, b: 127 })
        );
    }

    proptest! {
        #[test]
        fn cells_are_unique_and_complete(board_size in 2usize..12) {
            let n: usize = board_size - 1;
            let cells: Vec<(HexCoordinate, PositionClass)> = enumerate_cells(board_size);
            prop_assert_eq!(cells.len(), 3 * n * (n + 1) + 1);

            let unique: HashSet<HexCoordinate> = cells.iter().map(|(p, _)| *p).collect();
            prop_assert_eq!(unique.len(), cells.len());
            for (p, _) in &cells {
                prop_assert_eq!((p.x + p.y).rem_euclid(2), 0);
            }
            prop_assert_eq!(count(&cells, PositionClass::Corner), 6);
            prop_assert_eq!(count(&cells, PositionClass::Side), 6 * (n - 1));
        }
    }
}
