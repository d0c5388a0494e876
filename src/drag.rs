/*
drag.rs

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

//! Drag and drop tiles.
//!
//! The player swaps two tiles by pressing the pointer on a movable tile, dragging it over
//! another movable tile, and releasing the pointer.
//! The [`InteractionController`] object converts the pointer events into swaps on the
//! [`PuzzleState`] object. It is either idle or dragging a tile. While dragging, it tracks the
//! pointer offset so that the dragged tile follows the pointer, and the tile under the pointer
//! (the drop target) so that it can be highlighted.
//!
//! Only one gesture can be active. Unexpected events never leave a half-finished gesture
//! behind: the controller goes back to [`DragState::Idle`] instead.

use log::{debug, info, warn};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::board::{PuzzleState, TileId};
use crate::geometry::{BoardGeometry, Point};

/// Pointer events, for both mouse and touch input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse button pressed or touch started.
    Down(Point),

    /// Pointer moved.
    Move(Point),

    /// Mouse button released or touch ended.
    Up,

    /// Touch cancelled by the system.
    Cancel,

    /// Pointer left the board.
    Leave,
}

/// Type of errors when reading a [`PointerEvent`] from text.
#[derive(Debug, PartialEq)]
pub enum EventParseError {
    /// The line does not start with a known event name.
    UnknownEvent(String),

    /// The event requires two numeric coordinates.
    BadCoordinates(String),
}

impl fmt::Display for EventParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventParseError::UnknownEvent(e) => write!(f, "unknown pointer event \"{e}\""),
            EventParseError::BadCoordinates(l) => write!(f, "expected two coordinates in \"{l}\""),
        }
    }
}

impl Error for EventParseError {}

impl FromStr for PointerEvent {
    type Err = EventParseError;

    /// Read an event such as `down 120 45.5`, `move 130 50`, `up`, `cancel`, or `leave`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name: &str = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let point = || -> Result<Point, EventParseError> {
            match args.as_slice() {
                [x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => Ok(Point::new(x, y)),
                    _ => Err(EventParseError::BadCoordinates(line.to_string())),
                },
                _ => Err(EventParseError::BadCoordinates(line.to_string())),
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "down" => Ok(PointerEvent::Down(point()?)),
            "move" => Ok(PointerEvent::Move(point()?)),
            "up" => Ok(PointerEvent::Up),
            "cancel" => Ok(PointerEvent::Cancel),
            "leave" => Ok(PointerEvent::Leave),
            _ => Err(EventParseError::UnknownEvent(name.to_string())),
        }
    }
}

/// Gesture in progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drag {
    /// Dragged tile.
    pub tile: TileId,

    /// Pointer position when the gesture started.
    pub origin: Point,

    /// Pointer displacement since the gesture started.
    pub offset: Point,

    /// Movable tile under the pointer, if any.
    pub target: Option<TileId>,
}

/// State of the controller.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Result of processing a pointer event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The event had no effect.
    Ignored,

    /// A tile is now dragged.
    Started(TileId),

    /// The dragged tile moved. The drop target did not change.
    Moved,

    /// The drop target changed.
    HoverChanged(Option<TileId>),

    /// A second gesture started while one was active. The controller is idle again.
    Reset,

    /// The gesture ended, with or without a swap.
    Settled {
        /// The two tiles that were swapped.
        swapped: Option<(TileId, TileId)>,

        /// Whether the puzzle is solved after the gesture.
        solved: bool,

        /// Whether the puzzle became solved with this gesture.
        just_solved: bool,
    },
}

/// Drag and drop state machine.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    /// Create an [`InteractionController`] object.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Return the dragged tile.
    pub fn dragged(&self) -> Option<TileId> {
        match self.state {
            DragState::Dragging(d) => Some(d.tile),
            DragState::Idle => None,
        }
    }

    /// Return the drop target.
    pub fn hover_target(&self) -> Option<TileId> {
        match self.state {
            DragState::Dragging(d) => d.target,
            DragState::Idle => None,
        }
    }

    /// Return how far the given tile must be drawn from its cell.
    pub fn offset_of(&self, tile: TileId) -> Point {
        match self.state {
            DragState::Dragging(d) if d.tile == tile => d.offset,
            _ => Point::default(),
        }
    }

    /// Drop any gesture in progress.
    pub fn reset(&mut self) {
        if self.state != DragState::Idle {
            debug!("Gesture reset");
        }
        self.state = DragState::Idle;
    }

    /// Process any pointer event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        puzzle: &mut PuzzleState,
        geometry: &BoardGeometry,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p, puzzle, geometry),
            PointerEvent::Move(p) => self.pointer_move(p, puzzle, geometry),
            PointerEvent::Up => self.pointer_up(puzzle),
            PointerEvent::Cancel | PointerEvent::Leave => self.cancel(puzzle),
        }
    }

    /// Start dragging the movable tile under the pointer.
    pub fn pointer_down(
        &mut self,
        point: Point,
        puzzle: &PuzzleState,
        geometry: &BoardGeometry,
    ) -> GestureOutcome {
        if let DragState::Dragging(d) = self.state {
            warn!("Pointer down while dragging {}: resetting the gesture", d.tile);
            self.reset();
            return GestureOutcome::Reset;
        }

        match geometry.tile_at(point, puzzle) {
            Some(tile) if puzzle.is_movable(tile) => {
                debug!("Start dragging {tile}");
                self.state = DragState::Dragging(Drag {
                    tile,
                    origin: point,
                    offset: Point::default(),
                    target: None,
                });
                GestureOutcome::Started(tile)
            }
            _ => GestureOutcome::Ignored,
        }
    }

    /// Move the dragged tile with the pointer and update the drop target.
    pub fn pointer_move(
        &mut self,
        point: Point,
        puzzle: &PuzzleState,
        geometry: &BoardGeometry,
    ) -> GestureOutcome {
        let DragState::Dragging(drag) = &mut self.state else {
            return GestureOutcome::Ignored;
        };

        drag.offset = Point::new(point.x - drag.origin.x, point.y - drag.origin.y);

        let dragged: TileId = drag.tile;
        let under_pointer: Option<TileId> = geometry
            .tile_at(point, puzzle)
            .filter(|t| *t != dragged && puzzle.is_movable(*t));

        if under_pointer == drag.target {
            return GestureOutcome::Moved;
        }
        match under_pointer {
            Some(t) => debug!("Drop target: {t}"),
            None => debug!("No drop target"),
        }
        drag.target = under_pointer;
        GestureOutcome::HoverChanged(under_pointer)
    }

    /// Drop the dragged tile on the drop target.
    pub fn pointer_up(&mut self, puzzle: &mut PuzzleState) -> GestureOutcome {
        let DragState::Dragging(drag) = self.state else {
            return GestureOutcome::Ignored;
        };
        self.settle(drag.tile, drag.target, puzzle)
    }

    /// Abort the gesture. The dragged tile goes back to its cell.
    pub fn cancel(&mut self, puzzle: &mut PuzzleState) -> GestureOutcome {
        let DragState::Dragging(drag) = self.state else {
            return GestureOutcome::Ignored;
        };
        debug!("Gesture cancelled");
        self.settle(drag.tile, None, puzzle)
    }

    /// End the gesture, swapping the tiles if there is a drop target.
    fn settle(
        &mut self,
        dragged: TileId,
        target: Option<TileId>,
        puzzle: &mut PuzzleState,
    ) -> GestureOutcome {
        let was_solved: bool = puzzle.is_solved();
        let mut swapped: Option<(TileId, TileId)> = None;

        if let Some(target) = target {
            match puzzle.swap(dragged, target) {
                Ok(()) => swapped = Some((dragged, target)),
                Err(e) => warn!("Swap rejected: {e}"),
            }
        }
        self.reset();

        let solved: bool = puzzle.is_solved();
        let just_solved: bool = solved && !was_solved;
        if just_solved {
            info!("Puzzle solved after {} swaps", puzzle.swap_count());
        }
        GestureOutcome::Settled {
            swapped,
            solved,
            just_solved,
        }
    }
}
