/*
game.rs

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

//! Manage the status of a game in progress.

use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::board::{PuzzleState, TileId};
use crate::drag::{GestureOutcome, InteractionController, PointerEvent};
use crate::generator::color_scheme::{ColorScheme, Rgb};
use crate::generator::layout::BoardLayout;
use crate::generator::levels::{Level, LevelError};
use crate::geometry::{BoardGeometry, Point};
use crate::settings::Settings;

/// What the renderer needs to draw a tile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderTile {
    /// Tile identifier.
    pub id: String,

    /// Pixel coordinates of the center of the tile, drag offset included.
    pub x: f64,
    pub y: f64,

    /// Tile color.
    pub color: Rgb,

    /// Whether the player can move the tile.
    pub movable: bool,

    /// Whether to draw the fixed tile mark.
    pub fixed_mark_visible: bool,

    /// Whether the tile follows the pointer.
    pub dragged: bool,

    /// Whether the tile is highlighted as the drop target.
    pub drop_target: bool,
}

/// Manage the status of the game in progress.
pub struct Game {
    /// User preferences.
    settings: Settings,

    /// Level being played.
    level: Level,

    /// Color scheme of the board.
    scheme: ColorScheme,

    /// Position of the tiles.
    puzzle: PuzzleState,

    /// Placement of the board in the viewport.
    geometry: BoardGeometry,

    /// Drag and drop state machine.
    controller: InteractionController,

    /// Random number generator used for the color schemes and the shuffles.
    rng: StdRng,

    /// Time when the game started. Used to compute game duration.
    start_time: Instant,

    /// How long it took to solve the puzzle.
    solve_duration: Option<Duration>,
}

impl Game {
    /// Create a [`Game`] object and start a game at the level selected in the settings.
    pub fn new(settings: Settings, width: f64, height: f64, mut rng: StdRng) -> Self {
        let level: Level = settings.level();
        let scheme: ColorScheme = ColorScheme::generate(&level, &mut rng);
        let layout: BoardLayout = BoardLayout::new(level.board_size, &scheme);
        let puzzle: PuzzleState = PuzzleState::build(&layout, &level, &mut rng);
        let geometry: BoardGeometry = BoardGeometry::new(level.board_size, width, height);

        info!("New {} game: {} tiles", level.name(), puzzle.tiles().len());
        Self {
            settings,
            level,
            scheme,
            puzzle,
            geometry,
            controller: InteractionController::new(),
            rng,
            start_time: Instant::now(),
            solve_duration: None,
        }
    }

    /// Drop the current board and start a new game at the level selected in the settings.
    pub fn new_game(&mut self) {
        self.level = self.settings.level();
        self.scheme = ColorScheme::generate(&self.level, &mut self.rng);
        let layout: BoardLayout = BoardLayout::new(self.level.board_size, &self.scheme);
        self.puzzle = PuzzleState::build(&layout, &self.level, &mut self.rng);

        let (width, height) = self.geometry.viewport();
        self.geometry = BoardGeometry::new(self.level.board_size, width, height);
        self.controller.reset();
        self.start_time = Instant::now();
        self.solve_duration = None;
        info!(
            "New {} game: {} tiles",
            self.level.name(),
            self.puzzle.tiles().len()
        );
    }

    /// Select a new level and start a game.
    ///
    /// # Errors
    ///
    /// The method returns an error if no level has that name. The game in progress is kept.
    pub fn set_level(&mut self, name: &str) -> Result<(), LevelError> {
        self.settings.set_level(name)?;
        self.new_game();
        Ok(())
    }

    /// Set whether to draw a mark on the fixed tiles.
    pub fn set_mark_fixed(&mut self, mark_fixed: bool) {
        self.settings.set_mark_fixed(mark_fixed);
    }

    /// Adapt the board to a new viewport size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.geometry.resize(width, height);
    }

    /// Process a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        let outcome: GestureOutcome =
            self.controller
                .handle(event, &mut self.puzzle, &self.geometry);
        if let GestureOutcome::Settled {
            just_solved: true, ..
        } = outcome
        {
            let duration: Duration = self.start_time.elapsed();
            self.solve_duration = Some(duration);
            info!("Solved in {:.1}s", duration.as_secs_f64());
        }
        debug!("{event:?} -> {outcome:?}");
        outcome
    }

    /// Return the tiles to draw, fixed tiles first.
    pub fn render(&self) -> Vec<RenderTile> {
        let dragged: Option<TileId> = self.controller.dragged();
        let target: Option<TileId> = self.controller.hover_target();

        self.puzzle
            .tiles()
            .iter()
            .filter_map(|tile| {
                let location = self.puzzle.location(tile.id)?;
                let center: Point = self.geometry.to_pixel(location.current);
                let offset: Point = self.controller.offset_of(tile.id);
                Some(RenderTile {
                    id: tile.id.to_string(),
                    x: center.x + offset.x,
                    y: center.y + offset.y,
                    color: tile.color,
                    movable: tile.movable,
                    fixed_mark_visible: !tile.movable && self.settings.mark_fixed(),
                    dragged: dragged == Some(tile.id),
                    drop_target: target == Some(tile.id),
                })
            })
            .collect()
    }

    /// Whether the puzzle is solved.
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    /// Whether to offer the player to start a new game.
    pub fn show_restart(&self) -> bool {
        self.is_solved()
    }

    /// Return the user preferences.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Return the level being played.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Return the color scheme of the board.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Return the position of the tiles.
    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    /// Return the placement of the board in the viewport.
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Return the number of swaps so far.
    pub fn swap_count(&self) -> usize {
        self.puzzle.swap_count()
    }

    /// Return the game duration in hours, minutes, and seconds.
    ///
    /// Once the puzzle is solved, the duration stops.
    pub fn duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self
            .solve_duration
            .unwrap_or_else(|| self.start_time.elapsed())
            .as_secs();
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::levels::Difficulty;
    use rand::SeedableRng;

    fn game(level: &str) -> Game {
        let mut settings: Settings = Settings::new();
        settings.set_level(level).unwrap();
        Game::new(settings, 800.0, 600.0, StdRng::seed_from_u64(31))
    }

    #[test]
    fn new_game_uses_the_selected_level() {
        let g: Game = game("Medium");
        assert_eq!(g.level().difficulty, Difficulty::Medium);
        assert_eq!(g.render().len(), 37);
        assert!(g.level().valid_color_diff(g.scheme().score()));
    }

    #[test]
    fn unknown_level_keeps_the_game() {
        let mut g: Game = game("Hard");
        let before: Vec<RenderTile> = g.render();
        assert!(g.set_level("Legendary").is_err());
        assert_eq!(g.level().difficulty, Difficulty::Hard);
        assert_eq!(g.render(), before);

        g.set_level("Easy").unwrap();
        assert_eq!(g.level().difficulty, Difficulty::Easy);
        assert_eq!(g.render().len(), 19);
        assert_eq!(g.settings().level().difficulty, Difficulty::Easy);
    }

    #[test]
    fn render_follows_the_drag() {
        let mut g: Game = game("Medium");
        let movable: Vec<RenderTile> = g.render().into_iter().filter(|t| t.movable).collect();
        let (a, b) = (&movable[0], &movable[1]);

        g.handle_pointer(PointerEvent::Down(Point::new(a.x, a.y)));
        g.handle_pointer(PointerEvent::Move(Point::new(b.x, b.y)));
        let during: Vec<RenderTile> = g.render();
        let dragged: &RenderTile = during.iter().find(|t| t.dragged).unwrap();
        assert_eq!(dragged.id, a.id);
        assert!((dragged.x - b.x).abs() < 1e-9 && (dragged.y - b.y).abs() < 1e-9);
        let target: &RenderTile = during.iter().find(|t| t.drop_target).unwrap();
        assert_eq!(target.id, b.id);

        g.handle_pointer(PointerEvent::Up);
        let after: Vec<RenderTile> = g.render();
        let new_a: &RenderTile = after.iter().find(|t| t.id == a.id).unwrap();
        let new_b: &RenderTile = after.iter().find(|t| t.id == b.id).unwrap();
        assert_eq!((new_a.x, new_a.y), (b.x, b.y));
        assert_eq!((new_b.x, new_b.y), (a.x, a.y));
        assert!(after.iter().all(|t| !t.dragged && !t.drop_target));
        assert_eq!(g.swap_count(), 1);
    }

    #[test]
    fn fixed_marks_follow_the_setting() {
        let mut g: Game = game("Hard");
        assert_eq!(g.render().iter().filter(|t| t.fixed_mark_visible).count(), 6);
        g.set_mark_fixed(false);
        assert!(g.render().iter().all(|t| !t.fixed_mark_visible));
    }

    #[test]
    fn resize_moves_the_tiles() {
        let mut g: Game = game("Easy");
        g.resize(1600.0, 1200.0);
        let center: RenderTile = g
            .render()
            .into_iter()
            .find(|t| t.id == "hexagon_0_0")
            .unwrap();
        let size: f64 = g.geometry().hexagon_size();
        // The center tile is at the middle of the viewport, give or take its shuffled position
        assert!((center.x - 800.0).abs() <= 4.0 * size);
        assert!((center.y - 600.0).abs() <= 2.0 * 1.8 * size);
    }

    #[test]
    fn solving_by_dragging() {
        let mut g: Game = game("Hard");
        while !g.is_solved() {
            let puzzle: &PuzzleState = g.puzzle();
            let (from, to) = puzzle
                .tiles()
                .iter()
                .filter_map(|t| {
                    let l = puzzle.location(t.id)?;
                    (l.current != l.correct).then_some((l.current, l.correct))
                })
                .next()
                .unwrap();
            let (p1, p2) = (g.geometry().to_pixel(from), g.geometry().to_pixel(to));
            g.handle_pointer(PointerEvent::Down(p1));
            g.handle_pointer(PointerEvent::Move(p2));
            g.handle_pointer(PointerEvent::Up);
        }
        assert!(g.show_restart());
        assert!(g.swap_count() < g.puzzle().movable_count());
        assert!(g.duration_hms().0 == 0);

        g.new_game();
        assert_eq!(g.swap_count(), 0);
    }
}
