/*
color_scheme.rs

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

//! Generate a random color scheme.
//!
//! A color scheme is a linear gradient for each of the red, green, and blue channels.
//! Gradients are evaluated at the normalized cell coordinates returned by
//! [`super::layout::HexCoordinate::normalized`], which are all inside the unit disk.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use super::levels::Level;

/// A slope component larger than this value, in opposite directions for two channels, is
/// considered a clash.
const CLASH_SLOPE: f64 = 0.1;

/// Cell color.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Linear gradient for one color channel.
///
/// At the center of the board the channel is `offset`. It then varies by `scale` per unit of
/// distance in the `angle` direction.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct ChannelGradient {
    /// Channel value at the center of the board, between 0 and 1.
    pub offset: f64,

    /// Gradient magnitude.
    pub scale: f64,

    /// Gradient direction in radians.
    pub angle: f64,
}

impl ChannelGradient {
    /// Create a random [`ChannelGradient`] object.
    ///
    /// The scale is bounded by the distance between the offset and the nearest end of the
    /// `[0, 1]` range, so the channel never overflows inside the unit disk.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let offset: f64 = rng.random::<f64>();
        // The square root favors larger variations. The 0.999 factor absorbs rounding errors.
        let scale: f64 = 0.999 * rng.random::<f64>().sqrt() * offset.min(1.0 - offset);
        let angle: f64 = rng.random::<f64>() * TAU;
        Self {
            offset,
            scale,
            angle,
        }
    }

    /// Return the variation of the channel along the x and y axes.
    pub fn slope(&self) -> (f64, f64) {
        (self.scale * self.angle.cos(), self.scale * self.angle.sin())
    }

    /// Weight of the channel in the separation score.
    fn magnitude(&self) -> f64 {
        self.scale * (1.0 - self.offset)
    }

    /// Return the channel value, between 0 and 1, at the given normalized coordinates.
    pub fn value_at(&self, u: f64, v: f64) -> f64 {
        let (dx, dy) = self.slope();
        self.offset + dx * u + dy * v
    }
}

/// Red, green, and blue gradients.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct ColorScheme {
    pub channels: [ChannelGradient; 3],
}

impl ColorScheme {
    /// Create a random [`ColorScheme`] object without checking it against a level.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            channels: [
                ChannelGradient::random(rng),
                ChannelGradient::random(rng),
                ChannelGradient::random(rng),
            ],
        }
    }

    /// Generate random color schemes until one is accepted by the level.
    ///
    /// There is no limit on the number of attempts: the rules of the levels must be satisfiable.
    pub fn generate<R: Rng + ?Sized>(level: &Level, rng: &mut R) -> Self {
        let mut attempts: usize = 0;
        loop {
            attempts += 1;
            let scheme: ColorScheme = ColorScheme::random(rng);
            if level.reject_clashes && scheme.has_clash() {
                continue;
            }
            let score: f64 = scheme.score();
            if level.valid_color_diff(score) {
                debug!(
                    "Color scheme for level {} found after {attempts} attempts (score = {score})",
                    level.name()
                );
                return scheme;
            }
        }
    }

    /// Return how distinguishable the colors are across the board.
    ///
    /// Two channels that vary in the same direction do not help telling cells apart, so each
    /// pair of channels contributes the product of their magnitudes weighted by the squared sine
    /// of the angle between their directions.
    pub fn score(&self) -> f64 {
        let mut score: f64 = 0.0;
        for i in 0..self.channels.len() {
            for j in i + 1..self.channels.len() {
                let a: &ChannelGradient = &self.channels[i];
                let b: &ChannelGradient = &self.channels[j];
                let cos: f64 = (a.angle - b.angle).cos();
                score += a.magnitude() * b.magnitude() * (1.0 - cos * cos);
            }
        }
        score
    }

    /// Whether two channels vary strongly in opposite directions along the same axis.
    pub fn has_clash(&self) -> bool {
        let slopes: Vec<(f64, f64)> = self.channels.iter().map(|c| c.slope()).collect();
        let opposite = |a: f64, b: f64| a * b < 0.0 && a.abs() > CLASH_SLOPE && b.abs() > CLASH_SLOPE;

        for i in 0..slopes.len() {
            for j in i + 1..slopes.len() {
                if opposite(slopes[i].0, slopes[j].0) || opposite(slopes[i].1, slopes[j].1) {
                    return true;
                }
            }
        }
        false
    }

    /// Return the color at the given normalized coordinates.
    pub fn color_at(&self, u: f64, v: f64) -> Rgb {
        let [r, g, b] = self
            .channels
            .map(|c| (255.0 * c.value_at(u, v)).floor().clamp(0.0, 255.0) as u8);
        Rgb { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::layout::enumerate_cells;
    use crate::generator::levels::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    fn gradient(offset: f64, scale: f64, angle: f64) -> ChannelGradient {
        ChannelGradient {
            offset,
            scale,
            angle,
        }
    }

    #[test]
    fn parallel_channels_score_zero() {
        let scheme: ColorScheme = ColorScheme {
            channels: [
                gradient(0.5, 0.4, 0.3),
                gradient(0.4, 0.2, 0.3),
                gradient(0.5, 0.1, 0.3 + PI),
            ],
        };
        assert!(scheme.score().abs() < 1e-12);
    }

    #[test]
    fn perpendicular_channels_score() {
        let scheme: ColorScheme = ColorScheme {
            channels: [
                gradient(0.5, 0.4, 0.0),
                gradient(0.5, 0.4, PI / 2.0),
                gradient(0.5, 0.0, 0.0),
            ],
        };
        // Only the red/green pair contributes: (0.4 * 0.5)^2
        assert!((scheme.score() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn anti_parallel_channels_clash() {
        let scheme: ColorScheme = ColorScheme {
            channels: [
                gradient(0.5, 0.3, 0.0),
                gradient(0.5, 0.3, PI),
                gradient(0.5, 0.0, 0.0),
            ],
        };
        assert!(scheme.has_clash());
        assert!(scheme.score().abs() < 1e-12);

        let calm: ColorScheme = ColorScheme {
            channels: [
                gradient(0.5, 0.3, 0.0),
                gradient(0.5, 0.3, 0.2),
                gradient(0.5, 0.05, PI),
            ],
        };
        assert!(!calm.has_clash());
    }

    #[test]
    fn color_at_center_is_offset() {
        let scheme: ColorScheme = ColorScheme {
            channels: [
                gradient(0.0, 0.0, 1.0),
                gradient(0.5, 0.3, 2.0),
                gradient(1.0, 0.0, 3.0),
            ],
        };
        assert_eq!(scheme.color_at(0.0, 0.0), Rgb { r: 0, g: 127, b: 255 });
        assert_eq!(scheme.color_at(0.0, 0.0).to_string(), "rgb(0, 127, 255)");
    }

    #[test]
    fn generated_schemes_satisfy_every_level() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        for d in Difficulty::all() {
            let level: Level = Level::get(d);
            for _ in 0..50 {
                let scheme: ColorScheme = ColorScheme::generate(&level, &mut rng);
                assert!(level.valid_color_diff(scheme.score()), "level {d}");
                if level.reject_clashes {
                    assert!(!scheme.has_clash(), "level {d}");
                }
            }
        }
    }

    #[test]
    fn channels_stay_in_range() {
        let mut rng: StdRng = StdRng::seed_from_u64(42);
        let mut points: Vec<(f64, f64)> = enumerate_cells(4)
            .iter()
            .map(|(p, _)| p.normalized(3))
            .collect();
        for i in 0..64 {
            let a: f64 = TAU * i as f64 / 64.0;
            points.push((a.cos(), a.sin()));
        }

        for _ in 0..10_000 {
            let scheme: ColorScheme = ColorScheme::random(&mut rng);
            for &(u, v) in &points {
                for channel in &scheme.channels {
                    let value: f64 = 255.0 * channel.value_at(u, v);
                    assert!((0.0..=255.0).contains(&value), "{channel:?} at ({u}, {v})");
                }
            }
        }
    }
}
