/*
cli_options.rs

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

//! Process command-line options.
//!
//! Hue More does not draw the board in a window. In command-line mode, it generates a board,
//! prints it, and can feed it pointer events read from a file so that a renderer, or a
//! developer, can check the drag and drop behavior.
//!
//! # Examples
//!
//! List the available levels:
//!
//! ```
//! $ huemore --ls
//! Easy     board size 3, fixed tiles: corner, side
//! Medium   board size 4, fixed tiles: corner, side
//! Hard     board size 4, fixed tiles: corner
//! Extreme  board size 4, fixed tiles: corner
//! ```
//!
//! Select the Hard level (the choice is saved), and print a board as JSON:
//!
//! ```
//! $ huemore --level hard --json
//! ```
//!
//! Replay a gesture on a reproducible board. Besides pointer events (`down X Y`, `move X Y`,
//! `up`, `cancel`, `leave`), a replay file accepts `new`, `level NAME`, `resize W H`, and
//! `mark-fixed BOOL`:
//!
//! ```
//! $ printf 'down 400 300\nmove 470 300\nup\n' | huemore --seed 3 --replay -
//! ```

use clap::Parser;
use log::{LevelFilter, debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crate::board::{PuzzleState, TileId};
use crate::config::{APPLICATION_NAME, COPYRIGHT_NOTICE, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::drag::{GestureOutcome, PointerEvent};
use crate::game::{Game, RenderTile};
use crate::generator::color_scheme::ColorScheme;
use crate::generator::layout::{HexCoordinate, enumerate_cells};
use crate::generator::levels::{ColorDiffRule, Difficulty, Level};
use crate::saver::settings::SaverSettings;
use crate::settings::{Settings, Theme};

/// Hexagonal color gradient puzzle.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the levels
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Select and save the level (Easy, Medium, Hard, or Extreme)
    #[arg(short, long)]
    level: Option<String>,

    /// Save whether to mark the fixed tiles
    #[arg(short, long)]
    mark_fixed: Option<bool>,

    /// Save the color theme
    #[arg(value_enum, short, long)]
    theme: Option<Theme>,

    /// Delete the saved settings before processing the other options
    #[arg(long, default_value_t = false)]
    reset_settings: bool,

    /// Directory where the settings are saved
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for the random generator, to reproduce a board
    #[arg(short, long)]
    seed: Option<u64>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: f64,

    /// Read pointer events from the file ("-" for the standard input)
    #[arg(short, long)]
    replay: Option<String>,

    /// Solve the puzzle by dragging the tiles
    #[arg(short, long, default_value_t = false)]
    autoplay: bool,

    /// Print the board as JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Board status printed with the `--json` option.
#[derive(Serialize)]
struct BoardReport<'a> {
    level: String,
    rule: ColorDiffRule,
    score: f64,
    scheme: &'a ColorScheme,
    theme: Theme,
    width: f64,
    height: f64,
    hexagon_size: f64,
    solved: bool,
    swaps: usize,
    tiles: &'a [RenderTile],
}

/// Collect the board status for the `--json` option.
fn board_report<'a>(game: &'a Game, tiles: &'a [RenderTile]) -> BoardReport<'a> {
    let (width, height) = game.geometry().viewport();
    BoardReport {
        level: game.level().name(),
        rule: game.level().color_rule,
        score: game.scheme().score(),
        scheme: game.scheme(),
        theme: game.settings().theme(),
        width,
        height,
        hexagon_size: game.geometry().hexagon_size(),
        solved: game.is_solved(),
        swaps: game.swap_count(),
        tiles,
    }
}

/// Return the directory where the settings are saved by default.
fn default_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(dir).join(APPLICATION_NAME);
    }
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APPLICATION_NAME),
        None => PathBuf::from("."),
    }
}

/// Load the saved settings.
///
/// Unreadable settings are replaced by the defaults, and the player is told so because the next
/// settings change overwrites the file.
fn load_settings(saver: &SaverSettings) -> Settings {
    match saver.get_settings() {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            debug!("No saved settings, using the defaults");
            Settings::default()
        }
        Err(e) => {
            warn!("Cannot read {:?}: {e}", saver.path());
            eprintln!(
                "Warning: {}: {e}. Using the default settings.",
                saver.path().display()
            );
            Settings::default()
        }
    }
}

/// Parse and process command-line options, and return the exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut logger: env_logger::Builder = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    //
    // List the levels
    //
    if args.ls {
        for d in Difficulty::all() {
            let level: Level = Level::get(d);
            let fixed: Vec<String> = level.fixed_types.iter().map(|c| c.to_string()).collect();
            println!(
                "{:<8} board size {}, fixed tiles: {}",
                level.name(),
                level.board_size,
                fixed.join(", ")
            );
        }
        return 0;
    }

    //
    // Update the settings
    //
    let saver: SaverSettings = SaverSettings::new(args.data_dir.unwrap_or_else(default_data_dir));
    if args.reset_settings {
        info!("Deleting the saved settings");
        saver.delete_save();
    }
    let mut settings: Settings = load_settings(&saver);
    let mut changed: bool = false;

    if let Some(name) = &args.level {
        if let Err(e) = settings.set_level(name) {
            eprintln!("Error: {e}. Use --ls to list the available levels.");
            return 1;
        }
        changed = true;
    }
    if let Some(mark_fixed) = args.mark_fixed {
        settings.set_mark_fixed(mark_fixed);
        changed = true;
    }
    if let Some(theme) = args.theme {
        settings.set_theme(theme);
        changed = true;
    }
    if changed && let Err(e) = saver.save_settings(&settings) {
        warn!("Cannot save the settings: {e}");
    }

    //
    // Play
    //
    let rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game: Game = Game::new(settings, args.width, args.height, rng);

    if let Some(source) = &args.replay
        && let Err(e) = replay(&mut game, source)
    {
        eprintln!("Error: {source}: {e}");
        return 1;
    }
    if args.autoplay {
        autoplay(&mut game);
    }

    if args.json {
        let tiles: Vec<RenderTile> = game.render();
        let report: BoardReport = board_report(&game, &tiles);
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    } else {
        print_board(&game);
    }
    0
}

/// Line of a replay file.
enum Command {
    /// Pointer event, such as `down 120 45` or `up`.
    Pointer(PointerEvent),

    /// `new`: start a new game.
    NewGame,

    /// `level <name>`: select a level and start a new game.
    Level(String),

    /// `resize <width> <height>`: change the viewport size.
    Resize(f64, f64),

    /// `mark-fixed <true|false>`: show or hide the fixed tile marks.
    MarkFixed(bool),
}

/// Read a replay file line.
fn parse_command(line: &str) -> Result<Command, Box<dyn Error>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["new"] => Ok(Command::NewGame),
        ["level", name] => Ok(Command::Level(name.to_string())),
        ["resize", w, h] => Ok(Command::Resize(w.parse::<f64>()?, h.parse::<f64>()?)),
        ["mark-fixed", m] => Ok(Command::MarkFixed(m.parse::<bool>()?)),
        _ => Ok(Command::Pointer(line.parse::<PointerEvent>()?)),
    }
}

/// Run the commands read from a file, one per line, against the game.
///
/// Empty lines and lines starting with `#` are ignored.
fn replay(game: &mut Game, source: &str) -> Result<(), Box<dyn Error>> {
    let reader: Box<dyn BufRead> = if source == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(source)?))
    };

    for (i, line) in reader.lines().enumerate() {
        let line: String = line?;
        let line: &str = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command: Command = parse_command(line).map_err(|e| format!("line {}: {e}", i + 1))?;
        let event: PointerEvent = match command {
            Command::Pointer(event) => event,
            Command::NewGame => {
                game.new_game();
                continue;
            }
            Command::Level(name) => {
                game.set_level(&name)
                    .map_err(|e| format!("line {}: {e}", i + 1))?;
                continue;
            }
            Command::Resize(width, height) => {
                game.resize(width, height);
                continue;
            }
            Command::MarkFixed(mark_fixed) => {
                game.set_mark_fixed(mark_fixed);
                continue;
            }
        };
        match game.handle_pointer(event) {
            GestureOutcome::Settled {
                swapped: Some((a, b)),
                just_solved,
                ..
            } => {
                println!("Swapped {a} and {b}");
                if just_solved {
                    println!("Solved!");
                }
            }
            GestureOutcome::Reset => println!("Gesture reset at line {}", i + 1),
            _ => (),
        }
    }
    Ok(())
}

/// Return a misplaced tile and the cell where it belongs.
fn next_move(puzzle: &PuzzleState) -> Option<(TileId, HexCoordinate, HexCoordinate)> {
    puzzle.tiles().iter().find_map(|t| {
        let l = puzzle.location(t.id)?;
        (l.current != l.correct).then_some((t.id, l.current, l.correct))
    })
}

/// Solve the puzzle with drag and drop gestures.
fn autoplay(game: &mut Game) {
    while let Some((id, from, to)) = next_move(game.puzzle()) {
        let start = game.geometry().to_pixel(from);
        let end = game.geometry().to_pixel(to);
        debug!("Autoplay: moving {id} from {from} to {to}");

        game.handle_pointer(PointerEvent::Down(start));
        game.handle_pointer(PointerEvent::Move(end));
        match game.handle_pointer(PointerEvent::Up) {
            GestureOutcome::Settled {
                swapped: Some((a, b)),
                ..
            } => println!("Swapped {a} and {b}"),
            outcome => {
                warn!("Autoplay: unexpected outcome {outcome:?} for {id}");
                break;
            }
        }
    }
    let (h, m, s) = game.duration_hms();
    println!(
        "Solved in {} swaps ({h:02}:{m:02}:{s:02})",
        game.swap_count()
    );
}

/// Print the board with terminal colors.
fn print_board(game: &Game) {
    let puzzle: &PuzzleState = game.puzzle();
    let radius: i32 = game.level().board_size as i32 - 1;
    let mark: &str = match game.settings().theme() {
        Theme::Light => "\x1b[30m",
        Theme::Dark => "\x1b[97m",
    };

    let mut row: i32 = -radius - 1;
    let mut line: String = String::new();
    let mut column: i32 = 0;
    for (position, _) in enumerate_cells(game.level().board_size) {
        if position.y != row {
            if !line.is_empty() {
                println!("{line}");
            }
            row = position.y;
            line.clear();
            column = -2 * radius;
        }
        while column < position.x {
            line.push_str("  ");
            column += 1;
        }
        let Some(tile) = puzzle.tile_at(position).and_then(|id| puzzle.tile(id)) else {
            continue;
        };
        let c = tile.color;
        debug!("{} at {position}: {c}", tile.id);
        let label: &str = if !tile.movable && game.settings().mark_fixed() {
            " () "
        } else {
            "    "
        };
        line.push_str(&format!("\x1b[48;2;{};{};{}m{mark}{label}\x1b[0m", c.r, c.g, c.b));
        column += 2;
    }
    if !line.is_empty() {
        println!("{line}");
    }

    println!("{}", status_line(game));
}

/// Summarize the game in progress.
fn status_line(game: &Game) -> String {
    let puzzle: &PuzzleState = game.puzzle();
    let (h, m, s) = game.duration_hms();
    format!(
        "Level {} ({} theme): {} tiles, {} movable, {} misplaced. Swaps: {}. Time: {h:02}:{m:02}:{s:02}.{}",
        game.level().name(),
        game.settings().theme(),
        puzzle.tiles().len(),
        puzzle.movable_count(),
        puzzle.misplaced(),
        game.swap_count(),
        if game.show_restart() { " Solved!" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn replay_commands() {
        assert!(matches!(parse_command("new"), Ok(Command::NewGame)));
        assert!(matches!(parse_command("level hard"), Ok(Command::Level(n)) if n == "hard"));
        assert!(matches!(
            parse_command("resize 1024 768"),
            Ok(Command::Resize(w, h)) if w == 1024.0 && h == 768.0
        ));
        assert!(matches!(parse_command("mark-fixed false"), Ok(Command::MarkFixed(false))));
        assert!(matches!(
            parse_command("down 5 6"),
            Ok(Command::Pointer(PointerEvent::Down(p))) if p == Point::new(5.0, 6.0)
        ));
        assert!(parse_command("resize big").is_err());
        assert!(parse_command("mark-fixed maybe").is_err());
        assert!(parse_command("fly 1 2").is_err());
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let saver: SaverSettings = SaverSettings::new(dir.path().to_path_buf());
        let mut settings: Settings = Settings::new();
        settings.set_level("Hard").unwrap();
        settings.set_theme(Theme::Dark);
        saver.save_settings(&settings).unwrap();
        assert_eq!(load_settings(&saver), settings);

        std::fs::write(saver.path(), r#"{"level": "Impossible", "theme": "dark"}"#).unwrap();
        assert_eq!(load_settings(&saver), Settings::default());
    }

    #[test]
    fn status_line_reports_the_game() {
        let mut settings: Settings = Settings::new();
        settings.set_theme(Theme::Dark);
        let mut game: Game = Game::new(settings, 800.0, 600.0, StdRng::seed_from_u64(8));
        let status: String = status_line(&game);
        assert!(status.starts_with("Level Easy (dark theme): 19 tiles, 7 movable"));

        autoplay(&mut game);
        assert!(status_line(&game).ends_with("Solved!"));
    }

    #[test]
    fn json_report() {
        let mut settings: Settings = Settings::new();
        settings.set_level("Extreme").unwrap();
        let game: Game = Game::new(settings, 800.0, 600.0, StdRng::seed_from_u64(2));
        let tiles: Vec<RenderTile> = game.render();
        let value: serde_json::Value = serde_json::to_value(board_report(&game, &tiles)).unwrap();

        assert_eq!(value["level"], "Extreme");
        assert_eq!(value["rule"]["kind"], "in_range");
        assert_eq!(value["theme"], "light");
        assert_eq!(value["tiles"].as_array().unwrap().len(), 37);
        assert_eq!(value["scheme"]["channels"].as_array().unwrap().len(), 3);
        let score: f64 = value["score"].as_f64().unwrap();
        assert!((0.015..0.025).contains(&score));
    }

    #[test]
    fn autoplay_solves_the_board() {
        let mut settings: Settings = Settings::new();
        settings.set_level("Extreme").unwrap();
        let mut game: Game = Game::new(settings, 800.0, 600.0, StdRng::seed_from_u64(5));
        autoplay(&mut game);
        assert!(game.is_solved());
        assert!(next_move(game.puzzle()).is_none());
    }
}
