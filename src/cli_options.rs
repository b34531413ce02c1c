/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of HexPath.

HexPath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

HexPath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
HexPath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! The command line is the front end of HexPath: it selects a level, replays the player's moves,
//! prints the board, and saves the session and the adventure log.
//!
//! # Examples
//!
//! List the built-in levels:
//!
//! ```text
//! $ hexpath --ls
//! 1 The Beginning (budget 10)
//! 2 The Walkabout (budget 10)
//! 3 Jagged Valley (budget 15)
//! 4 The Deep Woods (budget 20)
//! ```
//!
//! Print the cheapest route of a level:
//!
//! ```text
//! $ hexpath -l "jagged valley" --solve
//! ```
//!
//! Play some moves on the first level and save the session, then continue later:
//!
//! ```text
//! $ hexpath -m "3,0 2,0" --save
//! $ hexpath --resume -m "1,0 0,1" --save
//! ```

use clap::Parser;
use log::{LevelFilter, debug};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use hexpath::campaign::{Campaign, SessionSnapshot};
use hexpath::config::{self, COPYRIGHT_NOTICE, PKGNAME, VERSION};
use hexpath::game::{BacktrackRule, Game, Move, Outcome};
use hexpath::grid::{self, Coordinate, CostMatrix};
use hexpath::history::{GameLogEntry, History};
use hexpath::level::{Board, Level, catalogue, gradient, random_level};
use hexpath::saver::history::SaverHistory;
use hexpath::saver::session::SaverSession;
use hexpath::solver::{self, Solution};

/// Play HexPath levels from the command line.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// List the built-in levels
    #[arg(long, default_value_t = false)]
    ls: bool,

    /// Number or name of the built-in level to play
    #[arg(short, long, group = "source")]
    level: Option<String>,

    /// JSON file that describes the level to play
    #[arg(short, long, group = "source")]
    file: Option<PathBuf>,

    /// Play a randomly generated level
    #[arg(short, long, default_value_t = false, group = "source")]
    random: bool,

    /// Number of rows of the random level
    #[arg(long, default_value_t = random_level::DEFAULT_SIZE, requires = "random")]
    rows: usize,

    /// Number of columns of the random level
    #[arg(long, default_value_t = random_level::DEFAULT_SIZE, requires = "random")]
    cols: usize,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Continue the saved session
    #[arg(long, default_value_t = false, group = "source")]
    resume: bool,

    /// Print the cheapest route of the level
    #[arg(short, long, default_value_t = false)]
    solve: bool,

    /// Cells to activate, in order, as "row,col" pairs separated by spaces
    #[arg(short, long, allow_hyphen_values = true)]
    moves: Option<String>,

    /// How the path is cut when activating a cell already in the path
    #[arg(value_enum, long, default_value_t = BacktrackRule::Drop)]
    backtrack: BacktrackRule,

    /// Print the level in the compact text form
    #[arg(long, default_value_t = false)]
    export: bool,

    /// Print the pixel centers of the cells for the given hexagon size
    #[arg(long)]
    layout: Option<f64>,

    /// Save the session and the adventure log
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Print the adventure log
    #[arg(long, default_value_t = false)]
    history: bool,

    /// Show the board and the winning path of an adventure log entry (1 is the most recent)
    #[arg(long)]
    replay: Option<usize>,

    /// Clear the adventure log and the saved session
    #[arg(long, default_value_t = false)]
    start_over: bool,

    /// Directory for the saved session and adventure log (overrides HEXPATH_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse the `--moves` option: `"4,0 3,0 3,1"`. Spaces around the commas are allowed.
fn parse_moves(moves: &str) -> Result<Vec<Coordinate>, String> {
    let compact: String = moves
        .split(',')
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join(",");
    compact
        .split_whitespace()
        .map(|pair| {
            let (row, col) = pair
                .split_once(',')
                .ok_or_else(|| format!("{pair}: expected row,col"))?;
            let row: usize = row
                .trim()
                .parse()
                .map_err(|e| format!("{pair}: row: {e}"))?;
            let col: usize = col
                .trim()
                .parse()
                .map_err(|e| format!("{pair}: column: {e}"))?;
            Ok(Coordinate::new(row, col))
        })
        .collect()
}

/// Draw the board. Odd rows are shifted by half a cell.
///
/// Cells in the path are between brackets, and the ending cell is between angle brackets.
fn render(matrix: &CostMatrix, path: &[Coordinate], end: Coordinate) -> String {
    let mut out: String = String::new();
    for (row, costs) in matrix.rows().iter().enumerate() {
        if row % 2 == 1 {
            out.push_str("  ");
        }
        for (col, cost) in costs.iter().enumerate() {
            let coord: Coordinate = Coordinate::new(row, col);
            let (open, close) = if path.contains(&coord) {
                ('[', ']')
            } else if coord == end {
                ('<', '>')
            } else {
                (' ', ' ')
            };
            out.push_str(&format!("{open}{cost:X}{close} "));
        }
        let trimmed: usize = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

/// Read a level from a JSON file.
fn read_level(file: &Path) -> Result<Level, Box<dyn Error>> {
    let content: String = fs::read_to_string(file)?;
    let level: Level = serde_json::from_str(&content)?;
    Ok(level)
}

/// Select the level to play from the options.
///
/// Return None when the built-in first level must be played.
fn selected_level(args: &Args, rng: &mut StdRng) -> Result<Option<(Level, Option<usize>)>, String> {
    if let Some(file) = &args.file {
        let level: Level = read_level(file).map_err(|e| format!("{}: {e}", file.display()))?;
        return Ok(Some((level, None)));
    }
    if let Some(name) = &args.level {
        return match catalogue::find(name) {
            Some((index, level)) => Ok(Some((level, Some(index)))),
            None => Err(format!(
                "Unknown level {name}. Use --ls to list the available levels."
            )),
        };
    }
    if args.random {
        return Ok(Some((
            random_level::generate(args.rows, args.cols, rng),
            None,
        )));
    }
    Ok(None)
}

/// Build the [`Campaign`] object, either from the saved session or from the options.
fn build_campaign(
    args: &Args,
    history: History,
    saver: &SaverSession,
    rng: &mut StdRng,
) -> Result<Campaign, String> {
    if args.resume {
        let snapshot: Option<SessionSnapshot> = saver
            .load()
            .map_err(|e| format!("{}: {e}", saver.path().display()))?;
        match snapshot {
            Some(s) => {
                return Campaign::from_snapshot(catalogue::catalogue(), s, history)
                    .map_err(|e| format!("Cannot resume the session: {e}"));
            }
            None => println!("No saved session, starting at the first level."),
        }
    }

    let mut campaign: Campaign =
        Campaign::with_catalogue(history).map_err(|e| e.to_string())?;
    if let Some((level, index)) = selected_level(args, rng)? {
        let name: String = level.display_name().to_string();
        campaign
            .load_level(level, index)
            .map_err(|e| format!("{name}: {e}"))?;
    }
    Ok(campaign)
}

/// Return the completion date of a log entry, or the raw timestamp if it cannot be converted.
fn completion_date(entry: &GameLogEntry) -> String {
    entry.completed_at().map_or_else(
        || format!("@{}", entry.timestamp()),
        |d| d.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Print the adventure log.
fn print_history(history: &History) {
    if history.is_empty() {
        println!("The adventure log is empty.");
        return;
    }
    for entry in history.entries() {
        let date: String = completion_date(entry);
        println!(
            "{date}  {:<16} margin {:>2}  {} steps",
            entry.level_name(),
            entry.margin(),
            entry.path().len()
        );
    }
    println!("Lifetime score: {}", history.total_score());
}

/// Draw the level of an adventure log entry with its winning path.
///
/// `number` starts at 1 for the most recent entry.
fn replay_entry(history: &History, number: usize) -> Result<String, String> {
    let entry: &GameLogEntry = number
        .checked_sub(1)
        .and_then(|i| history.entries().get(i))
        .ok_or_else(|| format!("No entry {number} in the adventure log ({})", history.len()))?;
    let board: Board = entry
        .level()
        .clone()
        .prepare()
        .map_err(|e| format!("{}: {e}", entry.level_name()))?;
    Ok(format!(
        "{} ({}), won on {} with a margin of {}\n{}",
        entry.level_name(),
        entry.level_id(),
        completion_date(entry),
        entry.margin(),
        render(board.matrix(), entry.path(), board.end())
    ))
}

/// Print the cheapest route of the current level.
fn print_solution(game: &Game) {
    let board: &Board = game.board();
    match solver::solve(board.matrix(), board.start(), board.end()) {
        Ok(Solution { cost, route }) => {
            let cells: Vec<String> = route.iter().map(Coordinate::to_string).collect();
            println!("Cheapest route ({cost}): {}", cells.join(" "));
        }
        Err(e) => println!("No route: {e}"),
    }
}

/// Print the pixel centers of the cells and the size of the drawing.
fn print_layout(game: &Game, unit_size: f64) {
    for (coord, _) in game.matrix().cells() {
        let (x, y) = grid::to_pixel_center(coord.row, coord.col, unit_size);
        println!("{coord} {x:.2} {y:.2}");
    }
    let (width, height) = grid::svg_extent(game.matrix(), unit_size);
    println!("Extent: {width:.2} x {height:.2}");
}

/// Parse and process command-line options.
///
/// Return the exit code of the program.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder: env_logger::Builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
    debug!("{PKGNAME} {VERSION}");

    //
    // List the levels
    //
    if args.ls {
        for level in catalogue::catalogue() {
            println!(
                "{} {} (budget {})",
                level.id,
                level.display_name(),
                level.budget.unwrap_or_default()
            );
        }
        return 0;
    }

    let data_dir: PathBuf = match config::data_dir(args.data_dir.clone()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    debug!("Data directory: {data_dir:?}");
    let saver_session: SaverSession = SaverSession::new(data_dir.clone());
    let saver_history: SaverHistory = SaverHistory::new(data_dir);

    let history: History = match saver_history.load() {
        Ok(h) => h.unwrap_or_default(),
        Err(e) => {
            eprintln!("{}: {e}", saver_history.path().display());
            return 1;
        }
    };

    if args.history {
        print_history(&history);
        return 0;
    }
    if let Some(number) = args.replay {
        return match replay_entry(&history, number) {
            Ok(text) => {
                print!("{text}");
                0
            }
            Err(msg) => {
                eprintln!("{msg}");
                1
            }
        };
    }

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut campaign: Campaign = match build_campaign(&args, history, &saver_session, &mut rng) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };
    campaign.set_backtrack_rule(args.backtrack);

    if args.start_over {
        if let Err(e) = campaign.start_over() {
            eprintln!("{e}");
            return 1;
        }
        saver_session.delete();
        saver_history.delete();
        println!("Adventure log cleared.");
    }

    let level: &Level = campaign.game().board().level();
    println!(
        "Level {} - {} (budget {}, cheapest route {})",
        level.id,
        level.display_name(),
        campaign.game().initial_budget(),
        campaign
            .game()
            .board()
            .min_cost()
            .map_or_else(|| "none".to_string(), |c| c.to_string())
    );
    if let Some(best) = campaign.history().best_margin(&level.id) {
        println!("Best margin so far: {best}");
    }

    if args.export {
        print!("{}", gradient::encode(campaign.game().matrix()));
    }
    if let Some(unit_size) = args.layout {
        print_layout(campaign.game(), unit_size);
    }
    if args.solve {
        print_solution(campaign.game());
    }

    //
    // Replay the moves
    //
    if let Some(moves) = &args.moves {
        let coords: Vec<Coordinate> = match parse_moves(moves) {
            Ok(c) => c,
            Err(msg) => {
                eprintln!("--moves: {msg}");
                return 1;
            }
        };
        for coord in coords {
            match campaign.click(coord) {
                Ok(Move::Advanced { cost }) => {
                    println!("{coord}: -{cost}, budget {}", campaign.game().budget());
                }
                Ok(Move::Backtracked { removed }) => println!(
                    "{coord}: back {removed} cells, budget {}",
                    campaign.game().budget()
                ),
                Ok(Move::Unchanged) => println!("{coord}: no change"),
                Ok(Move::Won(entry)) => {
                    println!("{coord}: level won with a margin of {}", entry.margin());
                }
                Ok(Move::Lost) => println!("{coord}: out of budget, level lost"),
                Err(e) => println!("{coord}: rejected: {e}"),
            }
        }
    }

    let game: &Game = campaign.game();
    print!("{}", render(game.matrix(), game.path(), game.board().end()));
    println!(
        "Budget {}/{}, {}",
        campaign.game().budget(),
        campaign.game().initial_budget(),
        campaign.game().outcome()
    );

    //
    // Save the session and the log
    //
    if args.save {
        match campaign.game().outcome() {
            Outcome::InProgress => (),
            Outcome::Won => {
                if let Err(e) = campaign.next_level(&mut rng) {
                    eprintln!("{e}");
                    return 1;
                }
                println!(
                    "Next level: {}",
                    campaign.game().board().level().display_name()
                );
            }
            Outcome::Lost => campaign.reset(),
        }
        if let Err(e) = saver_session.save(&campaign.snapshot()) {
            eprintln!("{}: {e}", saver_session.path().display());
            return 1;
        }
        if let Err(e) = saver_history.save(campaign.history()) {
            eprintln!("{}: {e}", saver_history.path().display());
            return 1;
        }
    }
    0
}
