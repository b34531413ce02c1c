/*
random_level.rs

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

//! Generate a random level.
//!
//! Used when the built-in levels are exhausted. The generated level is rectangular, starts at the
//! bottom-left cell and ends at the top-right cell (both free), and every other cell costs between
//! [`MIN_RANDOM_COST`] and [`MAX_RANDOM_COST`].
//! The level has no budget: it is computed from the cheapest route when the level is prepared.

use log::debug;
use rand::Rng;

use super::{Level, LevelId};
use crate::grid::{Coordinate, CostMatrix};

/// Lowest cost of a generated cell (except the starting and ending cells).
pub const MIN_RANDOM_COST: u8 = 1;

/// Highest cost of a generated cell.
pub const MAX_RANDOM_COST: u8 = 8;

/// Default number of rows and columns.
pub const DEFAULT_SIZE: usize = 5;

/// Names given to the generated levels.
const NAMES: [&str; 8] = [
    "Misty Meadow",
    "Pebble Creek",
    "Windy Ridge",
    "Lantern Hollow",
    "Fox Trail",
    "Sunset Dunes",
    "Mossy Steps",
    "Starfall Pass",
];

/// Generate a level of `rows` by `cols` cells (at least one of each).
pub fn generate<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Level {
    let rows: usize = rows.max(1);
    let cols: usize = cols.max(1);

    let mut grid: Vec<Vec<u8>> = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| rng.random_range(MIN_RANDOM_COST..=MAX_RANDOM_COST))
                .collect()
        })
        .collect();

    let start: Coordinate = Coordinate::new(rows - 1, 0);
    let end: Coordinate = Coordinate::new(0, cols - 1);
    grid[start.row][start.col] = 0;
    grid[end.row][end.col] = 0;

    let serial: u32 = rng.random();
    let mut level: Level = Level::from_matrix(
        LevelId::Text(format!("random-{serial:08x}")),
        CostMatrix::new(grid),
    );
    level.description = Some(NAMES[rng.random_range(0..NAMES.len())].to_string());
    level.start = Some(start);
    level.end = Some(end);
    debug!("Generated level {} ({rows}x{cols})", level.id);
    level
}
