/*
gradient.rs

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

//! Parse the compact text form of a level.
//!
//! Each non-blank line is a row and each character of the line is the cost of one cell, as a
//! hexadecimal digit:
//!
//! ```text
//!   32320
//!   21411
//!   22242
//!   15112
//!   01233
//! ```
//!
//! Lines are trimmed, blank lines are ignored, and rows keep their own length (jagged grids).
//! Characters that are not hexadecimal digits count as 0.

use log::debug;

use crate::grid::CostMatrix;

/// Expand the text into a cost matrix.
pub fn parse(gradient: &str) -> CostMatrix {
    let rows: Vec<Vec<u8>> = gradient
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(cell_cost).collect())
        .collect();
    debug!("Parsed {} rows from the level text", rows.len());
    CostMatrix::new(rows)
}

/// Return the text form of a cost matrix, one line per row, with uppercase digits.
///
/// Costs above 15 cannot be represented and are written as `F`.
pub fn encode(matrix: &CostMatrix) -> String {
    matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cost| {
                    char::from_digit(u32::from((*cost).min(15)), 16)
                        .unwrap_or('F')
                        .to_ascii_uppercase()
                })
                .collect::<String>()
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Cost of a single character.
fn cell_cost(c: char) -> u8 {
    // to_digit(16) returns values lower than 16
    c.to_digit(16).map_or(0, |d| d as u8)
}
