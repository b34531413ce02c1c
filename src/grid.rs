/*
grid.rs

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

//! Hexagonal grid model.
//!
//! The grid uses the "odd-r" horizontal layout: odd rows are shifted half a cell to the right.
//! Rows may have different lengths (jagged grid), so a coordinate is always checked against the
//! length of its own row.
//!
//! ```text
//!  0,0  0,1  0,2
//!     1,0  1,1  1,2
//!  2,0  2,1  2,2
//! ```

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a coordinate from signed components, or None if one of them is negative.
    fn from_signed(row: isize, col: isize) -> Option<Self> {
        if row < 0 || col < 0 {
            None
        } else {
            Some(Self::new(row as usize, col as usize))
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Whether two coordinates designate the same cell.
pub fn is_same_coord(a: Coordinate, b: Coordinate) -> bool {
    a == b
}

/// Movement costs, one row per line of the level.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CostMatrix {
    rows: Vec<Vec<u8>>,
}

impl From<Vec<Vec<u8>>> for CostMatrix {
    fn from(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }
}

impl CostMatrix {
    /// Create a [`CostMatrix`] object.
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the given row, or 0 if the row does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Number of cells in the widest row.
    pub fn widest_row(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the coordinate designates a cell of the matrix.
    pub fn is_valid(&self, coord: Coordinate) -> bool {
        coord.col < self.row_len(coord.row)
    }

    /// Return the cost of entering the cell, or None if the cell does not exist.
    pub fn cost(&self, coord: Coordinate) -> Option<u8> {
        self.rows.get(coord.row)?.get(coord.col).copied()
    }

    /// Return the rows of the matrix.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Iterate over all the cells as `(coordinate, cost)` pairs, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cost)| (Coordinate::new(r, c), *cost))
        })
    }

    /// Print the matrix in the debug log, shifting odd rows to show the hexagonal layout.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!("  rows: {}", self.num_rows());
        debug!(" width: {}", self.widest_row());
        let mut s: String = String::new();
        for (r, row) in self.rows.iter().enumerate() {
            s.clear();
            if r % 2 == 1 {
                s.push_str("  ");
            }
            for cost in row {
                s.push_str(&format!("{cost:^4X}"));
            }
            debug!("{s}");
        }
    }
}

/// Cells adjacent to a given cell, by direction.
///
/// A direction is None when the neighbor would fall outside the matrix.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Adjacent {
    pub w: Option<Coordinate>,
    pub nw: Option<Coordinate>,
    pub ne: Option<Coordinate>,
    pub e: Option<Coordinate>,
    pub se: Option<Coordinate>,
    pub sw: Option<Coordinate>,
}

impl Adjacent {
    /// Compute the cells adjacent to `coord` in the given matrix.
    pub fn of(coord: Coordinate, matrix: &CostMatrix) -> Self {
        let row: isize = coord.row as isize;
        let col: isize = coord.col as isize;

        // Odd rows are shifted right, so their diagonal neighbors sit one column further right
        let (left, right): (isize, isize) = if coord.row % 2 == 1 {
            (col, col + 1)
        } else {
            (col - 1, col)
        };

        let cell = |r: isize, c: isize| -> Option<Coordinate> {
            Coordinate::from_signed(r, c).filter(|n| matrix.is_valid(*n))
        };

        Self {
            w: cell(row, col - 1),
            nw: cell(row - 1, left),
            ne: cell(row - 1, right),
            e: cell(row, col + 1),
            se: cell(row + 1, right),
            sw: cell(row + 1, left),
        }
    }

    /// Iterate over the existing neighbors, clockwise from west.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> {
        [self.w, self.nw, self.ne, self.e, self.se, self.sw]
            .into_iter()
            .flatten()
    }

    /// Whether the given cell is one of the neighbors.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.iter().any(|n| n == coord)
    }
}

/// Return the cells adjacent to `coord` (at most six).
pub fn neighbors(coord: Coordinate, matrix: &CostMatrix) -> Vec<Coordinate> {
    Adjacent::of(coord, matrix).iter().collect()
}

/// Whether two cells of the matrix are adjacent.
pub fn is_adjacent(a: Coordinate, b: Coordinate, matrix: &CostMatrix) -> bool {
    matrix.is_valid(a) && Adjacent::of(a, matrix).contains(b)
}

/// Return the pixel position of the center of a cell.
///
/// `unit_size` is the distance between the center and a corner of the hexagon.
pub fn to_pixel_center(row: usize, col: usize, unit_size: f64) -> (f64, f64) {
    let shift: f64 = if row % 2 == 1 { 0.5 } else { 0.0 };
    let x: f64 = unit_size * 3f64.sqrt() * (col as f64 + shift);
    let y: f64 = unit_size * 1.5 * row as f64;
    (x, y)
}

/// Return the width and height of the drawing area needed to display the whole matrix, including
/// a one-unit margin.
pub fn svg_extent(matrix: &CostMatrix, unit_size: f64) -> (f64, f64) {
    let max_cols: f64 = matrix.widest_row().max(1) as f64;
    let rows: f64 = matrix.num_rows() as f64;
    let width: f64 = (max_cols + 0.5) * 3f64.sqrt() * unit_size + unit_size;
    let height: f64 = (rows * 1.5 + 0.5) * unit_size + unit_size;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CostMatrix {
        CostMatrix::new(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]])
    }

    #[test]
    fn same_coordinates() {
        assert!(is_same_coord(Coordinate::new(0, 0), Coordinate::new(0, 0)));
        assert!(!is_same_coord(Coordinate::new(0, 0), Coordinate::new(1, 0)));
    }

    #[test]
    fn even_row_neighbors() {
        let n: Vec<Coordinate> = neighbors(Coordinate::new(0, 1), &square());
        assert_eq!(n.len(), 4);
        for c in [(0, 0), (0, 2), (1, 0), (1, 1)] {
            assert!(n.contains(&Coordinate::new(c.0, c.1)), "missing {c:?}");
        }
    }

    #[test]
    fn odd_row_neighbors() {
        let n: Vec<Coordinate> = neighbors(Coordinate::new(1, 1), &square());
        assert_eq!(n.len(), 6);
        for c in [(1, 0), (1, 2), (0, 1), (0, 2), (2, 1), (2, 2)] {
            assert!(n.contains(&Coordinate::new(c.0, c.1)), "missing {c:?}");
        }
    }

    #[test]
    fn jagged_bounds() {
        let m: CostMatrix = CostMatrix::new(vec![vec![1, 2, 3], vec![4, 5], vec![6]]);
        assert!(!neighbors(Coordinate::new(1, 1), &m).contains(&Coordinate::new(2, 2)));
        assert!(!neighbors(Coordinate::new(0, 2), &m).contains(&Coordinate::new(1, 2)));
        assert_eq!(neighbors(Coordinate::new(2, 0), &m).len(), 2);
    }

    #[test]
    fn adjacent_directions() {
        let a: Adjacent = Adjacent::of(Coordinate::new(1, 0), &square());
        assert_eq!(a.w, None);
        assert_eq!(a.nw, Some(Coordinate::new(0, 0)));
        assert_eq!(a.ne, Some(Coordinate::new(0, 1)));
        assert_eq!(a.e, Some(Coordinate::new(1, 1)));
        assert_eq!(a.se, Some(Coordinate::new(2, 1)));
        assert_eq!(a.sw, Some(Coordinate::new(2, 0)));
    }

    #[test]
    fn invalid_cell_is_not_adjacent() {
        assert!(!is_adjacent(Coordinate::new(5, 5), Coordinate::new(0, 0), &square()));
    }

    #[test]
    fn pixel_centers() {
        let (x, y) = to_pixel_center(1, 2, 10.0);
        assert!((x - 10.0 * 3f64.sqrt() * 2.5).abs() < 1e-9);
        assert!((y - 15.0).abs() < 1e-9);
        assert_eq!(to_pixel_center(0, 0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn visual_and_graph_adjacency_agree() {
        let m: CostMatrix = CostMatrix::new(vec![vec![0; 5], vec![0; 4], vec![0; 5], vec![0; 2]]);
        let size: f64 = 7.0;
        let step: f64 = size * 3f64.sqrt();
        for (a, _) in m.cells() {
            for (b, _) in m.cells() {
                if a == b {
                    continue;
                }
                let (ax, ay) = to_pixel_center(a.row, a.col, size);
                let (bx, by) = to_pixel_center(b.row, b.col, size);
                let d: f64 = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
                assert_eq!(
                    (d - step).abs() < 1e-6,
                    is_adjacent(a, b, &m),
                    "{a} and {b} disagree"
                );
            }
        }
    }

    #[test]
    fn extent_of_empty_matrix() {
        let (w, h) = svg_extent(&CostMatrix::default(), 100.0);
        assert!((w - (1.5 * 3f64.sqrt() * 100.0 + 100.0)).abs() < 1e-9);
        assert!((h - 150.0).abs() < 1e-9);
    }
}
