/*
path.rs

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

//! Path drawn by the player across the grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::grid::{Coordinate, CostMatrix};

/// Path object.
///
/// The path is serialized as the ordered list of its cells.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<Coordinate>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coordinate>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl From<Vec<Coordinate>> for Path {
    fn from(path: Vec<Coordinate>) -> Self {
        let visited: HashSet<Coordinate> = path.iter().copied().collect();
        Self { path, visited }
    }
}

impl From<Path> for Vec<Coordinate> {
    fn from(path: Path) -> Self {
        path.path
    }
}

impl Path {
    /// Create a [`Path`] object that contains only the starting cell.
    pub fn new(start: Coordinate) -> Self {
        Self::from(vec![start])
    }

    /// Add a cell to the path.
    pub fn push(&mut self, coord: Coordinate) {
        self.path.push(coord);
        self.visited.insert(coord);
    }

    /// Keep the first `len` cells and drop the others.
    pub fn truncate(&mut self, len: usize) {
        for c in self.path.drain(len.min(self.path.len())..) {
            self.visited.remove(&c);
        }
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.visited.contains(&coord)
    }

    /// Return the position of the given cell in the path.
    pub fn position(&self, coord: Coordinate) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        self.path.iter().position(|c| *c == coord)
    }

    /// Return the cells of the path.
    pub fn get(&self) -> &[Coordinate] {
        &self.path
    }

    /// Return the last cell of the path.
    pub fn last(&self) -> Option<Coordinate> {
        self.path.last().copied()
    }

    /// Return the total cost of the cells entered by the path (all cells but the first one).
    pub fn cost(&self, matrix: &CostMatrix) -> u32 {
        self.path
            .iter()
            .skip(1)
            .map(|c| matrix.cost(*c).map_or(0, u32::from))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn push_and_truncate() {
        let mut path: Path = Path::new(c(2, 0));
        path.push(c(1, 0));
        path.push(c(1, 1));
        path.push(c(0, 1));
        assert_eq!(path.position(c(1, 1)), Some(2));

        path.truncate(2);
        assert_eq!(path.get(), &[c(2, 0), c(1, 0)]);
        assert!(!path.contains(c(1, 1)));
        assert!(!path.contains(c(0, 1)));
        assert_eq!(path.last(), Some(c(1, 0)));

        path.truncate(10);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn cost_skips_the_first_cell() {
        let matrix: CostMatrix = CostMatrix::new(vec![vec![5, 2], vec![9, 3]]);
        let mut path: Path = Path::new(c(1, 0));
        assert_eq!(path.cost(&matrix), 0);
        path.push(c(1, 1));
        path.push(c(0, 1));
        assert_eq!(path.cost(&matrix), 5);
    }

    #[test]
    fn serialized_as_a_list() {
        let mut path: Path = Path::new(c(1, 0));
        path.push(c(0, 0));
        let json: String = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"row":1,"col":0},{"row":0,"col":0}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(back.contains(c(0, 0)));
    }
}
