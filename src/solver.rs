/*
solver.rs

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

//! Find the cheapest route between two cells.
//!
//! The cost of a route is the sum of the costs of the cells it enters. The starting cell is never
//! charged. The result is used to compute a fair budget for levels that do not provide one.

use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::error::Error;
use std::fmt;

use crate::grid::{self, Coordinate, CostMatrix};

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The starting cell is not in the matrix.
    InvalidStart(Coordinate),

    /// The ending cell is not in the matrix.
    InvalidEnd(Coordinate),

    /// The two cells are not connected.
    NoPath,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::InvalidStart(c) => write!(f, "starting cell {c} is outside the grid"),
            SolverError::InvalidEnd(c) => write!(f, "ending cell {c} is outside the grid"),
            SolverError::NoPath => write!(f, "no path between the starting and ending cells"),
        }
    }
}

impl Error for SolverError {}

/// Cheapest route found by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Total cost of the route.
    pub cost: u32,

    /// Cells of the route, from the starting cell to the ending cell (both included).
    pub route: Vec<Coordinate>,
}

/// Per-cell search state, laid out like the matrix (jagged).
struct Table<T> {
    cells: Vec<Vec<T>>,
}

impl<T: Copy> Table<T> {
    fn new(matrix: &CostMatrix, value: T) -> Self {
        Self {
            cells: matrix.rows().iter().map(|r| vec![value; r.len()]).collect(),
        }
    }

    fn get(&self, coord: Coordinate) -> T {
        self.cells[coord.row][coord.col]
    }

    fn set(&mut self, coord: Coordinate, value: T) {
        self.cells[coord.row][coord.col] = value;
    }
}

/// Return the cheapest route from `start` to `end`.
///
/// # Errors
///
/// The function returns an error when `start` or `end` are outside the matrix, or when no route
/// connects them.
pub fn solve(
    matrix: &CostMatrix,
    start: Coordinate,
    end: Coordinate,
) -> Result<Solution, SolverError> {
    if !matrix.is_valid(start) {
        return Err(SolverError::InvalidStart(start));
    }
    if !matrix.is_valid(end) {
        return Err(SolverError::InvalidEnd(end));
    }

    let mut dist: Table<u32> = Table::new(matrix, u32::MAX);
    let mut prev: Table<Option<Coordinate>> = Table::new(matrix, None);
    dist.set(start, 0);

    // The frontier may hold several entries for the same cell. Entries that are more expensive
    // than the recorded distance are stale and skipped.
    let mut frontier: BinaryHeap<Reverse<(u32, usize, usize)>> = BinaryHeap::new();
    frontier.push(Reverse((0, start.row, start.col)));

    let mut iteration: usize = 0;
    while let Some(Reverse((cost, row, col))) = frontier.pop() {
        let coord: Coordinate = Coordinate::new(row, col);
        if cost > dist.get(coord) {
            continue;
        }
        iteration += 1;

        if coord == end {
            debug!("Route {start} -> {end}: cost {cost} after {iteration} iterations");
            return Ok(Solution {
                cost,
                route: build_route(&prev, start, end),
            });
        }

        for n in grid::neighbors(coord, matrix) {
            let step: u32 = matrix.cost(n).map_or(0, u32::from);
            let new_cost: u32 = cost.saturating_add(step);
            if new_cost < dist.get(n) {
                dist.set(n, new_cost);
                prev.set(n, Some(coord));
                frontier.push(Reverse((new_cost, n.row, n.col)));
            }
        }
    }

    debug!("No route {start} -> {end} after {iteration} iterations");
    Err(SolverError::NoPath)
}

/// Return the cost of the cheapest route from `start` to `end`, or `-1` if there is none.
pub fn min_path_cost(matrix: &CostMatrix, start: Coordinate, end: Coordinate) -> i64 {
    match solve(matrix, start, end) {
        Ok(s) => i64::from(s.cost),
        Err(_) => -1,
    }
}

/// Walk the predecessor table back from the ending cell.
fn build_route(
    prev: &Table<Option<Coordinate>>,
    start: Coordinate,
    end: Coordinate,
) -> Vec<Coordinate> {
    let mut route: Vec<Coordinate> = vec![end];
    let mut current: Coordinate = end;
    while current != start {
        match prev.get(current) {
            Some(p) => {
                route.push(p);
                current = p;
            }
            None => break,
        }
    }
    route.reverse();
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> CostMatrix {
        CostMatrix::new(vec![
            vec![3, 2, 3, 2, 0],
            vec![2, 1, 4, 1, 1],
            vec![2, 2, 2, 4, 2],
            vec![1, 5, 1, 1, 2],
            vec![0, 1, 2, 3, 3],
        ])
    }

    /// Exhaustive search over simple paths.
    fn brute_force(matrix: &CostMatrix, start: Coordinate, end: Coordinate) -> Option<u32> {
        fn walk(
            m: &CostMatrix,
            at: Coordinate,
            end: Coordinate,
            cost: u32,
            seen: &mut Vec<Coordinate>,
            best: &mut Option<u32>,
        ) {
            if best.is_some_and(|b| cost >= b) && at != end {
                return;
            }
            if at == end {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for n in grid::neighbors(at, m) {
                if seen.contains(&n) {
                    continue;
                }
                seen.push(n);
                walk(m, n, end, cost + u32::from(m.cost(n).unwrap()), seen, best);
                seen.pop();
            }
        }
        let mut best: Option<u32> = None;
        walk(matrix, start, end, 0, &mut vec![start], &mut best);
        best
    }

    #[test]
    fn reference_grid_matches_brute_force() {
        let m: CostMatrix = reference();
        let start: Coordinate = Coordinate::new(4, 0);
        let end: Coordinate = Coordinate::new(0, 4);
        let expected: u32 = brute_force(&m, start, end).unwrap();
        let solution: Solution = solve(&m, start, end).unwrap();
        assert_eq!(solution.cost, expected);
        assert_eq!(min_path_cost(&m, start, end), i64::from(expected));
    }

    #[test]
    fn route_is_connected_and_costs_what_it_says() {
        let m: CostMatrix = reference();
        let solution: Solution = solve(&m, Coordinate::new(4, 0), Coordinate::new(0, 4)).unwrap();
        assert_eq!(solution.route.first(), Some(&Coordinate::new(4, 0)));
        assert_eq!(solution.route.last(), Some(&Coordinate::new(0, 4)));
        for pair in solution.route.windows(2) {
            assert!(grid::is_adjacent(pair[0], pair[1], &m));
        }
        let total: u32 = solution.route[1..]
            .iter()
            .map(|c| u32::from(m.cost(*c).unwrap()))
            .sum();
        assert_eq!(total, solution.cost);
    }

    #[test]
    fn start_equals_end() {
        let m: CostMatrix = reference();
        let s: Solution = solve(&m, Coordinate::new(2, 2), Coordinate::new(2, 2)).unwrap();
        assert_eq!(s.cost, 0);
        assert_eq!(s.route, vec![Coordinate::new(2, 2)]);
    }

    #[test]
    fn out_of_bounds() {
        let m: CostMatrix = reference();
        assert_eq!(min_path_cost(&m, Coordinate::new(5, 0), Coordinate::new(0, 4)), -1);
        assert_eq!(min_path_cost(&m, Coordinate::new(4, 5), Coordinate::new(0, 4)), -1);
        assert_eq!(min_path_cost(&m, Coordinate::new(4, 0), Coordinate::new(0, 5)), -1);
        assert_eq!(
            solve(&m, Coordinate::new(9, 9), Coordinate::new(0, 0)),
            Err(SolverError::InvalidStart(Coordinate::new(9, 9)))
        );
    }

    #[test]
    fn jagged_out_of_bounds_for_row() {
        let m: CostMatrix = CostMatrix::new(vec![vec![1, 2, 3], vec![4, 5], vec![6]]);
        assert_eq!(min_path_cost(&m, Coordinate::new(2, 1), Coordinate::new(0, 0)), -1);
        assert_eq!(min_path_cost(&m, Coordinate::new(2, 0), Coordinate::new(1, 2)), -1);
        assert_eq!(min_path_cost(&m, Coordinate::new(2, 0), Coordinate::new(0, 2)), 9);
    }

    #[test]
    fn disconnected_grid() {
        let m: CostMatrix = CostMatrix::new(vec![vec![1, 1], vec![], vec![1, 1]]);
        assert_eq!(
            solve(&m, Coordinate::new(2, 0), Coordinate::new(0, 1)),
            Err(SolverError::NoPath)
        );
    }

    #[test]
    fn cheaper_detour_wins() {
        // The direct row costs 9 + 0, the detour through row 1 costs 1 + 1 + 0
        let m: CostMatrix = CostMatrix::new(vec![vec![0, 9, 0], vec![1, 1, 1]]);
        let s: Solution = solve(&m, Coordinate::new(0, 0), Coordinate::new(0, 2)).unwrap();
        assert_eq!(s.cost, 2);
    }
}
