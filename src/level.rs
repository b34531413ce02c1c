/*
level.rs

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

//! Levels and their preparation for play.
//!
//! A [`Level`] is what a level loader provides: an identifier, an optional name and budget, and
//! the costs of the cells, either as a matrix or as a compact text (see [`gradient`]).
//! Before a level can be played, it is normalized (the text is expanded into a matrix) and
//! prepared into a [`Board`] that carries the resolved starting and ending cells and the initial
//! budget.
//!
//! Levels come from the built-in [`catalogue`], from [`random_level`], or from JSON files using
//! the same shape as the persisted snapshots:
//!
//! ```json
//! { "id": 3, "description": "Jagged Valley", "budget": 15,
//!   "gradient": "44320\n352\n22153\n3161\n02124",
//!   "start": { "row": 4, "col": 0 }, "end": { "row": 0, "col": 4 } }
//! ```

pub mod catalogue;
pub mod gradient;
pub mod random_level;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::config::{BUFFER_COST, FALLBACK_BUDGET};
use crate::grid::{Coordinate, CostMatrix};
use crate::solver::{self, Solution, SolverError};

/// Highest cost a cell can have.
pub const MAX_COST: u8 = 15;

/// Level identifier, either a number or a string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum LevelId {
    Number(i64),
    Text(String),
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelId::Number(n) => write!(f, "{n}"),
            LevelId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Cell costs of a level, as provided by the level loader.
///
/// - `Matrix` is the expanded form, serialized as the `grid` field.
/// - `Text` is the compact form, serialized as the `gradient` field, which must be expanded by
///   [`Level::normalize`] before play.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LevelSource {
    Matrix { grid: CostMatrix },
    Text { gradient: String },
}

/// Errors that prevent a level from being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The level has no cells.
    EmptyGrid,

    /// The starting cell is not in the grid.
    StartOutOfBounds(Coordinate),

    /// The ending cell is not in the grid.
    EndOutOfBounds(Coordinate),

    /// A cell cost is greater than [`MAX_COST`].
    CostOutOfRange { coord: Coordinate, cost: u8 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::EmptyGrid => write!(f, "the level has no cells"),
            LevelError::StartOutOfBounds(c) => write!(f, "starting cell {c} is not in the grid"),
            LevelError::EndOutOfBounds(c) => write!(f, "ending cell {c} is not in the grid"),
            LevelError::CostOutOfRange { coord, cost } => {
                write!(f, "cell {coord} costs {cost} (maximum is {MAX_COST})")
            }
        }
    }
}

impl Error for LevelError {}

/// Level description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Level identifier.
    pub id: LevelId,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Budget for the level. When missing or not positive, the budget is computed from the
    /// cheapest route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,

    /// Cell costs.
    #[serde(flatten)]
    pub source: LevelSource,

    /// Starting cell. Defaults to the first cell of the last row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,

    /// Ending cell. Defaults to the top row, at the column of the last cell of the widest row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
}

impl Level {
    /// Create a [`Level`] object from a cost matrix.
    pub fn from_matrix(id: LevelId, grid: CostMatrix) -> Self {
        Self {
            id,
            description: None,
            budget: None,
            source: LevelSource::Matrix { grid },
            start: None,
            end: None,
        }
    }

    /// Create a [`Level`] object from the compact text form.
    pub fn from_gradient(id: LevelId, gradient: &str) -> Self {
        Self {
            id,
            description: None,
            budget: None,
            source: LevelSource::Text {
                gradient: gradient.to_string(),
            },
            start: None,
            end: None,
        }
    }

    /// Expand the compact text form into a matrix.
    ///
    /// Levels that already have a matrix are returned unchanged, so normalizing twice is the same
    /// as normalizing once.
    pub fn normalize(self) -> Self {
        let grid: CostMatrix = match &self.source {
            LevelSource::Matrix { .. } => return self,
            LevelSource::Text { gradient } => gradient::parse(gradient),
        };
        Self {
            source: LevelSource::Matrix { grid },
            ..self
        }
    }

    /// Return the cost matrix, or None if the level is not normalized yet.
    pub fn matrix(&self) -> Option<&CostMatrix> {
        match &self.source {
            LevelSource::Matrix { grid } => Some(grid),
            LevelSource::Text { .. } => None,
        }
    }

    /// Name used in the adventure log.
    pub fn display_name(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(crate::config::DEFAULT_LEVEL_NAME)
    }

    /// Normalize the level, resolve its starting and ending cells, and compute its budget.
    ///
    /// # Errors
    ///
    /// The method returns an error when the grid is empty, when a cell costs more than
    /// [`MAX_COST`], or when the starting or ending cells are outside the grid.
    pub fn prepare(self) -> Result<Board, LevelError> {
        Board::new(self)
    }
}

/// Starting cell when the level does not define one.
pub fn default_start(matrix: &CostMatrix) -> Coordinate {
    Coordinate::new(matrix.num_rows().saturating_sub(1), 0)
}

/// Ending cell when the level does not define one.
pub fn default_end(matrix: &CostMatrix) -> Coordinate {
    Coordinate::new(0, matrix.widest_row().saturating_sub(1))
}

/// Compute the budget of a level.
///
/// A positive `supplied` budget is used as is. Otherwise the budget is the cost of the cheapest
/// route plus [`BUFFER_COST`], or [`FALLBACK_BUDGET`] when there is no route.
pub fn initial_budget(supplied: Option<i64>, cheapest: Result<&Solution, &SolverError>) -> u32 {
    if let Some(b) = supplied
        && b > 0
    {
        return u32::try_from(b).unwrap_or(u32::MAX);
    }
    match cheapest {
        Ok(s) => s.cost.saturating_add(BUFFER_COST),
        Err(e) => {
            warn!("Unsolvable level ({e}): using the fallback budget of {FALLBACK_BUDGET}");
            FALLBACK_BUDGET
        }
    }
}

/// Level ready to be played.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Normalized level.
    level: Level,

    /// Copy of the level's matrix.
    matrix: CostMatrix,

    /// Starting cell.
    start: Coordinate,

    /// Ending cell.
    end: Coordinate,

    /// Budget at the beginning of each attempt.
    initial_budget: u32,

    /// Cost of the cheapest route, if any.
    min_cost: Option<u32>,
}

impl Board {
    /// Create a [`Board`] object. See [`Level::prepare`].
    pub fn new(level: Level) -> Result<Self, LevelError> {
        let level: Level = level.normalize();
        let matrix: CostMatrix = level.matrix().cloned().unwrap_or_default();

        if matrix.cells().next().is_none() {
            return Err(LevelError::EmptyGrid);
        }
        if let Some((coord, cost)) = matrix.cells().find(|(_, cost)| *cost > MAX_COST) {
            return Err(LevelError::CostOutOfRange { coord, cost });
        }

        let start: Coordinate = level.start.unwrap_or_else(|| default_start(&matrix));
        let end: Coordinate = level.end.unwrap_or_else(|| default_end(&matrix));
        if !matrix.is_valid(start) {
            return Err(LevelError::StartOutOfBounds(start));
        }
        if !matrix.is_valid(end) {
            return Err(LevelError::EndOutOfBounds(end));
        }

        matrix.debug();
        let cheapest: Result<Solution, SolverError> = solver::solve(&matrix, start, end);
        let initial_budget: u32 = initial_budget(level.budget, cheapest.as_ref());
        let min_cost: Option<u32> = cheapest.ok().map(|s| s.cost);
        debug!(
            "Level {}: start {start}, end {end}, cheapest {min_cost:?}, budget {initial_budget}",
            level.id
        );

        Ok(Self {
            level,
            matrix,
            start,
            end,
            initial_budget,
            min_cost,
        })
    }

    /// Return the normalized level.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Return the cost matrix.
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Return the starting cell.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Return the ending cell.
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Return the budget at the beginning of each attempt.
    pub fn initial_budget(&self) -> u32 {
        self.initial_budget
    }

    /// Return the cost of the cheapest route, or None if the level cannot be solved.
    pub fn min_cost(&self) -> Option<u32> {
        self.min_cost
    }

    /// Return the cost of entering the given cell, or None if the cell does not exist.
    pub fn cost(&self, coord: Coordinate) -> Option<u32> {
        self.matrix.cost(coord).map(u32::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_level(gradient: &str) -> Level {
        Level::from_gradient(LevelId::Number(1), gradient)
    }

    #[test]
    fn normalize_expands_text() {
        let level: Level = text_level("12\n34").normalize();
        assert_eq!(
            level.matrix(),
            Some(&CostMatrix::new(vec![vec![1, 2], vec![3, 4]]))
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let once: Level = text_level("12\n345").normalize();
        let twice: Level = once.clone().normalize();
        assert_eq!(once, twice);

        let matrix: Level =
            Level::from_matrix(LevelId::Number(2), CostMatrix::new(vec![vec![7, 8]]));
        assert_eq!(matrix.clone().normalize(), matrix);
    }

    #[test]
    fn default_start_and_end() {
        let board: Board = text_level("1234\n45\n678").prepare().unwrap();
        assert_eq!(board.start(), Coordinate::new(2, 0));
        assert_eq!(board.end(), Coordinate::new(0, 3));
    }

    #[test]
    fn supplied_budget_wins() {
        let mut level: Level = text_level("01\n10");
        level.budget = Some(7);
        assert_eq!(level.prepare().unwrap().initial_budget(), 7);
    }

    #[test]
    fn computed_budget_adds_buffer() {
        for budget in [None, Some(0), Some(-4)] {
            let mut level: Level = text_level("0513\n2910");
            level.budget = budget;
            let board: Board = level.prepare().unwrap();
            assert_eq!(board.min_cost(), Some(board.initial_budget() - BUFFER_COST));
        }
    }

    #[test]
    fn unsolvable_level_uses_fallback() {
        let level: Level = Level::from_matrix(
            LevelId::Text("split".to_string()),
            CostMatrix::new(vec![vec![0, 1], vec![], vec![1, 0]]),
        );
        let board: Board = level.prepare().unwrap();
        assert_eq!(board.min_cost(), None);
        assert_eq!(board.initial_budget(), FALLBACK_BUDGET);
    }

    #[test]
    fn invalid_levels() {
        assert_eq!(text_level("").prepare().unwrap_err(), LevelError::EmptyGrid);

        let mut level: Level = text_level("123\n4");
        level.start = Some(Coordinate::new(1, 1));
        assert_eq!(
            level.prepare().unwrap_err(),
            LevelError::StartOutOfBounds(Coordinate::new(1, 1))
        );

        // The default end uses the widest row, which is not the top row here
        assert_eq!(
            text_level("1\n234").prepare().unwrap_err(),
            LevelError::EndOutOfBounds(Coordinate::new(0, 2))
        );

        let level: Level =
            Level::from_matrix(LevelId::Number(9), CostMatrix::new(vec![vec![0, 16]]));
        assert_eq!(
            level.prepare().unwrap_err(),
            LevelError::CostOutOfRange {
                coord: Coordinate::new(0, 1),
                cost: 16
            }
        );
    }

    #[test]
    fn json_shapes() {
        let text: Level = serde_json::from_str(
            r#"{"id": 3, "description": "Jagged Valley", "budget": 15, "gradient": "44\n3"}"#,
        )
        .unwrap();
        assert_eq!(text.id, LevelId::Number(3));
        assert!(text.matrix().is_none());

        let matrix: Level = serde_json::from_str(
            r#"{"id": "ai-7", "grid": [[0, 1], [2]], "end": {"row": 0, "col": 1}}"#,
        )
        .unwrap();
        assert_eq!(matrix.id, LevelId::Text("ai-7".to_string()));
        assert_eq!(matrix.budget, None);
        assert_eq!(matrix.end, Some(Coordinate::new(0, 1)));
        assert!(matrix.matrix().is_some());

        let back: Level = serde_json::from_str(&serde_json::to_string(&matrix).unwrap()).unwrap();
        assert_eq!(back, matrix);
    }

    #[test]
    fn display_name_fallback() {
        let mut level: Level = text_level("0");
        assert_eq!(level.display_name(), "Mystery Map");
        level.description = Some("The Beginning".to_string());
        assert_eq!(level.display_name(), "The Beginning");
    }
}
