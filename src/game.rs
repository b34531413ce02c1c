/*
game.rs

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

//! Manage the status of a level attempt.
//!
//! The [`Game`] object owns the player's path and the remaining budget. The only player action is
//! activating a cell ([`Game::apply_click`]):
//!
//! - Activating a cell already in the path backtracks: the path is cut at that cell and the
//!   budget is recomputed. Activating the starting cell does nothing.
//! - Activating a new cell adjacent to the end of the path extends the path, if the budget allows
//!   it.
//!
//! After each extension, reaching the ending cell wins the level, even when that uses up the whole
//! budget. Otherwise, running out of budget loses the level.
//! [`Game::reset`] restarts the attempt.

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use strum_macros::Display;

use crate::grid::{self, Coordinate, CostMatrix};
use crate::history::GameLogEntry;
use crate::level::Board;
use crate::path::Path;

/// Status of the attempt.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Display)]
pub enum Outcome {
    #[default]
    #[strum(to_string = "in progress")]
    InProgress,
    #[strum(to_string = "won")]
    Won,
    #[strum(to_string = "lost")]
    Lost,
}

/// Where the path is cut when the player activates a cell already in the path.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum BacktrackRule {
    /// The activated cell and all the following cells are removed.
    #[default]
    Drop,

    /// The activated cell stays in the path; only the following cells are removed.
    Keep,
}

/// Effect of an accepted activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Move {
    /// The path was extended by one cell that cost `cost`.
    Advanced { cost: u32 },

    /// The path was cut and `removed` cells were dropped.
    Backtracked { removed: usize },

    /// Nothing changed (the starting cell, or a cut that had already been made).
    Unchanged,

    /// The path reached the ending cell. The entry holds the margin (the score).
    Won(GameLogEntry),

    /// The budget ran out before reaching the ending cell.
    Lost,
}

/// Reasons for rejecting an activation. The attempt is left unchanged.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The attempt is over; [`Game::reset`] must be called first.
    GameOver(Outcome),

    /// The cell is not in the grid.
    OutOfBounds(Coordinate),

    /// The cell is not in the path and is not adjacent to the last cell of the path.
    NotAdjacent(Coordinate),

    /// Entering the cell would cost more than the remaining budget.
    InsufficientBudget { cost: u32, budget: u32 },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::GameOver(o) => write!(f, "the level is {o}, restart it to play again"),
            MoveError::OutOfBounds(c) => write!(f, "cell {c} is not in the grid"),
            MoveError::NotAdjacent(c) => write!(f, "cell {c} is not next to the path"),
            MoveError::InsufficientBudget { cost, budget } => {
                write!(f, "not enough budget: the cell costs {cost}, {budget} left")
            }
        }
    }
}

impl Error for MoveError {}

/// Manage the status of the level attempt.
#[derive(Debug, Clone)]
pub struct Game {
    /// Level details.
    board: Board,

    /// Budget at the beginning of the attempt.
    initial_budget: u32,

    /// Current path. Always starts with the starting cell.
    path: Path,

    /// Remaining budget.
    budget: u32,

    /// Status of the attempt.
    outcome: Outcome,

    /// Backtracking behavior.
    backtrack: BacktrackRule,
}

impl Game {
    /// Create a [`Game`] object for the given level, with the level's budget.
    pub fn new(board: Board) -> Self {
        let initial_budget: u32 = board.initial_budget();
        Self::with_budget(board, initial_budget)
    }

    /// Create a [`Game`] object with an explicit initial budget.
    pub fn with_budget(board: Board, initial_budget: u32) -> Self {
        Self {
            path: Path::new(board.start()),
            board,
            initial_budget,
            budget: initial_budget,
            outcome: Outcome::InProgress,
            backtrack: BacktrackRule::default(),
        }
    }

    /// Select how backtracking cuts the path.
    pub fn set_backtrack_rule(&mut self, rule: BacktrackRule) {
        self.backtrack = rule;
    }

    /// Restart the attempt: the path only contains the starting cell and the budget is restored.
    pub fn reset(&mut self) {
        self.path = Path::new(self.board.start());
        self.budget = self.initial_budget;
        self.outcome = Outcome::InProgress;
        debug!("Attempt reset, budget {}", self.budget);
    }

    /// Process the activation of a cell by the player.
    ///
    /// # Errors
    ///
    /// The method returns a [`MoveError`] when the activation is rejected. In that case the
    /// attempt is not modified.
    pub fn apply_click(&mut self, coord: Coordinate) -> Result<Move, MoveError> {
        if self.outcome != Outcome::InProgress {
            return Err(MoveError::GameOver(self.outcome));
        }
        let cost: u32 = self
            .board
            .cost(coord)
            .ok_or(MoveError::OutOfBounds(coord))?;

        if let Some(index) = self.path.position(coord) {
            return Ok(self.backtrack_to(index));
        }

        if let Some(last) = self.path.last()
            && !grid::is_adjacent(last, coord, self.board.matrix())
        {
            return Err(MoveError::NotAdjacent(coord));
        }

        if cost > self.budget {
            debug!("Cell {coord} costs {cost}, only {} left", self.budget);
            return Err(MoveError::InsufficientBudget {
                cost,
                budget: self.budget,
            });
        }

        self.path.push(coord);
        self.budget -= cost;
        debug!("Entered {coord} for {cost}, budget {}", self.budget);

        // Reaching the end with an empty budget is a win
        if coord == self.board.end() {
            self.outcome = Outcome::Won;
            info!(
                "Level {} won with a margin of {}",
                self.board.level().id,
                self.budget
            );
            return Ok(Move::Won(GameLogEntry::new(
                self.board.level(),
                self.budget,
                self.path.get(),
            )));
        }
        if self.budget == 0 {
            self.outcome = Outcome::Lost;
            info!("Level {} lost at {coord}", self.board.level().id);
            return Ok(Move::Lost);
        }
        Ok(Move::Advanced { cost })
    }

    /// Cut the path at the given position.
    fn backtrack_to(&mut self, index: usize) -> Move {
        // The starting cell cannot be removed
        if index == 0 {
            return Move::Unchanged;
        }
        let keep: usize = match self.backtrack {
            BacktrackRule::Drop => index,
            BacktrackRule::Keep => index + 1,
        };
        let removed: usize = self.path.len() - keep;
        if removed == 0 {
            return Move::Unchanged;
        }
        self.path.truncate(keep);
        self.budget = self
            .initial_budget
            .saturating_sub(self.path.cost(self.board.matrix()));
        debug!(
            "Backtracked {removed} cells to {:?}, budget {}",
            self.path.last(),
            self.budget
        );
        Move::Backtracked { removed }
    }

    /// Whether activating the cell would be accepted by the path rules (budget aside).
    ///
    /// Walkable cells are the cells adjacent to the end of the path that are not in the path yet,
    /// and the cells of the path other than the starting cell.
    pub fn walkable(&self, coord: Coordinate) -> bool {
        if self.outcome != Outcome::InProgress || !self.board.matrix().is_valid(coord) {
            return false;
        }
        match self.path.position(coord) {
            Some(index) => index > 0,
            None => self
                .path
                .last()
                .is_some_and(|last| grid::is_adjacent(last, coord, self.board.matrix())),
        }
    }

    /// Return the level details.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Return the cost matrix.
    pub fn matrix(&self) -> &CostMatrix {
        self.board.matrix()
    }

    /// Return the current path.
    pub fn path(&self) -> &[Coordinate] {
        self.path.get()
    }

    /// Return the remaining budget.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Return the budget at the beginning of the attempt.
    pub fn initial_budget(&self) -> u32 {
        self.initial_budget
    }

    /// Return the status of the attempt.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Return the score (the remaining budget) if the level is won.
    pub fn margin(&self) -> Option<u32> {
        match self.outcome {
            Outcome::Won => Some(self.budget),
            _ => None,
        }
    }
}
