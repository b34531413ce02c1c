/*
campaign.rs

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

//! Sequence of levels played by the player.
//!
//! The [`Campaign`] object is the application state: the list of levels, the position in that
//! list, the [`Game`] in progress, and the [`History`] of won levels.
//! Nothing in the crate keeps global state; the caller owns the [`Campaign`] object and uses the
//! [`crate::saver`] module to persist it between sessions, through [`SessionSnapshot`].

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::game::{BacktrackRule, Game, Move, MoveError};
use crate::grid::Coordinate;
use crate::history::History;
use crate::level::{Level, LevelError, catalogue, random_level};

/// Saved state of the level in progress.
///
/// ```json
/// { "level": { "id": 1, "grid": [[0, 1], [2, 0]] },
///   "path": [{ "row": 1, "col": 0 }], "budget": 10, "initialBudget": 10, "index": 0 }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Level being played, normalized.
    pub level: Level,

    /// Player's path.
    pub path: Vec<Coordinate>,

    /// Remaining budget.
    pub budget: u32,

    /// Budget at the beginning of the attempt.
    pub initial_budget: u32,

    /// Position of the level in the level list, or None for a generated level.
    pub index: Option<usize>,
}

/// Errors when restoring a saved session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The saved level cannot be played.
    Level(LevelError),

    /// The saved path does not begin at the starting cell.
    WrongStart(Option<Coordinate>),

    /// A step of the saved path is not a legal move.
    IllegalStep(MoveError),

    /// The saved budget does not match the cost of the saved path.
    BudgetMismatch { saved: u32, computed: u32 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Level(e) => write!(f, "saved level: {e}"),
            SessionError::WrongStart(c) => {
                write!(f, "saved path does not begin at the starting cell: {c:?}")
            }
            SessionError::IllegalStep(e) => write!(f, "saved path: {e}"),
            SessionError::BudgetMismatch { saved, computed } => {
                write!(f, "saved budget {saved} does not match the path ({computed})")
            }
        }
    }
}

impl Error for SessionError {}

impl From<LevelError> for SessionError {
    fn from(e: LevelError) -> Self {
        SessionError::Level(e)
    }
}

/// Application state.
#[derive(Debug, Clone)]
pub struct Campaign {
    /// Levels, in playing order.
    levels: Vec<Level>,

    /// Position of the current level in [`Campaign::levels`], or None for a generated level.
    index: Option<usize>,

    /// Level in progress.
    game: Game,

    /// Won levels.
    history: History,

    /// Backtracking behavior applied to every game.
    backtrack: BacktrackRule,
}

impl Campaign {
    /// Create a [`Campaign`] object that starts at the first level of the list.
    ///
    /// When the list is empty, a random level is generated.
    ///
    /// # Errors
    ///
    /// The method returns an error if the first level cannot be played.
    pub fn new(levels: Vec<Level>, history: History) -> Result<Self, LevelError> {
        let (level, index) = match levels.first() {
            Some(l) => (l.clone(), Some(0)),
            None => (
                random_level::generate(
                    random_level::DEFAULT_SIZE,
                    random_level::DEFAULT_SIZE,
                    &mut rand::rng(),
                ),
                None,
            ),
        };
        Ok(Self {
            game: Game::new(level.prepare()?),
            levels,
            index,
            history,
            backtrack: BacktrackRule::default(),
        })
    }

    /// Create a [`Campaign`] object with the built-in levels.
    pub fn with_catalogue(history: History) -> Result<Self, LevelError> {
        Self::new(catalogue::catalogue(), history)
    }

    /// Restore a [`Campaign`] object from a saved session.
    ///
    /// The saved path is replayed from the starting cell, so the restored game obeys the same
    /// rules as a live one.
    ///
    /// # Errors
    ///
    /// The method returns an error if the saved level cannot be played, or if the saved path or
    /// budget are not consistent with the level.
    pub fn from_snapshot(
        levels: Vec<Level>,
        snapshot: SessionSnapshot,
        history: History,
    ) -> Result<Self, SessionError> {
        let mut game: Game = Game::with_budget(snapshot.level.prepare()?, snapshot.initial_budget);

        if snapshot.path.first() != Some(&game.board().start()) {
            return Err(SessionError::WrongStart(snapshot.path.first().copied()));
        }
        for coord in snapshot.path.iter().skip(1) {
            game.apply_click(*coord).map_err(SessionError::IllegalStep)?;
        }
        if game.budget() != snapshot.budget {
            return Err(SessionError::BudgetMismatch {
                saved: snapshot.budget,
                computed: game.budget(),
            });
        }

        // The index is only meaningful if it still points into the level list
        let index: Option<usize> = snapshot.index.filter(|i| *i < levels.len());
        debug!(
            "Restored level {} at step {} (outcome {})",
            game.board().level().id,
            game.path().len(),
            game.outcome()
        );
        Ok(Self {
            levels,
            index,
            game,
            history,
            backtrack: BacktrackRule::default(),
        })
    }

    /// Return the state to save.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.game.board().level().clone(),
            path: self.game.path().to_vec(),
            budget: self.game.budget(),
            initial_budget: self.game.initial_budget(),
            index: self.index,
        }
    }

    /// Select how backtracking cuts the path, for the current and the following games.
    pub fn set_backtrack_rule(&mut self, rule: BacktrackRule) {
        self.backtrack = rule;
        self.game.set_backtrack_rule(rule);
    }

    /// Process the activation of a cell. Won levels are recorded in the history.
    ///
    /// # Errors
    ///
    /// See [`Game::apply_click`].
    pub fn click(&mut self, coord: Coordinate) -> Result<Move, MoveError> {
        let result: Move = self.game.apply_click(coord)?;
        if let Move::Won(entry) = &result {
            self.history.record(entry.clone());
            info!("Lifetime score: {}", self.history.total_score());
        }
        Ok(result)
    }

    /// Restart the current level.
    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Play the given level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the level cannot be played. The current game is kept.
    pub fn load_level(&mut self, level: Level, index: Option<usize>) -> Result<(), LevelError> {
        let mut game: Game = Game::new(level.prepare()?);
        game.set_backtrack_rule(self.backtrack);
        self.game = game;
        self.index = index;
        Ok(())
    }

    /// Move to the next level of the list, or to a random level when the list is exhausted or a
    /// random level is being played.
    ///
    /// # Errors
    ///
    /// The method returns an error if the next level cannot be played.
    pub fn next_level<R: Rng>(&mut self, rng: &mut R) -> Result<(), LevelError> {
        let next: Option<usize> = self
            .index
            .map(|i| i + 1)
            .filter(|i| *i < self.levels.len());
        match next {
            Some(i) => {
                let level: Level = self.levels[i].clone();
                info!("Next level: {}", level.display_name());
                self.load_level(level, Some(i))
            }
            None => {
                let level: Level = random_level::generate(
                    random_level::DEFAULT_SIZE,
                    random_level::DEFAULT_SIZE,
                    rng,
                );
                info!("No more levels, generated {}", level.display_name());
                self.load_level(level, None)
            }
        }
    }

    /// Clear the history and restart from the first level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the first level cannot be played.
    pub fn start_over(&mut self) -> Result<(), LevelError> {
        warn!("Starting over: clearing {} log entries", self.history.len());
        self.history.clear();
        match self.levels.first() {
            Some(level) => {
                let level: Level = level.clone();
                self.load_level(level, Some(0))
            }
            None => {
                self.index = None;
                self.game.reset();
                Ok(())
            }
        }
    }

    /// Return the game in progress.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Return the history of won levels.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Return the position of the current level in the list, or None for a generated level.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
