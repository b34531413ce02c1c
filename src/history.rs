/*
history.rs

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

//! Adventure log and lifetime score.
//!
//! Every time the player wins a level, the game produces a [`GameLogEntry`]. The entry is added to
//! the [`History`] object, which also maintains the lifetime score (the sum of the margins of all
//! the won levels).
//! See the [`crate::saver::history`] module that saves and restores the [`History`] object.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;
use crate::level::{Level, LevelId};

/// Record of a won level.
///
/// Entries are never modified after they are created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameLogEntry {
    /// Identifier of the level.
    level_id: LevelId,

    /// Display name of the level.
    level_name: String,

    /// Budget left when the player reached the ending cell (the score).
    remaining_budget: u32,

    /// Completion time, in milliseconds since the Unix epoch.
    timestamp: i64,

    /// Winning path, from the starting cell to the ending cell.
    path: Vec<Coordinate>,

    /// Level as it was played.
    level_data: Level,
}

impl GameLogEntry {
    /// Create a [`GameLogEntry`] object, timestamped now.
    pub fn new(level: &Level, margin: u32, path: &[Coordinate]) -> Self {
        Self {
            level_id: level.id.clone(),
            level_name: level.display_name().to_string(),
            remaining_budget: margin,
            timestamp: Utc::now().timestamp_millis(),
            path: path.to_vec(),
            level_data: level.clone(),
        }
    }

    /// Return the identifier of the level.
    pub fn level_id(&self) -> &LevelId {
        &self.level_id
    }

    /// Return the name of the level.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Return the budget left at the end of the level.
    pub fn margin(&self) -> u32 {
        self.remaining_budget
    }

    /// Return the completion time, in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Return the completion time in the local time zone, which is used for display.
    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// Return the winning path.
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Return the level as it was played.
    pub fn level(&self) -> &Level {
        &self.level_data
    }
}

/// List of the won levels, most recent first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct History {
    /// Sum of the margins of all the entries, including entries recorded before the log was
    /// last cleared.
    total_score: u64,

    /// Log entries, most recent first.
    entries: Vec<GameLogEntry>,
}

impl History {
    /// Create an empty [`History`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the top of the log and add its margin to the lifetime score.
    pub fn record(&mut self, entry: GameLogEntry) {
        self.total_score += u64::from(entry.margin());
        self.entries.insert(0, entry);
    }

    /// Remove all the entries and reset the lifetime score.
    pub fn clear(&mut self) {
        self.total_score = 0;
        self.entries.clear();
    }

    /// Return the lifetime score.
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Return the entries, most recent first.
    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the best margin obtained for the given level, or None if the level was never won.
    pub fn best_margin(&self, level_id: &LevelId) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.level_id() == level_id)
            .map(GameLogEntry::margin)
            .max()
    }
}
