/*
catalogue.rs

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

//! Built-in levels.
//!
//! For developers: add new levels at the end of [`catalogue`]. Levels are played in order, and a
//! random level is generated once the list is exhausted.

use super::{Level, LevelId};
use crate::grid::Coordinate;

/// Build a level of the catalogue.
fn level(id: i64, description: &str, budget: i64, gradient: &str) -> Level {
    let mut level: Level = Level::from_gradient(LevelId::Number(id), gradient);
    level.description = Some(description.to_string());
    level.budget = Some(budget);
    level.start = Some(Coordinate::new(4, 0));
    level.end = Some(Coordinate::new(0, 4));
    level
}

/// Return the built-in levels, in playing order.
pub fn catalogue() -> Vec<Level> {
    vec![
        level(
            1,
            "The Beginning",
            10,
            "
            32320
            21411
            22242
            15112
            01233
            ",
        ),
        level(
            2,
            "The Walkabout",
            10,
            "
            32320123
            21411211
            222423
            15112010
            01233111
            ",
        ),
        level(
            3,
            "Jagged Valley",
            15,
            "
            44320
            352
            22153
            3161
            02124
            ",
        ),
        level(
            4,
            "The Deep Woods",
            20,
            "
            511102
            425221
            316413
            222122
            051234
            ",
        ),
    ]
}

/// Return the position and the level with the given identifier or description
/// (case-insensitive).
pub fn find(name: &str) -> Option<(usize, Level)> {
    catalogue().into_iter().enumerate().find(|(_, l)| {
        l.id.to_string() == name
            || l
                .description
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(name))
    })
}
