/*
lib.rs

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

//! HexPath: a path-budget puzzle on a hexagonal grid.
//!
//! The player walks from a starting cell to an ending cell of a grid of hexagons. Entering a cell
//! costs its value, and the total must stay within the level's budget. The budget is the cost of
//! the cheapest route plus a small buffer, unless the level provides one.
//!
//! - [`grid`]: coordinates, cost matrix, and the odd-r hexagonal adjacency.
//! - [`solver`]: cheapest route between two cells.
//! - [`level`]: level description, normalization, and budget computation.
//! - [`game`]: the player's path and the state machine of an attempt.
//! - [`history`]: adventure log of the won levels.
//! - [`campaign`]: application state, and [`saver`] to persist it.

pub mod campaign;
pub mod config;
pub mod game;
pub mod grid;
pub mod history;
pub mod level;
mod path;
pub mod saver;
pub mod solver;
