/*
saver.rs

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

//! Persist the application state between two runs.
//!
//! - [`session`] saves the level in progress ([`crate::campaign::SessionSnapshot`]).
//! - [`history`] saves the adventure log ([`crate::history::History`]).
//!
//! Both files are JSON documents, stored in the directory returned by
//! [`crate::config::data_dir`].

pub mod history;
pub mod session;
