/*
config.rs

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

//! Build-time constants and data directory resolution.

use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Package name, used for the data directory.
pub const PKGNAME: &str = env!("CARGO_PKG_NAME");

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Long version string printed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/>"
);

/// Slack added on top of the cheapest traversal cost when a level does not provide a budget.
pub const BUFFER_COST: u32 = 2;

/// Budget given to levels for which the solver cannot find any path.
pub const FALLBACK_BUDGET: u32 = 20;

/// Display name recorded in the adventure log for levels without a description.
pub const DEFAULT_LEVEL_NAME: &str = "Mystery Map";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "HEXPATH_DATA_DIR";

/// Name of the file storing the level in progress.
pub const SESSION_FILE: &str = "session.json";

/// Name of the file storing the adventure log and the lifetime score.
pub const HISTORY_FILE: &str = "history.json";

/// Errors when resolving the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataDirError {
    /// The user data directory is not an absolute path (`HOME` unset, for example).
    NotAbsolute(PathBuf),
}

impl fmt::Display for DataDirError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataDirError::NotAbsolute(dir) => write!(
                f,
                "cannot find the user data directory ({}); use --data-dir or {DATA_DIR_ENV}",
                dir.display()
            ),
        }
    }
}

impl Error for DataDirError {}

/// Return the directory where the session and the adventure log are saved.
///
/// The `override_dir` parameter (from the command line) wins over the [`DATA_DIR_ENV`]
/// environment variable, which wins over the user data directory (`$XDG_DATA_HOME/hexpath`).
///
/// # Errors
///
/// The function returns an error when the user data directory is not an absolute path.
pub fn data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, DataDirError> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let mut dir: PathBuf = glib::user_data_dir();
    if !dir.is_absolute() {
        return Err(DataDirError::NotAbsolute(dir));
    }
    dir.push(PKGNAME);
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let dir: PathBuf = data_dir(Some(PathBuf::from("/tmp/somewhere"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }
}
