/*
data_dir.rs

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

//! Resolution of the data directory from the environment.
//!
//! The environment is modified, so the whole check runs in a single test of its own binary.

use std::env;
use std::path::PathBuf;

use hexpath::config::{self, DATA_DIR_ENV, DataDirError, PKGNAME};

#[test]
fn data_dir_is_never_relative() {
    unsafe {
        env::set_var(DATA_DIR_ENV, "/srv/hexpath");
    }
    assert_eq!(config::data_dir(None), Ok(PathBuf::from("/srv/hexpath")));
    assert_eq!(
        config::data_dir(Some(PathBuf::from("/tmp/elsewhere"))),
        Ok(PathBuf::from("/tmp/elsewhere"))
    );

    // Without any hint from the environment, the directory is either absolute or refused
    unsafe {
        env::remove_var(DATA_DIR_ENV);
        env::remove_var("XDG_DATA_HOME");
        env::remove_var("HOME");
    }
    match config::data_dir(None) {
        Ok(dir) => {
            assert!(dir.is_absolute(), "relative data directory {dir:?}");
            assert!(dir.ends_with(PKGNAME));
        }
        Err(DataDirError::NotAbsolute(dir)) => assert!(!dir.is_absolute()),
    }
}
