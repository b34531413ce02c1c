/*
session.rs

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

//! Save and restore the level in progress when quitting or starting HexPath.
//!
//! When a level is in progress and the player quits, the [`SessionSnapshot`] object is saved in
//! the `session.json` file.
//! When HexPath is restarted with `--resume`, the saved level is loaded and the player continues
//! from the saved path.

use log::debug;
use std::error::Error;
use std::fs::{self, File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::campaign::SessionSnapshot;
use crate::config::SESSION_FILE;

/// Object to save and restore the level in progress.
pub struct SaverSession {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverSession {
    /// Create a [`SaverSession`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the session must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SESSION_FILE);
        debug!("Session file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Return the path to the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the saved [`SessionSnapshot`] object.
    ///
    /// Return the [`SessionSnapshot`] object or None if there is no saved session.
    pub fn load(&self) -> Result<Option<SessionSnapshot>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let snapshot: SessionSnapshot = serde_json::from_reader(reader)?;
        Ok(Some(snapshot))
    }

    /// Save the provided [`SessionSnapshot`] object.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, snapshot)?;
        writer.flush()?;
        debug!("Session saved at step {}", snapshot.path.len());
        Ok(())
    }

    /// Delete the saved session.
    pub fn delete(&self) {
        let _ = remove_file(&self.save_file);
    }
}
