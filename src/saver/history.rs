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

//! Save and restore the adventure log.
//!
//! The saved object is a serialization of the [`History`] object in JSON format by using
//! [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{self, File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::HISTORY_FILE;
use crate::history::History;

/// Object to save and restore the adventure log.
pub struct SaverHistory {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverHistory {
    /// Create a [`SaverHistory`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the log must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(HISTORY_FILE);
        debug!("History file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Return the path to the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the [`History`] object from the log file.
    ///
    /// Return the [`History`] object or None if the log file does not exist.
    pub fn load(&self) -> Result<Option<History>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let history: History = serde_json::from_reader(reader)?;
        Ok(Some(history))
    }

    /// Save the provided [`History`] object.
    pub fn save(&self, history: &History) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, history)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the log file.
    pub fn delete(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Coordinate, CostMatrix};
    use crate::history::GameLogEntry;
    use crate::level::{Level, LevelId};
    use tempfile::TempDir;

    #[test]
    fn save_and_load() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverHistory = SaverHistory::new(dir.path().to_path_buf());
        assert!(saver.load().unwrap().is_none());

        let level: Level =
            Level::from_matrix(LevelId::Number(1), CostMatrix::new(vec![vec![0, 2]]));
        let mut history: History = History::new();
        history.record(GameLogEntry::new(
            &level,
            3,
            &[Coordinate::new(0, 0), Coordinate::new(0, 1)],
        ));
        saver.save(&history).unwrap();

        let loaded: History = saver.load().unwrap().unwrap();
        assert_eq!(loaded, history);
        assert_eq!(loaded.total_score(), 3);

        saver.delete();
        assert!(saver.load().unwrap().is_none());
    }
}
