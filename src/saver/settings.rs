/*
settings.rs

Copyright 2025 Hervé Quatremain

This file is part of Hue More.

Hue More is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hue More is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hue More. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the user preferences.
//!
//! The saved object is a serialization of the [`Settings`] object in JSON format by
//! using [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Object to save and restore the user preferences.
pub struct SaverSettings {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverSettings {
    /// Create a [`SaverSettings`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the settings must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("settings.json");
        debug!("Settings file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Return the path to the settings file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the [`Settings`] object from the settings file.
    ///
    /// Return the [`Settings`] object or None if the settings file does not exist.
    pub fn get_settings(&self) -> Result<Option<Settings>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let settings: Settings = serde_json::from_reader(reader)?;
        Ok(Some(settings))
    }

    /// Save the provided [`Settings`] object.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the settings file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Theme;
    use std::fs;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let saver: SaverSettings = SaverSettings::new(dir.path().to_path_buf());
        assert!(saver.get_settings().unwrap().is_none());
    }

    #[test]
    fn save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let saver: SaverSettings = SaverSettings::new(dir.path().join("nested"));
        let mut settings: Settings = Settings::new();
        settings.set_level("Extreme").unwrap();
        settings.set_mark_fixed(false);
        settings.set_theme(Theme::Dark);

        saver.save_settings(&settings).unwrap();
        assert_eq!(saver.get_settings().unwrap(), Some(settings));

        saver.delete_save();
        assert!(saver.get_settings().unwrap().is_none());
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), r#"{"level": "Impossible"}"#).unwrap();

        let saver: SaverSettings = SaverSettings::new(dir.path().to_path_buf());
        assert_eq!(saver.path(), dir.path().join("settings.json").as_path());
        assert!(saver.get_settings().is_err());
    }
}
