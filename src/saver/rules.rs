/*
rules.rs

Copyright 2025 Hervé Quatremain

This file is part of X-Ray.

X-Ray is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

X-Ray is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
X-Ray. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore rulesets.
//!
//! The saved object is a serialization of the [`NotXRayRules`] or [`XRayRules`] object in JSON
//! format by using [`serde`]. Each ruleset has its own file in the save directory:
//! `notxray-<seed>.json` or `xray-<seed>.json`.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::generator::not_xray_rules::NotXRayRules;
use crate::generator::xray_rules::XRayRules;

/// Object to save and restore rulesets.
pub struct SaverRules {
    /// Path to the directory where the rulesets are saved.
    save_dir: PathBuf,
}

impl SaverRules {
    /// Create a [`SaverRules`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the rulesets must be saved.
    /// The directory must exist.
    pub fn new(save_dir: PathBuf) -> Self {
        debug!("Rules directory: {save_dir:?}");
        Self { save_dir }
    }

    /// Path to the file for the given module and seed.
    pub fn path(&self, module: &str, seed: i32) -> PathBuf {
        self.save_dir.join(format!("{module}-{seed}.json"))
    }

    fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Box<dyn Error>> {
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let rules: T = serde_json::from_reader(reader)?;
        Ok(Some(rules))
    }

    fn save<T: Serialize>(path: &Path, rules: &T) -> Result<(), Box<dyn Error>> {
        debug!("Saving rules to {path:?}");
        let file: File = File::create(path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, rules)?;
        writer.flush()?;
        Ok(())
    }

    /// Retrieve the Not X-Ray ruleset for the given seed.
    ///
    /// Return the [`NotXRayRules`] object or None if the file does not exist.
    pub fn get_not_xray(&self, seed: i32) -> Result<Option<NotXRayRules>, Box<dyn Error>> {
        Self::load(&self.path("notxray", seed))
    }

    /// Save the provided [`NotXRayRules`] object.
    pub fn save_not_xray(&self, rules: &NotXRayRules) -> Result<(), Box<dyn Error>> {
        Self::save(&self.path("notxray", rules.seed), rules)
    }

    /// Retrieve the X-Ray ruleset for the given seed.
    ///
    /// Return the [`XRayRules`] object or None if the file does not exist.
    pub fn get_xray(&self, seed: i32) -> Result<Option<XRayRules>, Box<dyn Error>> {
        Self::load(&self.path("xray", seed))
    }

    /// Save the provided [`XRayRules`] object.
    pub fn save_xray(&self, rules: &XRayRules) -> Result<(), Box<dyn Error>> {
        Self::save(&self.path("xray", rules.seed), rules)
    }

    /// Delete the saved rulesets for the given seed.
    pub fn delete_saves(&self, seed: i32) {
        let _ = remove_file(self.path("notxray", seed));
        let _ = remove_file(self.path("xray", seed));
    }
}
