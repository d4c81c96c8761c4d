/*
xray.rs

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

//! X-Ray puzzle instance.
//!
//! The scanner shows three symbols: a column header, a row header and a direction symbol.
//! The player looks up the number at the column and row of the table, moves from there in the
//! given direction, and presses the button that matches the number found.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use super::{ButtonOutcome, Scan, ScannerColor, ScanningMode};
use crate::generator::config::ConfigError;
use crate::generator::symbols::SymbolInfo;
use crate::generator::xray_rules::{DIRECTION_NAMES, GRID_SIZE, NUM_VALUES, XRayRules};
use crate::strikes::{StrikeReason, Strikes};

/// Number of answer buttons.
pub const NUM_BUTTONS: usize = NUM_VALUES;

/// Whether the direction (index in the 3x3 table) stays inside the table from the given cell.
pub fn direction_in_bounds(col: usize, row: usize, direction: usize) -> bool {
    !(col == 0 && direction % 3 == 0)
        && !(col == GRID_SIZE - 1 && direction % 3 == 2)
        && !(row == 0 && direction / 3 == 0)
        && !(row == GRID_SIZE - 1 && direction / 3 == 2)
}

/// Verify that the rules fit the X-Ray table.
fn validate_rules(rules: &XRayRules) -> Result<(), ConfigError> {
    let parts: [(&'static str, usize, usize); 4] = [
        ("column headers", rules.columns.len(), GRID_SIZE),
        ("row headers", rules.rows.len(), GRID_SIZE),
        ("direction symbols", rules.table_3x3.len(), DIRECTION_NAMES.len()),
        ("numbers table", rules.numbers.len(), GRID_SIZE * GRID_SIZE),
    ];
    for (part, found, expected) in parts {
        if found != expected {
            return Err(ConfigError::MalformedRules {
                part,
                found,
                expected,
            });
        }
    }
    match rules.numbers.iter().position(|n| *n >= NUM_VALUES) {
        Some(cell) => Err(ConfigError::ValueOutOfRange {
            cell,
            value: rules.numbers[cell],
        }),
        None => Ok(()),
    }
}

/// X-Ray puzzle instance.
#[derive(Debug)]
pub struct XRayPuzzle {
    rules: Arc<XRayRules>,
    rng: StdRng,
    column: usize,
    row: usize,
    direction: usize,
    solution: usize,
    display: Scan,
    strikes: Strikes,
    solved: bool,
}

impl XRayPuzzle {
    /// Create an [`XRayPuzzle`] object that draws its state from the thread random generator.
    ///
    /// Rules that do not fit the 12x12 table are rejected.
    pub fn new(rules: Arc<XRayRules>) -> Result<Self, ConfigError> {
        Self::with_rng(rules, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an [`XRayPuzzle`] object with a reproducible state.
    pub fn with_seed(rules: Arc<XRayRules>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Arc<XRayRules>, rng: StdRng) -> Result<Self, ConfigError> {
        validate_rules(&rules)?;
        let mut puzzle: XRayPuzzle = Self {
            rules,
            rng,
            column: 0,
            row: 0,
            direction: 4,
            solution: 0,
            display: Scan::default(),
            strikes: Strikes::new(),
            solved: false,
        };
        puzzle.initialize();
        Ok(puzzle)
    }

    /// Draw a new instance state.
    fn initialize(&mut self) {
        let col: usize = self.rng.random_range(0..GRID_SIZE);
        let row: usize = self.rng.random_range(0..GRID_SIZE);
        let directions: Vec<usize> = (0..9)
            .filter(|d| direction_in_bounds(col, row, *d))
            .collect();
        // The centre of the 3x3 table is always in bounds
        let direction: usize = directions.choose(&mut self.rng).copied().unwrap_or(4);

        self.column = col;
        self.row = row;
        self.direction = direction;
        self.solution = self
            .rules
            .number_at(col + direction % 3 - 1, row + direction / 3 - 1);

        info!(
            "Column {}, Row {}: number there is {}.",
            self.rules.columns[col],
            self.rules.rows[row],
            self.rules.number_at(col, row) + 1
        );
        info!(
            "{} = {}. Solution is {}.",
            self.rules.table_3x3[direction],
            DIRECTION_NAMES[direction],
            self.solution + 1
        );

        let mut icons: Vec<SymbolInfo> = vec![
            self.rules.columns[col],
            self.rules.rows[row],
            self.rules.table_3x3[direction],
        ];
        icons.shuffle(&mut self.rng);
        let mode: ScanningMode =
            ScanningMode::from_repr(self.rng.random_range(0..3)).unwrap_or_default();
        info!("Scanning {mode}.");

        self.display = Scan::new(icons, mode, ScannerColor::Green);
    }

    /// Process a button press (0-based button index).
    pub fn handle_button(&mut self, button: usize) -> ButtonOutcome {
        if self.solved || button >= NUM_BUTTONS {
            return ButtonOutcome::Ignored;
        }
        debug!("Pressed button {}.", button + 1);

        if button != self.solution {
            let reason: StrikeReason = StrikeReason::WrongButton { button: button + 1 };
            self.strikes.add(reason);
            self.initialize();
            return ButtonOutcome::Strike(reason);
        }
        info!("You pressed {}. Module solved.", button + 1);
        self.solved = true;
        ButtonOutcome::Solved
    }

    /// Shared rules.
    pub fn rules(&self) -> &Arc<XRayRules> {
        &self.rules
    }

    /// Column of the starting cell.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Row of the starting cell.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Direction to move in, as an index in the 3x3 table.
    pub fn direction(&self) -> usize {
        self.direction
    }

    /// Index of the button to press.
    pub fn solution(&self) -> usize {
        self.solution
    }

    /// What the scanner currently displays.
    pub fn display(&self) -> &Scan {
        &self.display
    }

    /// Strikes so far.
    pub fn strikes(&self) -> &Strikes {
        &self.strikes
    }

    /// Whether the module is solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }
}
