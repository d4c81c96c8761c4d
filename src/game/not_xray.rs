/*
not_xray.rs

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

//! Not X-Ray puzzle instance.
//!
//! The module has four direction buttons and a submit button. The scanner shows the symbol of
//! the current cell of a hidden 7x7 table.
//!
//! 1. The player moves freely (the grid wraps around) to find their position in the table,
//!    then goes to the centre cell, which displays the goal symbol, and submits there.
//! 2. This starts the maze stage: the scanner shows the goal symbol, and its color tells which
//!    occurrence of the symbol is the goal. Moves must now follow the maze of the table.
//!    Submitting on the goal solves the module.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use super::{ButtonOutcome, Scan, ScannerColor, ScanningMode, cell_name};
use crate::generator::config::ConfigError;
use crate::generator::maze::Direction;
use crate::generator::not_xray_rules::{NotXRayRules, SymbolTable};
use crate::generator::symbols::SymbolInfo;
use crate::strikes::{StrikeReason, Strikes};

/// Number of columns and rows.
pub const WIDTH: usize = 7;

/// Centre cell. It has no symbol and displays the goal symbol instead.
pub const CENTER: usize = 24;

/// Number of buttons.
pub const NUM_BUTTONS: usize = 5;

/// Index of the submit button. The other buttons are direction buttons.
pub const SUBMIT_BUTTON: usize = 4;

/// Return the cell reached when moving from `cell` outside the maze stage.
///
/// The grid wraps around. In the first and last columns, vertical moves cycle over rows 2 to 6
/// (skipping the corners), and in the first and last rows, horizontal moves cycle over columns
/// B to F. Elsewhere moves cycle over the full row or column.
pub fn wrap_move(cell: usize, direction: Direction) -> usize {
    let row: usize = cell / WIDTH;
    let col: usize = cell % WIDTH;
    let edge_col: bool = col == 0 || col == WIDTH - 1;
    let edge_row: bool = row == 0 || row == WIDTH - 1;

    match direction {
        Direction::Up => {
            col + WIDTH * if edge_col { (row + 3) % 5 + 1 } else { (row + 6) % 7 }
        }
        Direction::Right => {
            WIDTH * row + if edge_row { (col + 5) % 5 + 1 } else { (col + 1) % 7 }
        }
        Direction::Down => {
            col + WIDTH * if edge_col { (row + 5) % 5 + 1 } else { (row + 1) % 7 }
        }
        Direction::Left => {
            WIDTH * row + if edge_row { (col + 3) % 5 + 1 } else { (col + 6) % 7 }
        }
    }
}

/// Scanner color that designates the goal among the cells sharing its symbol.
///
/// * Red: the goal is the topmost occurrence (lowest index),
/// * Blue: the goal is the bottommost occurrence (highest index),
/// * White: the goal is the leftmost occurrence,
/// * Yellow: otherwise (the rightmost occurrence).
pub fn scanner_color(table: &SymbolTable, solution_cell: usize) -> ScannerColor {
    let similar: Vec<usize> = table
        .get(solution_cell)
        .map(|s| table.cells_with(s))
        .unwrap_or_default();

    if similar.first() == Some(&solution_cell) {
        ScannerColor::Red
    } else if similar.last() == Some(&solution_cell) {
        ScannerColor::Blue
    } else if similar.iter().map(|c| c % table.width()).min() == Some(solution_cell % table.width())
    {
        ScannerColor::White
    } else {
        ScannerColor::Yellow
    }
}

/// Verify that the rules fit the Not X-Ray grid.
fn validate_rules(rules: &NotXRayRules) -> Result<(), ConfigError> {
    if rules.tables.is_empty() || rules.tables.len() != rules.mazes.len() {
        return Err(ConfigError::NoTables);
    }
    for (table, maze) in rules.tables.iter().zip(&rules.mazes) {
        if table.width() != WIDTH || table.len() != WIDTH * WIDTH {
            return Err(ConfigError::InvalidGrid {
                width: table.width(),
                height: table.len() / table.width().max(1),
            });
        }
        if maze.width() != WIDTH || maze.height() != WIDTH {
            return Err(ConfigError::InvalidGrid {
                width: maze.width(),
                height: maze.height(),
            });
        }
        if table.navigable_cells().is_empty() {
            return Err(ConfigError::NoTables);
        }
    }
    Ok(())
}

/// Not X-Ray puzzle instance.
#[derive(Debug)]
pub struct NotXRayPuzzle {
    /// Shared rules.
    rules: Arc<NotXRayRules>,

    /// Random generator for the instance state.
    rng: StdRng,

    /// Index of the table (and maze) in use.
    table: usize,

    /// Player position.
    current_cell: usize,

    /// Goal position.
    solution_cell: usize,

    /// Scanning mode outside the centre cell.
    mode: ScanningMode,

    /// Direction of each direction button.
    directions: [Direction; 4],

    /// Whether the player reached the maze stage.
    maze_stage: bool,

    /// Scanner color during the maze stage.
    scanner_color: ScannerColor,

    /// What the scanner currently displays.
    display: Scan,

    /// Strikes so far.
    strikes: Strikes,

    /// Whether the module is solved.
    solved: bool,
}

impl NotXRayPuzzle {
    /// Create a [`NotXRayPuzzle`] object that draws its state from the thread random
    /// generator.
    ///
    /// # Errors
    ///
    /// The method returns an error if the rules do not fit the 7x7 Not X-Ray grid.
    pub fn new(rules: Arc<NotXRayRules>) -> Result<Self, ConfigError> {
        Self::with_rng(rules, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a [`NotXRayPuzzle`] object with a reproducible state.
    ///
    /// # Errors
    ///
    /// The method returns an error if the rules do not fit the 7x7 Not X-Ray grid.
    pub fn with_seed(rules: Arc<NotXRayRules>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rules: Arc<NotXRayRules>, rng: StdRng) -> Result<Self, ConfigError> {
        validate_rules(&rules)?;
        let mut puzzle: NotXRayPuzzle = Self {
            rules,
            rng,
            table: 0,
            current_cell: 0,
            solution_cell: 0,
            mode: ScanningMode::default(),
            directions: Direction::ALL,
            maze_stage: false,
            scanner_color: ScannerColor::default(),
            display: Scan::default(),
            strikes: Strikes::new(),
            solved: false,
        };
        puzzle.initialize();
        Ok(puzzle)
    }

    /// Draw a new instance state.
    fn initialize(&mut self) {
        let rules: Arc<NotXRayRules> = Arc::clone(&self.rules);
        self.table = self.rng.random_range(0..rules.tables.len());
        let table: &SymbolTable = &rules.tables[self.table];

        self.mode = ScanningMode::from_repr(self.rng.random_range(0..2)).unwrap_or_default();

        let valid_cells: Vec<usize> = table.navigable_cells();
        self.current_cell = valid_cells[self.rng.random_range(0..valid_cells.len())];
        self.solution_cell = valid_cells[self.rng.random_range(0..valid_cells.len())];

        self.directions = Direction::ALL;
        self.directions.shuffle(&mut self.rng);
        self.scanner_color = scanner_color(table, self.solution_cell);
        self.maze_stage = false;

        let directions: Vec<String> = self.directions.iter().map(|d| d.to_string()).collect();
        info!("Buttons 1-4 go: {}", directions.join(", "));
        info!(
            "You're in table #{}, starting position {}.",
            self.table + 1,
            cell_name(self.current_cell)
        );
        info!("Scanning {}.", self.mode);

        self.display = Scan::new(
            self.symbols_at(self.current_cell),
            self.mode,
            ScannerColor::Green,
        );
    }

    /// The symbol of the given cell, as a list for the scanner.
    fn symbols_at(&self, cell: usize) -> Vec<SymbolInfo> {
        self.rules.tables[self.table].get(cell).into_iter().collect()
    }

    /// Process a button press (0-based button index).
    pub fn handle_button(&mut self, button: usize) -> ButtonOutcome {
        if self.solved || button >= NUM_BUTTONS {
            return ButtonOutcome::Ignored;
        }
        debug!("Pressed button {}.", button + 1);
        if button == SUBMIT_BUTTON {
            return self.handle_submit();
        }

        let direction: Direction = self.directions[button];
        let cell: usize = self.current_cell;
        if self.maze_stage && !self.rules.mazes[self.table].can_move(cell, direction) {
            let reason: StrikeReason = StrikeReason::Wall { cell, direction };
            self.strikes.add(reason);
            return ButtonOutcome::Strike(reason);
        }

        let new_cell: usize = wrap_move(cell, direction);
        self.current_cell = new_cell;
        let color: ScannerColor = if self.maze_stage {
            self.scanner_color
        } else {
            ScannerColor::Green
        };
        self.display = if new_cell == CENTER {
            let mode: ScanningMode = if button % 2 == 0 {
                ScanningMode::BottomToTop
            } else {
                ScanningMode::TopToBottom
            };
            Scan::new(self.symbols_at(self.solution_cell), mode, color)
        } else {
            Scan::new(self.symbols_at(new_cell), self.mode, color)
        };
        ButtonOutcome::Display(self.display.clone())
    }

    /// Process the submit button.
    fn handle_submit(&mut self) -> ButtonOutcome {
        if self.maze_stage && self.current_cell == self.solution_cell {
            info!("Module solved.");
            self.solved = true;
            self.display = Scan::default();
            return ButtonOutcome::Solved;
        }

        if self.maze_stage || self.current_cell != CENTER {
            let reason: StrikeReason = StrikeReason::WrongSubmit {
                cell: self.current_cell,
            };
            self.strikes.add(reason);
            self.initialize();
            return ButtonOutcome::Strike(reason);
        }

        let occurrence: &str = match self.scanner_color {
            ScannerColor::Red => "topmost",
            ScannerColor::Yellow => "rightmost",
            ScannerColor::Blue => "bottommost",
            _ => "leftmost",
        };
        let goal: Vec<String> = self
            .symbols_at(self.solution_cell)
            .iter()
            .map(|s| s.to_string())
            .collect();
        info!(
            "Entering maze mode. Goal symbol is {}. Color is {}, so look at the {occurrence} occurrence.",
            goal.join(""),
            self.scanner_color
        );
        info!("Goal position: {}.", cell_name(self.solution_cell));

        self.maze_stage = true;
        self.display = Scan::new(
            self.symbols_at(self.solution_cell),
            ScanningMode::BottomToTop,
            self.scanner_color,
        );
        ButtonOutcome::Display(self.display.clone())
    }

    /// Shared rules.
    pub fn rules(&self) -> &Arc<NotXRayRules> {
        &self.rules
    }

    /// Index of the table in use.
    pub fn table(&self) -> usize {
        self.table
    }

    /// Player position.
    pub fn current_cell(&self) -> usize {
        self.current_cell
    }

    /// Goal position.
    pub fn solution_cell(&self) -> usize {
        self.solution_cell
    }

    /// Scanning mode outside the centre cell.
    pub fn mode(&self) -> ScanningMode {
        self.mode
    }

    /// Direction of each direction button.
    pub fn directions(&self) -> [Direction; 4] {
        self.directions
    }

    /// Index of the button that moves in the given direction.
    pub fn button_for(&self, direction: Direction) -> usize {
        self.directions
            .iter()
            .position(|d| *d == direction)
            .unwrap_or(SUBMIT_BUTTON)
    }

    /// Whether the player reached the maze stage.
    pub fn is_maze_stage(&self) -> bool {
        self.maze_stage
    }

    /// Scanner color of the maze stage.
    pub fn scanner_color(&self) -> ScannerColor {
        self.scanner_color
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
