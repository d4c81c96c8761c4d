/*
config.rs

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

//! Generator parameters and configuration errors.
//!
//! All the rule generators share one parameter set, [`GeneratorConfig`].
//! The default configuration is the Not X-Ray layout: a 7x7 grid without its corners, eight
//! tables of eleven symbols each.
//!
//! A configuration must be validated with [`GeneratorConfig::validate`] before generating rules.
//! An invalid configuration would otherwise produce a corrupt ruleset, or never terminate.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rule seeds are non-negative.
    #[error("invalid rule seed {0}: the seed must be non-negative")]
    InvalidSeed(i32),

    #[error("invalid grid size {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("obstacle cell {cell} is outside the {width}x{height} grid")]
    ObstacleOutOfRange {
        cell: usize,
        width: usize,
        height: usize,
    },

    #[error("no navigable cell left in the maze")]
    EmptyMaze,

    /// The maze generator could never visit that cell.
    #[error("maze cell {cell} cannot be reached from the other navigable cells")]
    DisconnectedMaze { cell: usize },

    #[error("{cells} navigable table cells cannot be split into {groups} groups of four")]
    CellCountMismatch { cells: usize, groups: usize },

    #[error("the {pool} symbol pool holds {available} symbols but {required} are required")]
    PoolTooSmall {
        pool: &'static str,
        available: usize,
        required: usize,
    },

    #[error("at least one table and one symbol per table are required")]
    NoTables,

    /// No combination covers the cell, so no partition can exist.
    #[error("table cell {cell} is not part of any valid symbol combination")]
    UncoveredCell { cell: usize },

    /// A ruleset part has the wrong number of entries.
    #[error("malformed {part}: {found} entries, {expected} expected")]
    MalformedRules {
        part: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("table value {value} at cell {cell} is out of range")]
    ValueOutOfRange { cell: usize, value: usize },
}

/// Reject the seeds that the rule generators do not accept.
pub fn validate_seed(seed: i32) -> Result<(), ConfigError> {
    if seed < 0 {
        return Err(ConfigError::InvalidSeed(seed));
    }
    Ok(())
}

/// Parameters of the table and maze generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of columns in the grid.
    pub width: usize,

    /// Number of rows in the grid.
    pub height: usize,

    /// Cells excluded from the mazes.
    pub maze_obstacles: Vec<usize>,

    /// Cells that never receive a symbol.
    pub table_obstacles: Vec<usize>,

    /// Size of the flippable symbol pool. These symbols use the icon identifiers
    /// `0..num_flippable`.
    pub num_flippable: usize,

    /// Size of the non-flippable symbol pool. These symbols use the icon identifiers that
    /// follow the flippable ones.
    pub num_unflippable: usize,

    /// Number of tables (and mazes) to generate.
    pub num_tables: usize,

    /// Flippable symbols per table. Each of them is used twice: unflipped and flipped.
    pub flippable_per_table: usize,

    /// Non-flippable symbols per table.
    pub unflippable_per_table: usize,

    /// Number of backtracks after which a partition search attempt is abandoned and restarted.
    pub backtrack_limit: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::not_xray()
    }
}

impl GeneratorConfig {
    /// Configuration of the Not X-Ray module.
    pub fn not_xray() -> Self {
        Self {
            width: 7,
            height: 7,
            maze_obstacles: vec![0, 6, 42, 48],
            table_obstacles: vec![0, 6, 42, 48, 24],
            num_flippable: 55,
            num_unflippable: 55,
            num_tables: 8,
            flippable_per_table: 4,
            unflippable_per_table: 3,
            backtrack_limit: 500,
        }
    }

    /// Number of symbols in each table.
    pub fn symbols_per_table(&self) -> usize {
        2 * self.flippable_per_table + self.unflippable_per_table
    }

    /// Number of cells in the grid.
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Row of the given cell.
    pub fn row(&self, cell: usize) -> usize {
        cell / self.width
    }

    /// Column of the given cell.
    pub fn col(&self, cell: usize) -> usize {
        cell % self.width
    }

    /// Cells that the mazes go through, in increasing order.
    pub fn maze_cells(&self) -> Vec<usize> {
        (0..self.num_cells())
            .filter(|c| !self.maze_obstacles.contains(c))
            .collect()
    }

    /// Cells that receive a symbol, in increasing order.
    pub fn table_cells(&self) -> Vec<usize> {
        (0..self.num_cells())
            .filter(|c| !self.table_obstacles.contains(c))
            .collect()
    }

    /// Verify the configuration.
    ///
    /// # Errors
    ///
    /// The method returns the first problem found. Combination coverage is verified separately
    /// by [`super::combinations::enumerate`], which needs the enumerated combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }

        if let Some(cell) = self
            .maze_obstacles
            .iter()
            .chain(self.table_obstacles.iter())
            .find(|c| **c >= self.num_cells())
        {
            return Err(ConfigError::ObstacleOutOfRange {
                cell: *cell,
                width: self.width,
                height: self.height,
            });
        }

        if self.num_tables == 0 || self.symbols_per_table() == 0 {
            return Err(ConfigError::NoTables);
        }

        let required: usize = self.num_tables * self.flippable_per_table;
        if required > self.num_flippable {
            return Err(ConfigError::PoolTooSmall {
                pool: "flippable",
                available: self.num_flippable,
                required,
            });
        }
        let required: usize = self.num_tables * self.unflippable_per_table;
        if required > self.num_unflippable {
            return Err(ConfigError::PoolTooSmall {
                pool: "non-flippable",
                available: self.num_unflippable,
                required,
            });
        }

        let cells: usize = self.table_cells().len();
        if cells != 4 * self.symbols_per_table() {
            return Err(ConfigError::CellCountMismatch {
                cells,
                groups: self.symbols_per_table(),
            });
        }

        self.validate_maze_connectivity()
    }

    /// Verify that all the maze cells are connected, otherwise the maze generator would never
    /// complete.
    fn validate_maze_connectivity(&self) -> Result<(), ConfigError> {
        let cells: Vec<usize> = self.maze_cells();
        let Some(first) = cells.first() else {
            return Err(ConfigError::EmptyMaze);
        };

        let mut visited: HashSet<usize> = HashSet::with_capacity(cells.len());
        let mut queue: VecDeque<usize> = VecDeque::new();
        visited.insert(*first);
        queue.push_back(*first);

        while let Some(cell) = queue.pop_front() {
            for adj in self.adjacent_cells(cell) {
                if !self.maze_obstacles.contains(&adj) && visited.insert(adj) {
                    queue.push_back(adj);
                }
            }
        }

        match cells.iter().find(|c| !visited.contains(c)) {
            Some(cell) => Err(ConfigError::DisconnectedMaze { cell: *cell }),
            None => Ok(()),
        }
    }

    /// In-bound orthogonal neighbours of the given cell, in the order left, right, up, down.
    pub fn adjacent_cells(&self, cell: usize) -> Vec<usize> {
        let mut adjs: Vec<usize> = Vec::with_capacity(4);
        if self.col(cell) > 0 {
            adjs.push(cell - 1);
        }
        if self.col(cell) < self.width - 1 {
            adjs.push(cell + 1);
        }
        if self.row(cell) > 0 {
            adjs.push(cell - self.width);
        }
        if self.row(cell) < self.height - 1 {
            adjs.push(cell + self.width);
        }
        adjs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config: GeneratorConfig = GeneratorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.symbols_per_table(), 11);
        assert_eq!(config.maze_cells().len(), 45);
        assert_eq!(config.table_cells().len(), 44);
    }

    #[test]
    fn negative_seed_is_rejected() {
        assert_eq!(validate_seed(-1), Err(ConfigError::InvalidSeed(-1)));
        assert_eq!(validate_seed(0), Ok(()));
        assert_eq!(validate_seed(i32::MAX), Ok(()));
    }

    #[test]
    fn obstacle_outside_grid_is_rejected() {
        let mut config: GeneratorConfig = GeneratorConfig::default();
        config.maze_obstacles.push(49);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ObstacleOutOfRange {
                cell: 49,
                width: 7,
                height: 7
            })
        );
    }

    #[test]
    fn disconnected_maze_is_rejected() {
        let mut config: GeneratorConfig = GeneratorConfig::default();
        // Wall off the right column, except its corners which already are obstacles
        config.maze_obstacles.extend([12, 19, 26, 33, 40]);
        config.table_obstacles = config.maze_obstacles.clone();
        // Keep the cell count valid so that only connectivity fails
        config.table_obstacles.retain(|c| ![12, 19, 26, 33, 40].contains(c));
        config.table_obstacles.push(24);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DisconnectedMaze { cell: 13 })
        );
    }

    #[test]
    fn wrong_cell_count_is_rejected() {
        let mut config: GeneratorConfig = GeneratorConfig::default();
        config.table_obstacles.push(23);
        assert_eq!(
            config.validate(),
            Err(ConfigError::CellCountMismatch {
                cells: 43,
                groups: 11
            })
        );
    }

    #[test]
    fn small_pool_is_rejected() {
        let mut config: GeneratorConfig = GeneratorConfig::default();
        config.num_flippable = 31;
        assert_eq!(
            config.validate(),
            Err(ConfigError::PoolTooSmall {
                pool: "flippable",
                available: 31,
                required: 32
            })
        );
    }

    #[test]
    fn adjacent_cells_stay_in_grid() {
        let config: GeneratorConfig = GeneratorConfig::default();
        assert_eq!(config.adjacent_cells(0), vec![1, 7]);
        assert_eq!(config.adjacent_cells(24), vec![23, 25, 17, 31]);
        assert_eq!(config.adjacent_cells(48), vec![47, 41]);
    }
}
