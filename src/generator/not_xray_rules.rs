/*
not_xray_rules.rs

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

//! Build the Not X-Ray ruleset: symbol tables and mazes.
//!
//! For a given seed, the generator:
//!
//! 1. distributes the symbols among the tables (see [`super::symbols::assign`]),
//! 2. for each table, generates a maze (see [`super::maze::Maze::generate`]), and arranges
//!    the table symbols on the grid (see [`super::combinations::Arrangement`]).
//!
//! All the random draws come from one [`MonoRandom`] generator, in that order.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::combinations::{self, Arrangement, Combination};
use super::config::{self, ConfigError, GeneratorConfig};
use super::maze::Maze;
use super::rng::MonoRandom;
use super::symbols::{self, SymbolInfo};
use crate::draw;

/// Symbols painted on the grid cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTable {
    /// Number of columns.
    width: usize,

    /// Symbol of each cell. Obstacle cells have no symbol.
    cells: Vec<Option<SymbolInfo>>,
}

impl SymbolTable {
    /// Paint symbol `i` onto the four cells of combination `i`.
    pub fn from_partition(
        config: &GeneratorConfig,
        symbols: &[SymbolInfo],
        partition: &[Combination],
    ) -> Self {
        let mut cells: Vec<Option<SymbolInfo>> = vec![None; config.num_cells()];
        for (symbol, combination) in symbols.iter().zip(partition) {
            for cell in combination {
                cells[*cell] = Some(*symbol);
            }
        }
        Self {
            width: config.width,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells, obstacles included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Symbol of the given cell.
    pub fn get(&self, cell: usize) -> Option<SymbolInfo> {
        self.cells.get(cell).copied().flatten()
    }

    /// Cells that have a symbol, in increasing order.
    pub fn navigable_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(c, _)| c)
            .collect()
    }

    /// Cells that carry the given symbol, in increasing order.
    pub fn cells_with(&self, symbol: SymbolInfo) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Some(symbol))
            .map(|(c, _)| c)
            .collect()
    }

    /// Distinct symbols of the table, in order of first appearance.
    pub fn symbols(&self) -> Vec<SymbolInfo> {
        let mut ret: Vec<SymbolInfo> = Vec::new();
        for symbol in self.cells.iter().flatten() {
            if !ret.contains(symbol) {
                ret.push(*symbol);
            }
        }
        ret
    }
}

/// Not X-Ray ruleset.
///
/// Tables and mazes go by pairs: the player navigates `mazes[i]` when they are in
/// `tables[i]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotXRayRules {
    /// Seed the rules were generated from.
    pub seed: i32,

    /// Symbol tables.
    pub tables: Vec<SymbolTable>,

    /// Mazes.
    pub mazes: Vec<Maze>,
}

/// Not X-Ray ruleset generator.
pub struct NotXRayGenerator {
    /// Generator parameters.
    config: GeneratorConfig,

    /// Valid combinations for the configuration.
    combinations: Vec<Combination>,

    /// Number of partition search attempts for the last ruleset, over all the tables.
    pub attempts: usize,

    /// Number of backtracks for the last ruleset, over all the tables.
    pub backtracks: usize,

    /// Duration in seconds it took to generate the last ruleset.
    pub duration: f32,
}

impl NotXRayGenerator {
    /// Create the object.
    ///
    /// # Errors
    ///
    /// The method returns an error when the configuration is invalid. See
    /// [`GeneratorConfig::validate`].
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let combinations: Vec<Combination> = combinations::enumerate(&config)?;
        Ok(Self {
            config,
            combinations,
            attempts: 0,
            backtracks: 0,
            duration: 0.0,
        })
    }

    /// Generator parameters.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the ruleset for the given seed.
    ///
    /// # Errors
    ///
    /// The method returns an error for negative seeds.
    pub fn generate(&mut self, seed: i32) -> Result<NotXRayRules, ConfigError> {
        config::validate_seed(seed)?;
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.backtracks = 0;

        let mut rng: MonoRandom = MonoRandom::new(seed);
        let groups: Vec<Vec<SymbolInfo>> = symbols::assign(&self.config, &mut rng);

        let mut tables: Vec<SymbolTable> = Vec::with_capacity(self.config.num_tables);
        let mut mazes: Vec<Maze> = Vec::with_capacity(self.config.num_tables);
        for (table_ix, symbols) in groups.iter().enumerate() {
            debug!("Generating table {table_ix}");
            let maze: Maze = Maze::generate(&self.config, &mut rng);

            let mut arrangement: Arrangement = Arrangement::new(&self.combinations, &self.config);
            let partition: Vec<Combination> = arrangement.generate(&mut rng);
            self.attempts += arrangement.attempts;
            self.backtracks += arrangement.backtracks;

            tables.push(SymbolTable::from_partition(&self.config, symbols, &partition));
            mazes.push(maze);
        }

        self.duration = start.elapsed().as_secs_f32();
        info!(
            "Not X-Ray rules for seed {seed}: attempts = {}  backtracks = {}  duration = {}s",
            self.attempts, self.backtracks, self.duration
        );
        let rules: NotXRayRules = NotXRayRules {
            seed,
            tables,
            mazes,
        };
        draw::log_not_xray(&rules);
        Ok(rules)
    }
}

/// Generate the Not X-Ray ruleset for the given seed with the default configuration.
///
/// # Errors
///
/// The function returns an error for negative seeds.
pub fn generate(seed: i32) -> Result<NotXRayRules, ConfigError> {
    NotXRayGenerator::new(GeneratorConfig::default())?.generate(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_symbol_covers_four_cells() {
        let rules: NotXRayRules = generate(3).expect("valid seed");
        let config: GeneratorConfig = GeneratorConfig::default();

        assert_eq!(rules.tables.len(), 8);
        assert_eq!(rules.mazes.len(), 8);
        for table in &rules.tables {
            let symbols: Vec<SymbolInfo> = table.symbols();
            assert_eq!(symbols.len(), 11);

            let mut covered: HashSet<usize> = HashSet::new();
            for symbol in symbols {
                let cells: Vec<usize> = table.cells_with(symbol);
                assert_eq!(cells.len(), 4, "{symbol}");
                let kite: Combination = [cells[0], cells[1], cells[2], cells[3]];
                // Cells come sorted, so the kite order is a, then b and c in either order, d
                let swapped: Combination = [cells[0], cells[2], cells[1], cells[3]];
                assert!(
                    combinations::is_valid(&kite, 7) || combinations::is_valid(&swapped, 7),
                    "{symbol}: {cells:?}"
                );
                covered.extend(cells);
            }
            assert_eq!(covered, config.table_cells().into_iter().collect());
            for obstacle in &config.table_obstacles {
                assert_eq!(table.get(*obstacle), None);
            }
        }
    }

    #[test]
    fn same_seed_same_rules() {
        assert_eq!(generate(42), generate(42));
        assert_ne!(generate(42), generate(7));
    }

    #[test]
    fn symbol_of_cell_out_of_range() {
        let rules: NotXRayRules = generate(1).expect("valid seed");
        assert_eq!(rules.tables[0].get(49), None);
        assert_eq!(rules.tables[0].len(), 49);
        assert_eq!(rules.tables[0].navigable_cells().len(), 44);
    }

    #[test]
    fn negative_seed_is_rejected() {
        assert_eq!(generate(-3), Err(ConfigError::InvalidSeed(-3)));
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let mut config: GeneratorConfig = GeneratorConfig::default();
        config.num_tables = 0;
        assert!(matches!(
            NotXRayGenerator::new(config),
            Err(ConfigError::NoTables)
        ));
    }

    #[test]
    fn statistics_are_recorded() {
        let mut generator: NotXRayGenerator =
            NotXRayGenerator::new(GeneratorConfig::default()).expect("valid configuration");
        generator.generate(5).expect("valid seed");
        assert!(generator.attempts >= 8);
    }
}
