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

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use xray::game::ButtonOutcome;
use xray::game::not_xray::{CENTER, NotXRayPuzzle, SUBMIT_BUTTON};
use xray::generator::cache::RuleCache;
use xray::generator::combinations;
use xray::generator::config::{ConfigError, GeneratorConfig};
use xray::generator::maze::Maze;
use xray::generator::not_xray_rules::{self, NotXRayGenerator, NotXRayRules};
use xray::generator::symbols::{NUM_FLIPPABLE_ICONS, NUM_ICONS, SymbolInfo};
use xray::generator::xray_rules::{self, GRID_SIZE, XRayRules};

#[test]
fn rules_are_reproducible() {
    for seed in [0, 1, 2, 1000] {
        let a: NotXRayRules = not_xray_rules::generate(seed).expect("valid seed");
        let b: NotXRayRules = not_xray_rules::generate(seed).expect("valid seed");
        assert_eq!(a, b, "seed {seed}");
        assert_eq!(xray_rules::generate(seed), xray_rules::generate(seed));
    }
}

#[test]
fn negative_seeds_are_rejected() {
    assert!(matches!(
        not_xray_rules::generate(-1),
        Err(ConfigError::InvalidSeed(-1))
    ));
    assert!(matches!(
        xray_rules::generate(-5),
        Err(ConfigError::InvalidSeed(-5))
    ));
}

#[test]
fn mazes_are_spanning_trees() {
    let config: GeneratorConfig = GeneratorConfig::default();
    let maze_cells: HashSet<usize> = config.maze_cells().into_iter().collect();
    let rules: NotXRayRules = not_xray_rules::generate(17).expect("valid seed");

    for maze in &rules.mazes {
        assert_eq!(maze.openings().count(), maze_cells.len() - 1);
        assert_eq!(maze.reachable_from(CENTER), maze_cells);
        for opening in maze.openings() {
            let (a, b) = maze.opening_cells(opening);
            assert!(maze_cells.contains(&a) && maze_cells.contains(&b));
        }
    }
}

#[test]
fn tables_are_kite_partitions() {
    let config: GeneratorConfig = GeneratorConfig::default();
    let table_cells: HashSet<usize> = config.table_cells().into_iter().collect();

    for seed in [1, 99] {
        let rules: NotXRayRules = not_xray_rules::generate(seed).expect("valid seed");
        let mut all_symbols: HashSet<SymbolInfo> = HashSet::new();

        for table in &rules.tables {
            let cells: HashSet<usize> = table.navigable_cells().into_iter().collect();
            assert_eq!(cells, table_cells);
            let symbols: Vec<SymbolInfo> = table.symbols();
            assert_eq!(symbols.len(), 11);
            assert_eq!(
                symbols.iter().filter(|s| s.index >= NUM_FLIPPABLE_ICONS).count(),
                3
            );

            for symbol in symbols {
                assert!(symbol.index < NUM_ICONS);
                assert!(!symbol.flipped || symbol.index < NUM_FLIPPABLE_ICONS);
                // A symbol is used by one table only
                assert!(all_symbols.insert(symbol));

                let c: Vec<usize> = table.cells_with(symbol);
                assert_eq!(c.len(), 4);
                assert!(
                    combinations::is_valid(&[c[0], c[1], c[2], c[3]], 7)
                        || combinations::is_valid(&[c[0], c[2], c[1], c[3]], 7)
                );
            }
        }
    }
}

#[test]
fn xray_tables() {
    for seed in [1, 2, 3] {
        let rules: XRayRules = xray_rules::generate(seed).expect("valid seed");
        assert_eq!(rules.columns.len(), GRID_SIZE);
        assert_eq!(rules.rows.len(), GRID_SIZE);
        assert_eq!(rules.table_3x3.len(), 9);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let n: usize = rules.number_at(col, row);
                assert!(n < 5);
                if col > 0 {
                    assert_ne!(n, rules.number_at(col - 1, row));
                }
                if row > 0 {
                    assert_ne!(n, rules.number_at(col, row - 1));
                }
                if col > 0 && row > 0 {
                    assert_ne!(n, rules.number_at(col - 1, row - 1));
                }
            }
        }
    }
}

#[test]
fn cache_shares_rulesets_between_threads() {
    let cache: Arc<RuleCache<NotXRayRules>> = Arc::new(RuleCache::new());

    let handles: Vec<thread::JoinHandle<Arc<NotXRayRules>>> = (0..4)
        .map(|_| {
            let cache: Arc<RuleCache<NotXRayRules>> = Arc::clone(&cache);
            thread::spawn(move || cache.not_xray(42).expect("valid seed"))
        })
        .collect();
    let rules: Vec<Arc<NotXRayRules>> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();

    for r in &rules[1..] {
        assert!(Arc::ptr_eq(&rules[0], r));
    }
    assert_eq!(cache.len(), 1);
    assert_eq!(*rules[0], not_xray_rules::generate(42).expect("valid seed"));
}

#[test]
fn generator_reports_its_work() {
    let mut generator: NotXRayGenerator =
        NotXRayGenerator::new(GeneratorConfig::default()).expect("valid config");
    generator.generate(5).expect("valid seed");
    assert!(generator.attempts >= 8);
    assert!(generator.duration >= 0.0);
}

#[test]
fn puzzle_on_shared_rules() {
    let cache: RuleCache<NotXRayRules> = RuleCache::new();
    let rules: Arc<NotXRayRules> = cache.not_xray(1).expect("valid seed");

    let mut puzzle: NotXRayPuzzle =
        NotXRayPuzzle::with_seed(Arc::clone(&rules), 21).expect("valid rules");
    let maze: &Maze = &rules.mazes[puzzle.table()];
    assert_eq!(maze.width(), 7);

    if puzzle.current_cell() != CENTER {
        assert!(matches!(
            puzzle.handle_button(SUBMIT_BUTTON),
            ButtonOutcome::Strike(_)
        ));
        assert_eq!(puzzle.strikes().count(), 1);
    }
    // Strikes never change the rules
    assert!(Arc::ptr_eq(puzzle.rules(), &rules));
}
