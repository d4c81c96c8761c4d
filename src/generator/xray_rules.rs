/*
xray_rules.rs

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

//! Build the X-Ray ruleset: lookup-table headers and the table of numbers.
//!
//! The X-Ray manual is a 12x12 table of numbers (1 to 5 in the manual, stored here as `0..5`).
//! Each column and each row of the table is labelled with a symbol, and a 3x3 table of
//! symbols gives the direction to move from the selected cell:
//!
//! ```text
//! up-left    up    up-right
//! left    stay put    right
//! down-left down down-right
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use super::config::{self, ConfigError};
use super::rng::MonoRandom;
use super::symbols::{NUM_ASYMMETRIC_ICONS, NUM_FLIPPABLE_ICONS, SymbolInfo};

/// Number of columns and rows of the lookup table.
pub const GRID_SIZE: usize = 12;

/// Number of distinct values in the lookup table (and of answer buttons).
pub const NUM_VALUES: usize = 5;

/// Number of symmetric icons available for the 3x3 table.
const NUM_SYMMETRIC_ICONS: usize = 22;

/// Direction names of the 3x3 table, in reading order.
pub const DIRECTION_NAMES: [&str; 9] = [
    "Move up-left",
    "Move up",
    "Move up-right",
    "Move left",
    "Stay put",
    "Move right",
    "Move down-left",
    "Move down",
    "Move down-right",
];

/// Header symbols of the default manual (seed 1): 12 columns, 12 rows, then the 3x3 table.
///
/// Each code is the icon column in the 11-wide atlas sheet (`a` to `k`), the 1-based sheet
/// row, and `n` (normal) or `f` (flipped).
const SEED1_ICONS: [&str; 33] = [
    "a1n", "a1f", "b1n", "b1f", "c1n", "c1f", "d1n", "d1f", "e1n", "e1f", "h2f", "h2n", "d7n",
    "j1n", "h6n", "g1n", "a6n", "a2n", "k2n", "h1n", "a7n", "e2n", "d6n", "b3n", "a10n", "b10n",
    "c10n", "d10n", "e10n", "f10n", "i10n", "h9n", "i9n",
];

/// Number of icons per row in the atlas sheet.
const SHEET_WIDTH: usize = 11;

/// Decode an icon code of the default manual.
fn decode_sheet_code(code: &str) -> SymbolInfo {
    let bytes: &[u8] = code.as_bytes();
    let column: usize = usize::from(bytes[0] - b'a');
    let row: Option<usize> = code[1..code.len() - 1].parse::<usize>().ok();
    debug_assert!(
        column < SHEET_WIDTH && matches!(row, Some(1..=10)),
        "malformed sheet code {code}"
    );
    let row: usize = row.unwrap_or(1);
    SymbolInfo::new(column + SHEET_WIDTH * (row - 1), code.ends_with('f'))
}

/// X-Ray ruleset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct XRayRules {
    /// Seed the rules were generated from.
    pub seed: i32,

    /// Column header symbols.
    pub columns: Vec<SymbolInfo>,

    /// Row header symbols.
    pub rows: Vec<SymbolInfo>,

    /// Direction symbols, in reading order (see [`DIRECTION_NAMES`]).
    pub table_3x3: Vec<SymbolInfo>,

    /// Table of numbers, row-major, values in `0..5`.
    pub numbers: Vec<usize>,
}

impl XRayRules {
    /// Number in the table at the given column and row.
    pub fn number_at(&self, col: usize, row: usize) -> usize {
        self.numbers[row * GRID_SIZE + col]
    }
}

/// Generate the X-Ray ruleset for the given seed.
///
/// Seed 1 is the default manual: its header symbols are fixed. The table of numbers is always
/// generated.
///
/// # Errors
///
/// The function returns an error for negative seeds.
pub fn generate(seed: i32) -> Result<XRayRules, ConfigError> {
    config::validate_seed(seed)?;
    let mut rng: MonoRandom = MonoRandom::new(seed);

    let rules: XRayRules = if seed == 1 {
        let icons: Vec<SymbolInfo> = SEED1_ICONS.iter().map(|c| decode_sheet_code(c)).collect();
        XRayRules {
            seed,
            columns: icons[0..12].to_vec(),
            rows: icons[12..24].to_vec(),
            table_3x3: icons[24..33].to_vec(),
            numbers: generate_numbers(&mut rng),
        }
    } else {
        // Symmetric icons for the 3x3 table
        let mut symmetric: Vec<usize> = (0..NUM_SYMMETRIC_ICONS).collect();
        rng.shuffle_fisher_yates(&mut symmetric);
        let table_3x3: Vec<SymbolInfo> = symmetric[..9]
            .iter()
            .map(|x| SymbolInfo::new(x + NUM_ASYMMETRIC_ICONS, false))
            .collect();

        // Any asymmetric icon for the rows
        let mut asymmetric: Vec<usize> = (0..NUM_ASYMMETRIC_ICONS).collect();
        rng.shuffle_fisher_yates(&mut asymmetric);
        let rows: Vec<SymbolInfo> = asymmetric[..GRID_SIZE]
            .iter()
            .map(|x| SymbolInfo::new(*x, *x < NUM_FLIPPABLE_ICONS && rng.next_bool()))
            .collect();

        // Flippable icons not used by the rows for the columns, each one in both orientations
        let mut columns_raw: Vec<usize> = (0..NUM_FLIPPABLE_ICONS)
            .filter(|x| !rows.iter().any(|r| r.index == *x))
            .collect();
        rng.shuffle_fisher_yates(&mut columns_raw);
        let mut columns: Vec<SymbolInfo> = Vec::with_capacity(GRID_SIZE);
        for icon in &columns_raw[..GRID_SIZE / 2] {
            let flip_first: bool = rng.next(0, 2) == 0;
            columns.push(SymbolInfo::new(*icon, flip_first));
            columns.push(SymbolInfo::new(*icon, !flip_first));
        }

        XRayRules {
            seed,
            columns,
            rows,
            table_3x3,
            numbers: generate_numbers(&mut rng),
        }
    };

    info!("X-Ray rules generated for seed {seed}");
    Ok(rules)
}

/// Generate the 12x12 table of numbers.
///
/// Each cell gets a random value that differs from its left, upper, and upper-left neighbours.
fn generate_numbers(rng: &mut MonoRandom) -> Vec<usize> {
    let mut table: Vec<usize> = vec![0; GRID_SIZE * GRID_SIZE];
    let mut candidates: Vec<usize> = Vec::with_capacity(NUM_VALUES);

    for i in 0..GRID_SIZE * GRID_SIZE {
        let x: usize = i % GRID_SIZE;
        let y: usize = i / GRID_SIZE;
        candidates.clear();
        candidates.extend((0..NUM_VALUES).filter(|j| {
            (x == 0 || *j != table[i - 1])
                && (y == 0 || *j != table[i - GRID_SIZE])
                && (x == 0 || y == 0 || *j != table[i - GRID_SIZE - 1])
        }));
        table[i] = candidates[rng.next_index(candidates.len())];
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::symbols::NUM_ICONS;
    use std::collections::HashSet;

    #[test]
    fn decode_default_manual_codes() {
        assert_eq!(decode_sheet_code("a1n"), SymbolInfo::new(0, false));
        assert_eq!(decode_sheet_code("b1f"), SymbolInfo::new(1, true));
        assert_eq!(decode_sheet_code("h2f"), SymbolInfo::new(18, true));
        assert_eq!(decode_sheet_code("i10n"), SymbolInfo::new(107, false));
    }

    #[test]
    fn every_default_manual_code_is_well_formed() {
        let mut seen: HashSet<SymbolInfo> = HashSet::new();
        for code in SEED1_ICONS {
            let bytes: &[u8] = code.as_bytes();
            assert!((b'a'..=b'k').contains(&bytes[0]), "{code}");
            assert!(code.ends_with('n') || code.ends_with('f'), "{code}");
            let row: usize = code[1..code.len() - 1].parse().expect("numeric row");
            assert!((1..=10).contains(&row), "{code}");

            let symbol: SymbolInfo = decode_sheet_code(code);
            assert!(symbol.index < NUM_ICONS, "{code}");
            assert_eq!(symbol.index, usize::from(bytes[0] - b'a') + SHEET_WIDTH * (row - 1));
            assert!(seen.insert(symbol), "{code} listed twice");
        }
    }

    #[test]
    fn default_manual_headers() {
        let rules: XRayRules = generate(1).expect("valid seed");
        assert_eq!(rules.columns[0], SymbolInfo::new(0, false));
        assert_eq!(rules.columns[1], SymbolInfo::new(0, true));
        assert_eq!(rules.rows[0], SymbolInfo::new(3 + 11 * 6, false));
        assert_eq!(rules.table_3x3[4], SymbolInfo::new(4 + 11 * 9, false));
        assert_eq!(rules.table_3x3.len(), 9);
    }

    #[test]
    fn numbers_differ_from_their_neighbours() {
        for seed in [1, 2, 42] {
            let rules: XRayRules = generate(seed).expect("valid seed");
            assert_eq!(rules.numbers.len(), 144);
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    let n: usize = rules.number_at(col, row);
                    assert!(n < NUM_VALUES);
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
    fn seeded_headers_follow_icon_ranges() {
        let rules: XRayRules = generate(42).expect("valid seed");

        assert_eq!(rules.table_3x3.len(), 9);
        for s in &rules.table_3x3 {
            assert!((88..110).contains(&s.index) && !s.flipped);
        }
        let unique: HashSet<SymbolInfo> = rules.table_3x3.iter().copied().collect();
        assert_eq!(unique.len(), 9);

        assert_eq!(rules.rows.len(), 12);
        for s in &rules.rows {
            assert!(s.index < 88);
            assert!(s.index < 55 || !s.flipped);
        }

        assert_eq!(rules.columns.len(), 12);
        for pair in rules.columns.chunks(2) {
            assert_eq!(pair[0].index, pair[1].index);
            assert_ne!(pair[0].flipped, pair[1].flipped);
            assert!(pair[0].index < 55);
            assert!(!rules.rows.iter().any(|r| r.index == pair[0].index));
        }
    }

    #[test]
    fn same_seed_same_rules() {
        assert_eq!(generate(42), generate(42));
        assert_ne!(generate(42), generate(43));
    }
}
