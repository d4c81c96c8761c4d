/*
symbols.rs

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

//! Symbols and their distribution among the tables.
//!
//! A symbol is an icon from the external icon atlas, drawn normally or mirrored.
//! The atlas holds 110 icons:
//!
//! * `0..55` are asymmetric icons that can be flipped (mirrored),
//! * `55..88` are asymmetric icons that are never flipped,
//! * `88..110` are symmetric icons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::GeneratorConfig;
use super::rng::MonoRandom;

/// Number of icons that can be flipped.
pub const NUM_FLIPPABLE_ICONS: usize = 55;

/// Number of asymmetric icons (flippable or not).
pub const NUM_ASYMMETRIC_ICONS: usize = 88;

/// Number of icons in the atlas.
pub const NUM_ICONS: usize = 110;

/// Symbol: an icon identifier and whether the icon is flipped.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SymbolInfo {
    /// Index of the icon in the icon atlas.
    pub index: usize,

    /// Whether the icon is drawn mirrored.
    pub flipped: bool,
}

impl SymbolInfo {
    /// Create a [`SymbolInfo`] object.
    pub fn new(index: usize, flipped: bool) -> Self {
        Self { index, flipped }
    }
}

impl fmt::Display for SymbolInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.flipped {
            write!(f, "[{} flipped]", self.index)
        } else {
            write!(f, "[{}]", self.index)
        }
    }
}

/// Distribute the symbols among the tables.
///
/// Both pools are shuffled once (non-flippable first). Table `i` then receives the flippable
/// symbols `[4i, 4i+4)` unflipped, the same symbols flipped, and the non-flippable symbols
/// `[3i, 3i+3)` (with the default group sizes).
///
/// The configuration must have been validated.
pub fn assign(config: &GeneratorConfig, rng: &mut MonoRandom) -> Vec<Vec<SymbolInfo>> {
    let mut unflippable: Vec<usize> = (0..config.num_unflippable)
        .map(|c| config.num_flippable + c)
        .collect();
    rng.shuffle_fisher_yates(&mut unflippable);
    let mut flippable: Vec<usize> = (0..config.num_flippable).collect();
    rng.shuffle_fisher_yates(&mut flippable);

    let per_flip: usize = config.flippable_per_table;
    let per_unflip: usize = config.unflippable_per_table;

    (0..config.num_tables)
        .map(|table| {
            let flip_group: &[usize] = &flippable[table * per_flip..(table + 1) * per_flip];
            let unflip_group: &[usize] =
                &unflippable[table * per_unflip..(table + 1) * per_unflip];

            let mut symbols: Vec<SymbolInfo> = Vec::with_capacity(config.symbols_per_table());
            symbols.extend(flip_group.iter().map(|s| SymbolInfo::new(*s, false)));
            symbols.extend(flip_group.iter().map(|s| SymbolInfo::new(*s, true)));
            symbols.extend(unflip_group.iter().map(|s| SymbolInfo::new(*s, false)));
            symbols
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn symbol_display() {
        assert_eq!(SymbolInfo::new(12, false).to_string(), "[12]");
        assert_eq!(SymbolInfo::new(3, true).to_string(), "[3 flipped]");
    }

    #[test]
    fn symbol_equality_uses_both_fields() {
        assert_eq!(SymbolInfo::new(4, true), SymbolInfo::new(4, true));
        assert_ne!(SymbolInfo::new(4, true), SymbolInfo::new(4, false));
        assert_ne!(SymbolInfo::new(4, false), SymbolInfo::new(5, false));
    }

    #[test]
    fn every_symbol_is_used_once_per_orientation() {
        let config: GeneratorConfig = GeneratorConfig::default();
        let groups: Vec<Vec<SymbolInfo>> = assign(&config, &mut MonoRandom::new(7));

        assert_eq!(groups.len(), 8);
        let mut seen: HashSet<SymbolInfo> = HashSet::new();
        for group in &groups {
            assert_eq!(group.len(), 11);
            for symbol in group {
                assert!(seen.insert(*symbol), "{symbol} used twice");
            }
            // Four flippable icons in both orientations, then three non-flippable icons
            for i in 0..4 {
                assert_eq!(group[i].index, group[i + 4].index);
                assert!(!group[i].flipped && group[i + 4].flipped);
                assert!(group[i].index < 55);
            }
            for symbol in &group[8..] {
                assert!((55..110).contains(&symbol.index));
                assert!(!symbol.flipped);
            }
        }
    }

    #[test]
    fn assignment_is_deterministic() {
        let config: GeneratorConfig = GeneratorConfig::default();
        assert_eq!(
            assign(&config, &mut MonoRandom::new(42)),
            assign(&config, &mut MonoRandom::new(42))
        );
        assert_ne!(
            assign(&config, &mut MonoRandom::new(42)),
            assign(&config, &mut MonoRandom::new(43))
        );
    }
}
