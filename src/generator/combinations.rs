/*
combinations.rs

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

//! Arrange the symbols of a table into combinations.
//!
//! Each symbol of a table occupies four cells that form a kite:
//!
//! ```text
//!       a
//!   b
//!           c
//!     d
//! ```
//!
//! * `b` is below `a` and to its left,
//! * `c` is below `a` and to the right of both `a` and `b`,
//! * `d` is below both `b` and `c`, and strictly between them horizontally.
//!
//! [`enumerate`] lists all these combinations for the table cells.
//! [`Arrangement::generate`] then searches for a set of disjoint combinations that covers all
//! the table cells (a partition), one combination per symbol.

use log::debug;
use std::time::Instant;

use super::config::{ConfigError, GeneratorConfig};
use super::rng::MonoRandom;

/// Four cells `[a, b, c, d]` forming a kite.
pub type Combination = [usize; 4];

/// Whether the four cells form a valid kite in a grid of the given width.
pub fn is_valid(combination: &Combination, width: usize) -> bool {
    let [a, b, c, d] = *combination;
    let (ra, ca) = (a / width, a % width);
    let (rb, cb) = (b / width, b % width);
    let (rc, cc) = (c / width, c % width);
    let (rd, cd) = (d / width, d % width);

    rb > ra && cb < ca && rc > ra && cc > ca && cc > cb && rd > rb && rd > rc && cb < cd && cd < cc
}

/// List all the valid combinations of table cells.
///
/// The order of the returned list is significant: the partition search draws random offsets
/// into it, so changing the order changes the generated rules.
///
/// # Errors
///
/// The function returns an error if a table cell is not part of any combination. In that case
/// no partition can exist.
pub fn enumerate(config: &GeneratorConfig) -> Result<Vec<Combination>, ConfigError> {
    let sqs: Vec<usize> = config.table_cells();
    let row = |i: usize| config.row(sqs[i]);
    let col = |i: usize| config.col(sqs[i]);
    let mut combinations: Vec<Combination> = Vec::new();

    for ai in 0..sqs.len() {
        for bi in ai + 1..sqs.len() {
            if !(row(bi) > row(ai) && col(bi) < col(ai)) {
                continue;
            }
            for ci in ai + 1..sqs.len() {
                if ci == bi || !(row(ci) > row(ai) && col(ci) > col(ai) && col(ci) > col(bi)) {
                    continue;
                }
                for di in bi.max(ci) + 1..sqs.len() {
                    if row(di) > row(bi)
                        && row(di) > row(ci)
                        && col(di) > col(bi)
                        && col(di) < col(ci)
                    {
                        combinations.push([sqs[ai], sqs[bi], sqs[ci], sqs[di]]);
                    }
                }
            }
        }
    }

    if let Some(cell) = sqs
        .iter()
        .find(|s| !combinations.iter().any(|cmb| cmb.contains(s)))
    {
        return Err(ConfigError::UncoveredCell { cell: *cell });
    }

    debug!("{} valid combinations", combinations.len());
    Ok(combinations)
}

/// Result of a partition search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// A partition was found. The deepest choice comes first.
    Found(Vec<Combination>),

    /// No partition down this branch. Carries the updated backtrack counter.
    DeadEnd { backtracks: usize },

    /// The backtrack budget is spent. The attempt must be restarted.
    Exhausted,
}

/// Limits of a partition search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Budget {
    /// Number of combinations to select.
    pub groups: usize,

    /// The attempt is abandoned as soon as the backtrack counter exceeds this value.
    pub backtrack_limit: usize,
}

/// Recursively select disjoint combinations.
///
/// `depth` combinations have been selected so far, and `candidates` lists the combinations
/// that do not overlap them. The candidates are tried circularly, starting at a random
/// offset. Each branch that fails after trying all its candidates counts as one backtrack.
///
/// The backtrack counter is passed in and returned, so that the budget is shared by the
/// whole attempt without hidden state.
pub fn search(
    rng: &mut MonoRandom,
    budget: Budget,
    depth: usize,
    candidates: &[Combination],
    backtracks: usize,
) -> Search {
    if depth == budget.groups {
        return Search::Found(Vec::with_capacity(budget.groups));
    }
    if candidates.is_empty() {
        return Search::DeadEnd { backtracks };
    }

    let mut backtracks: usize = backtracks;
    let len: usize = candidates.len();
    let offset: usize = rng.next_index(len);
    for ir in 0..len {
        let combination: &Combination = &candidates[(ir + offset) % len];
        let left: Vec<Combination> = candidates
            .iter()
            .filter(|cmb| cmb.iter().all(|c| !combination.contains(c)))
            .copied()
            .collect();

        match search(rng, budget, depth + 1, &left, backtracks) {
            Search::Found(mut partition) => {
                partition.push(*combination);
                return Search::Found(partition);
            }
            Search::Exhausted => return Search::Exhausted,
            Search::DeadEnd { backtracks: b } => {
                backtracks = b;
                if backtracks > budget.backtrack_limit {
                    return Search::Exhausted;
                }
            }
        }
    }
    Search::DeadEnd {
        backtracks: backtracks + 1,
    }
}

/// Partition search with automatic restarts.
pub struct Arrangement<'a> {
    /// All the valid combinations.
    combinations: &'a [Combination],

    /// Search limits.
    budget: Budget,

    /// Number of attempts it took to find the last partition.
    pub attempts: usize,

    /// Number of backtracks, over all the attempts, for the last partition.
    pub backtracks: usize,

    /// Duration in seconds it took to find the last partition.
    pub duration: f32,
}

impl<'a> Arrangement<'a> {
    /// Create the object.
    pub fn new(combinations: &'a [Combination], config: &GeneratorConfig) -> Self {
        Self {
            combinations,
            budget: Budget {
                groups: config.symbols_per_table(),
                backtrack_limit: config.backtrack_limit,
            },
            attempts: 0,
            backtracks: 0,
            duration: 0.0,
        }
    }

    /// Search for a partition of the table cells.
    ///
    /// An attempt that exceeds the backtrack budget, or that fails, is restarted from scratch.
    /// The random generator keeps advancing, so each attempt explores a different order.
    /// Attempts are retried until a partition is found.
    pub fn generate(&mut self, rng: &mut MonoRandom) -> Vec<Combination> {
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.backtracks = 0;

        loop {
            self.attempts += 1;
            match search(rng, self.budget, 0, self.combinations, 0) {
                Search::Found(partition) => {
                    self.duration = start.elapsed().as_secs_f32();
                    debug!(
                        "Partition found: attempts = {}  backtracks = {}  duration = {}",
                        self.attempts, self.backtracks, self.duration
                    );
                    return partition;
                }
                Search::DeadEnd { backtracks } => {
                    self.backtracks += backtracks;
                    debug!("    Attempt {} failed, restarting", self.attempts);
                }
                Search::Exhausted => {
                    self.backtracks += self.budget.backtrack_limit + 1;
                    debug!(
                        "    Attempt {} exceeded {} backtracks, restarting",
                        self.attempts, self.budget.backtrack_limit
                    );
                }
            }
        }
    }
}
