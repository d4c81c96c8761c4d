/*
rng.rs

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

//! Seeded random number generator for the rule generators.
//!
//! The host game prints its rule-seeded manuals from the subtractive generator (Knuth's
//! subtractive method) shipped with its scripting runtime.
//! The generators in this crate must produce the exact same rules for a given seed, so the
//! algorithm is reproduced here, bit for bit, instead of using one of the [`rand`] generators.
//!
//! Per-attempt randomness (starting cells, button mappings, ...) does not need to be
//! reproducible and uses [`rand`] instead. See [`crate::game`].

/// Seed of the subtractive generator state.
const MSEED: i32 = 161_803_398;

/// Modulus of the generator.
const MBIG: i32 = i32::MAX;

/// Scale factor that converts a state value into a number in `[0, 1)`.
#[allow(clippy::excessive_precision)]
const SAMPLE_SCALE: f64 = 4.656_612_875_245_796_9e-10;

/// Number of entries in the state table. Entry 0 is never used.
const STATE_LEN: usize = 56;

/// Seeded random number generator.
#[derive(Debug, Clone)]
pub struct MonoRandom {
    /// Seed that initialized the generator.
    seed: i32,

    /// Subtractive generator state.
    state: [i32; STATE_LEN],

    /// Index of the next state entry to update.
    inext: usize,

    /// Index of the state entry subtracted from [`MonoRandom::inext`].
    inextp: usize,
}

impl MonoRandom {
    /// Create a [`MonoRandom`] object for the given seed.
    ///
    /// The sign of the seed is ignored (as the host runtime does).
    /// Callers are expected to reject negative seeds before; see
    /// [`super::config::validate_seed`].
    pub fn new(seed: i32) -> Self {
        let mut state: [i32; STATE_LEN] = [0; STATE_LEN];
        let mut mj: i32 = MSEED.wrapping_sub(seed.wrapping_abs());
        state[55] = mj;

        let mut mk: i32 = 1;
        for i in 1..55 {
            let ii: usize = (21 * i) % 55;
            state[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = state[ii];
        }

        for _ in 1..5 {
            for k in 1..STATE_LEN {
                state[k] = state[k].wrapping_sub(state[1 + (k + 30) % 55]);
                if state[k] < 0 {
                    state[k] = state[k].wrapping_add(MBIG);
                }
            }
        }

        Self {
            seed,
            state,
            inext: 0,
            inextp: 31,
        }
    }

    /// Return the seed used to create the generator.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Advance the state and return the new state value, in `[0, i32::MAX)`.
    fn internal_sample(&mut self) -> i32 {
        self.inext += 1;
        if self.inext >= STATE_LEN {
            self.inext = 1;
        }
        self.inextp += 1;
        if self.inextp >= STATE_LEN {
            self.inextp = 1;
        }

        let mut num: i32 = self.state[self.inext].wrapping_sub(self.state[self.inextp]);
        if num < 0 {
            num = num.wrapping_add(MBIG);
        }
        self.state[self.inext] = num;
        num
    }

    /// Advance the state and return a number in `[0, 1)`.
    fn sample(&mut self) -> f64 {
        f64::from(self.internal_sample()) * SAMPLE_SCALE
    }

    /// Return a uniform integer in `[min, max)`.
    ///
    /// Ranges of zero or one value return `min` without advancing the state.
    pub fn next(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "invalid range {min}..{max}");
        let range: i64 = i64::from(max) - i64::from(min);
        if range <= 1 {
            return min;
        }
        (self.sample() * range as f64) as i32 + min
    }

    /// Return a uniform index in `[0, len)`.
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next(0, len as i32) as usize
    }

    /// Return a random boolean, drawn as `next(0, 2) != 0`.
    pub fn next_bool(&mut self) -> bool {
        self.next(0, 2) != 0
    }

    /// Shuffle the slice in place with the Fisher-Yates algorithm.
    ///
    /// The slice is walked from the end. The last unprocessed position is swapped with a
    /// uniformly chosen position at or before it.
    pub fn shuffle_fisher_yates<T>(&mut self, items: &mut [T]) {
        let mut i: usize = items.len();
        while i > 1 {
            let index: usize = self.next_index(i);
            i -= 1;
            items.swap(index, i);
        }
    }
}
