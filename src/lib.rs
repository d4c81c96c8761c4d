/*
lib.rs

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

//! Rule-seeded generator for the X-Ray and Not X-Ray bomb-defusal modules.
//!
//! A rule seed selects the manual the defuser reads. For a given seed, the generator always
//! produces the same rules:
//!
//! * Not X-Ray: eight 7x7 tables of symbols, each paired with a maze. See
//!   [`generator::not_xray_rules`].
//! * X-Ray: row, column, and direction header symbols, plus a 12x12 table of numbers. See
//!   [`generator::xray_rules`].
//!
//! Rulesets are shared through [`generator::cache::RuleCache`]. Each module on the bomb then
//! runs its own puzzle instance (see [`game`]) against the shared rules.

pub mod draw;
pub mod game;
pub mod generator;
pub mod saver;
pub mod strikes;
