/*
generator.rs

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

//! Generate the rule-seeded rules of the X-Ray and Not X-Ray modules.
//!
//! All the rules derive from a single integer seed, through the [`rng::MonoRandom`]
//! generator, so that a seed always produces the same manual.
//!
//! The Not X-Ray rules ([`not_xray_rules::NotXRayRules`]) are eight pairs of a symbol table
//! and a maze on a 7x7 grid:
//!
//! * The symbols of each table are picked by [`symbols::assign`].
//!   Every table has eleven symbols.
//!
//! * Each maze is a random spanning tree of the grid, see [`maze::Maze::generate`].
//!
//! * Each symbol occupies four cells that form a kite.
//!   [`combinations::enumerate`] lists the possible kites, and
//!   [`combinations::Arrangement::generate`] searches for eleven kites that cover the grid
//!   without overlapping.
//!   The search is a backtracking search: when it backtracks too much, it is restarted with a
//!   new random order.
//!
//! The X-Ray rules ([`xray_rules::XRayRules`]) are a 12x12 lookup table of numbers with symbol
//! headers, see [`xray_rules::generate`].
//!
//! Generating rules is costly. The [`cache::RuleCache`] object builds each ruleset once and
//! shares it between all the modules that use the same seed.
//!
//! The Not X-Ray generator takes a [`config::GeneratorConfig`] object, or uses the default
//! configuration. The configuration is validated before anything is generated.

pub mod cache;
pub mod combinations;
pub mod config;
pub mod maze;
pub mod not_xray_rules;
pub mod rng;
pub mod symbols;
pub mod xray_rules;
