/*
strikes.rs

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

//! Manage the strike counter.
//!
//! A strike is a mistake reported to the host game: trying to walk through a maze wall,
//! submitting on the wrong cell, or pressing the wrong button.
//! Strikes never affect the generated rules.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::cell_name;
use crate::generator::maze::Direction;

/// Cause of a strike.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrikeReason {
    /// A closed wall blocks the move from the cell.
    Wall { cell: usize, direction: Direction },

    /// The player submitted on the wrong cell.
    WrongSubmit { cell: usize },

    /// The player pressed the wrong answer button (1-based).
    WrongButton { button: usize },
}

impl fmt::Display for StrikeReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrikeReason::Wall { cell, direction } => write!(
                f,
                "You tried to go {direction} from {}, but there's a wall there.",
                cell_name(*cell)
            ),
            StrikeReason::WrongSubmit { cell } => {
                write!(f, "You pressed Submit on cell {}.", cell_name(*cell))
            }
            StrikeReason::WrongButton { button } => {
                write!(f, "You pressed {button}, which is wrong.")
            }
        }
    }
}

/// Manage the strike counter.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Strikes {
    /// Strikes in the order they occurred.
    history: Vec<StrikeReason>,
}

impl Strikes {
    /// Create a [`Strikes`] object.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Record a strike.
    pub fn add(&mut self, reason: StrikeReason) {
        self.history.push(reason);
        info!("Strike {}: {reason}", self.history.len());
    }

    /// Return the number of strikes.
    pub fn count(&self) -> usize {
        self.history.len()
    }

    /// Return the most recent strike.
    pub fn last(&self) -> Option<&StrikeReason> {
        self.history.last()
    }

    /// Return all the strikes, oldest first.
    pub fn history(&self) -> &[StrikeReason] {
        &self.history
    }
}
