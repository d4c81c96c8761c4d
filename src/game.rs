/*
game.rs

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

//! Puzzle instances.
//!
//! A puzzle instance is one attempt at solving a module. It reads the shared, immutable rules
//! and draws its own, non-reproducible, random state: the starting cell, the solution, the
//! button mapping, ...
//! After a strike the instance draws a new state, but keeps the same rules.
//!
//! * [`not_xray::NotXRayPuzzle`] is the maze-based module.
//! * [`xray::XRayPuzzle`] is the lookup-table module.
//!
//! Both report what the scanner must display with a [`Scan`] object. Rendering the scan lights
//! is up to the host.

pub mod not_xray;
pub mod xray;

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use crate::generator::symbols::SymbolInfo;
use crate::strikes::StrikeReason;

/// Width of the Not X-Ray grid, used to name the cells.
const CELL_NAME_WIDTH: usize = 7;

/// Name of a Not X-Ray cell: the column letter and the 1-based row, such as `C4`.
pub fn cell_name(cell: usize) -> String {
    let col: u8 = (cell % CELL_NAME_WIDTH) as u8;
    format!("{}{}", char::from(b'A' + col), cell / CELL_NAME_WIDTH + 1)
}

/// Direction in which the scanner sweeps the symbols.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, FromRepr, Default)]
#[repr(usize)]
pub enum ScanningMode {
    #[default]
    TopToBottom,
    BottomToTop,
    Alternating,
}

impl fmt::Display for ScanningMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanningMode::TopToBottom => write!(f, "from top to bottom"),
            ScanningMode::BottomToTop => write!(f, "from bottom to top"),
            ScanningMode::Alternating => write!(f, "back and forth"),
        }
    }
}

/// Color of the scan lights.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScannerColor {
    Red,
    Yellow,
    #[default]
    Green,
    Blue,
    White,
}

impl fmt::Display for ScannerColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScannerColor::Red => write!(f, "red"),
            ScannerColor::Yellow => write!(f, "yellow"),
            ScannerColor::Green => write!(f, "green"),
            ScannerColor::Blue => write!(f, "blue"),
            ScannerColor::White => write!(f, "white"),
        }
    }
}

/// What the scanner displays.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    /// Symbols to scan, in order.
    pub symbols: Vec<SymbolInfo>,

    /// Sweep direction.
    pub mode: ScanningMode,

    /// Light color.
    pub color: ScannerColor,
}

impl Scan {
    /// Create a [`Scan`] object.
    pub fn new(symbols: Vec<SymbolInfo>, mode: ScanningMode, color: ScannerColor) -> Self {
        Self {
            symbols,
            mode,
            color,
        }
    }
}

impl fmt::Display for Scan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbols: Vec<String> = self.symbols.iter().map(|s| s.to_string()).collect();
        write!(f, "{} ({}, {})", symbols.join(" "), self.mode, self.color)
    }
}

/// Result of a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonOutcome {
    /// The press has no effect: the module is solved, or the button does not exist.
    Ignored,

    /// The scanner displays something new.
    Display(Scan),

    /// The press is a mistake. The host must record a strike.
    Strike(StrikeReason),

    /// The module is solved.
    Solved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_names() {
        assert_eq!(cell_name(0), "A1");
        assert_eq!(cell_name(24), "D4");
        assert_eq!(cell_name(47), "F7");
    }

    #[test]
    fn scanning_mode_from_index() {
        assert_eq!(ScanningMode::from_repr(1), Some(ScanningMode::BottomToTop));
        assert_eq!(ScanningMode::from_repr(3), None);
    }

    #[test]
    fn scan_display() {
        let scan: Scan = Scan::new(
            vec![SymbolInfo::new(3, true), SymbolInfo::new(60, false)],
            ScanningMode::Alternating,
            ScannerColor::Green,
        );
        assert_eq!(
            scan.to_string(),
            "[3 flipped] [60] (back and forth, green)"
        );
    }
}
