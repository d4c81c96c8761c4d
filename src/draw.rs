/*
draw.rs

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

//! Draw the rules as text.
//!
//! The functions return the lines to print. A symbol is shown as its icon index, followed
//! by `f` when it is flipped. Obstacle cells are shown as `.`.

use log::{Level, debug, log_enabled};

use crate::generator::maze::{Direction, Maze};
use crate::generator::not_xray_rules::{NotXRayRules, SymbolTable};
use crate::generator::symbols::SymbolInfo;
use crate::generator::xray_rules::{GRID_SIZE, XRayRules};

/// Width of a symbol cell, in characters.
const CELL_WIDTH: usize = 6;

/// Short code of a symbol.
pub fn symbol_code(symbol: SymbolInfo) -> String {
    if symbol.flipped {
        format!("{}f", symbol.index)
    } else {
        symbol.index.to_string()
    }
}

/// Draw a symbol table, one line per row.
pub fn symbol_table(table: &SymbolTable) -> Vec<String> {
    let width: usize = table.width();
    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut s: String = String::new();
    for row in 0..table.len() / width {
        s.clear();
        for col in 0..width {
            match table.get(row * width + col) {
                Some(symbol) => s.push_str(&format!("{:^CELL_WIDTH$}", symbol_code(symbol))),
                None => s.push_str(&format!("{:^CELL_WIDTH$}", ".")),
            }
        }
        lines.push(s.trim_end().to_string());
    }
    lines
}

/// Draw the walls of a maze.
pub fn maze(maze: &Maze) -> Vec<String> {
    let width: usize = maze.width();
    let mut lines: Vec<String> = vec![format!("+{}", "--+".repeat(width))];
    let mut s: String = String::new();

    for row in 0..maze.height() {
        s.clear();
        s.push('|');
        for col in 0..width {
            let cell: usize = row * width + col;
            s.push_str(if maze.can_move(cell, Direction::Right) {
                "   "
            } else {
                "  |"
            });
        }
        lines.push(s.clone());

        s.clear();
        s.push('+');
        for col in 0..width {
            let cell: usize = row * width + col;
            s.push_str(if maze.can_move(cell, Direction::Down) {
                "  +"
            } else {
                "--+"
            });
        }
        lines.push(s.clone());
    }
    lines
}

/// Draw the X-Ray table of numbers with its headers, followed by the 3x3 table.
///
/// Numbers are shown 1-based, as on the module buttons.
pub fn xray(rules: &XRayRules) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut s: String = " ".repeat(CELL_WIDTH);

    for column in &rules.columns {
        s.push_str(&format!("{:^CELL_WIDTH$}", symbol_code(*column)));
    }
    lines.push(s.trim_end().to_string());

    for (row, symbol) in rules.rows.iter().enumerate() {
        s = format!("{:^CELL_WIDTH$}", symbol_code(*symbol));
        for col in 0..GRID_SIZE {
            s.push_str(&format!("{:^CELL_WIDTH$}", rules.number_at(col, row) + 1));
        }
        lines.push(s.trim_end().to_string());
    }

    lines.push(String::new());
    for directions in rules.table_3x3.chunks(3) {
        s.clear();
        for symbol in directions {
            s.push_str(&format!("{:^CELL_WIDTH$}", symbol_code(*symbol)));
        }
        lines.push(s.trim_end().to_string());
    }
    lines
}

/// Draw all the tables and mazes of a Not X-Ray ruleset, side by side.
pub fn not_xray(rules: &NotXRayRules) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for (i, (table, m)) in rules.tables.iter().zip(&rules.mazes).enumerate() {
        lines.push(format!("Table #{}", i + 1));
        let table_lines: Vec<String> = symbol_table(table);
        let maze_lines: Vec<String> = maze(m);
        let table_width: usize = table.width() * CELL_WIDTH;

        // The maze has two lines per row plus the top border
        for (j, maze_line) in maze_lines.iter().enumerate() {
            let left: &str = if j % 2 == 1 {
                table_lines.get(j / 2).map(String::as_str).unwrap_or("")
            } else {
                ""
            };
            lines.push(format!("{left:<table_width$}    {maze_line}"));
        }
        lines.push(String::new());
    }
    lines
}

/// Send the drawing of a Not X-Ray ruleset to the debug log.
pub fn log_not_xray(rules: &NotXRayRules) {
    if log_enabled!(Level::Debug) {
        for line in not_xray(rules) {
            debug!("{line}");
        }
    }
}
