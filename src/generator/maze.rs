/*
maze.rs

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

//! Generate random mazes.
//!
//! A maze is stored as its set of openings (walls that are removed).
//! An opening is keyed on the upper or left cell of the pair it connects:
//!
//! * `(cell << 1) | 1` opens the wall between `cell` and its right neighbour,
//! * `cell << 1` opens the wall between `cell` and the cell below.
//!
//! The generator grows a random spanning tree over the navigable cells, so every maze is a
//! perfect maze: exactly one route between any two cells, and no loops.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use strum_macros::FromRepr;

use super::config::GeneratorConfig;
use super::rng::MonoRandom;

/// Movement direction.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr, Default)]
#[repr(usize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All the directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// Maze object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Maze {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Opening keys.
    openings: BTreeSet<usize>,
}

impl Maze {
    /// Create a [`Maze`] object with all its walls closed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            openings: BTreeSet::new(),
        }
    }

    /// Generate a random maze over the maze cells of the configuration.
    ///
    /// A random cell starts the `active` list. At each step, a random active cell is selected.
    /// If all its neighbours have been visited, it leaves the active list. Otherwise, the wall
    /// to a random unvisited neighbour is opened, and that neighbour becomes active.
    ///
    /// The configuration must have been validated: on a disconnected maze the generator stops
    /// early and some cells stay isolated.
    pub fn generate(config: &GeneratorConfig, rng: &mut MonoRandom) -> Self {
        let w: usize = config.width;
        let mut maze: Maze = Maze::new(config.width, config.height);

        let mut todo: Vec<usize> = config.maze_cells();
        let mut active: Vec<usize> = Vec::with_capacity(todo.len());
        if todo.is_empty() {
            return maze;
        }

        let start: usize = rng.next_index(todo.len());
        active.push(todo.remove(start));

        while !todo.is_empty() && !active.is_empty() {
            let active_ix: usize = rng.next_index(active.len());
            let sq: usize = active[active_ix];

            let adjs: Vec<usize> = config
                .adjacent_cells(sq)
                .into_iter()
                .filter(|c| todo.contains(c))
                .collect();

            if adjs.is_empty() {
                active.remove(active_ix);
                continue;
            }

            let adj: usize = adjs[rng.next_index(adjs.len())];
            if let Some(pos) = todo.iter().position(|c| *c == adj) {
                todo.remove(pos);
            }
            active.push(adj);

            if adj + 1 == sq {
                maze.openings.insert((adj << 1) | 1);
            } else if adj == sq + 1 {
                maze.openings.insert((sq << 1) | 1);
            } else if adj + w == sq {
                maze.openings.insert(adj << 1);
            } else {
                maze.openings.insert(sq << 1);
            }
        }

        if log_enabled!(Level::Debug) {
            debug!("Maze openings = {:?}", maze.openings);
        }
        maze
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of openings.
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    /// Whether the maze has no openings.
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// Opening keys, in increasing order.
    pub fn openings(&self) -> impl Iterator<Item = usize> + '_ {
        self.openings.iter().copied()
    }

    /// Whether the given opening key is in the maze.
    pub fn contains(&self, opening: usize) -> bool {
        self.openings.contains(&opening)
    }

    /// The two cells connected by the given opening key.
    pub fn opening_cells(&self, opening: usize) -> (usize, usize) {
        let cell: usize = opening >> 1;
        if opening & 1 == 1 {
            (cell, cell + 1)
        } else {
            (cell, cell + self.width)
        }
    }

    /// Whether the wall on the given side of the cell is open.
    pub fn can_move(&self, cell: usize, direction: Direction) -> bool {
        let row: usize = cell / self.width;
        let col: usize = cell % self.width;
        match direction {
            Direction::Up => row > 0 && self.contains((cell - self.width) << 1),
            Direction::Right => col < self.width - 1 && self.contains((cell << 1) | 1),
            Direction::Down => row < self.height - 1 && self.contains(cell << 1),
            Direction::Left => col > 0 && self.contains(((cell - 1) << 1) | 1),
        }
    }

    /// Cells reachable in one step from the given cell.
    pub fn neighbours(&self, cell: usize) -> Vec<usize> {
        Direction::ALL
            .iter()
            .filter(|d| self.can_move(cell, **d))
            .map(|d| match d {
                Direction::Up => cell - self.width,
                Direction::Right => cell + 1,
                Direction::Down => cell + self.width,
                Direction::Left => cell - 1,
            })
            .collect()
    }

    /// Cells reachable from the given cell, including the cell itself.
    pub fn reachable_from(&self, cell: usize) -> HashSet<usize> {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        visited.insert(cell);
        queue.push_back(cell);
        while let Some(c) = queue.pop_front() {
            for n in self.neighbours(c) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        visited
    }
}
