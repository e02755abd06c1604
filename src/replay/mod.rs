// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Recorded AntCode games.
//!
//! A replay log is a plain text file written by the AntCode simulation. It
//! holds the board size, one section per round (scores and a board snapshot)
//! and the winning team. This module defines the decoded form of that file;
//! the text format itself is handled by [`parser`].

pub(crate) mod parser;

use std::collections::BTreeSet;

pub(crate) use parser::{EXPECTED_ROUNDS, FormatError, parse_with_round_count};

/// Board shown while no replay is loaded.
pub(crate) const BLANK_BOARD: [&str; 20] = [
    "#####################",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#####################",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Team {
    North,
    South,
}

/// The meaning of a single board character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cell {
    Wall,
    Empty,
    Food(u8),
    Anthill(Team),
    Ant { id: char, team: Team, carrying: bool },
}

impl Cell {
    /// Decodes a board character, returning `None` for characters outside
    /// the replay alphabet.
    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Empty),
            '1'..='9' => Some(Cell::Food(c as u8 - b'0')),
            '@' => Some(Cell::Anthill(Team::North)),
            'X' => Some(Cell::Anthill(Team::South)),
            'A'..='H' | 'a'..='h' => {
                let id = c.to_ascii_uppercase();
                let team = if id <= 'D' { Team::North } else { Team::South };
                Some(Cell::Ant {
                    id,
                    team,
                    carrying: c.is_ascii_lowercase(),
                })
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoardSize {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
}

/// One recorded simulation step.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Round {
    /// Round number as declared in the log, not the position in the replay.
    pub(crate) number: u32,
    pub(crate) north_points: u32,
    pub(crate) south_points: u32,
    pub(crate) board: Vec<String>,
}

/// Ant identities seen for each team over the whole game.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Roster {
    pub(crate) north: BTreeSet<char>,
    pub(crate) south: BTreeSet<char>,
}

impl Roster {
    pub(crate) fn record(&mut self, row: &str) {
        for c in row.chars() {
            if let Some(Cell::Ant { id, team, .. }) = Cell::from_char(c) {
                match team {
                    Team::North => self.north.insert(id),
                    Team::South => self.south.insert(id),
                };
            }
        }
    }

    /// Largest team size present in the replay.
    pub(crate) fn size(&self) -> usize {
        self.north.len().max(self.south.len())
    }
}

/// A fully decoded replay.
#[derive(Clone, Debug)]
pub(crate) struct ReplayLog {
    pub(crate) board_size: BoardSize,
    pub(crate) winner: String,
    pub(crate) rounds: Vec<Round>,
    pub(crate) roster: Roster,
}

impl ReplayLog {
    pub(crate) fn last_index(&self) -> usize {
        self.rounds.len().saturating_sub(1)
    }
}
