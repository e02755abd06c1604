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

//! Replay log text decoding and validation.
//!
//! The log is split into sections on a line of thirty `=` characters. The
//! first section carries the board size, the last one the winner, and every
//! section in between is a candidate round:
//!
//! ```text
//! ROUND <n>
//! NORTH <points>
//! SOUTH <points>
//! =========================
//! <board rows>
//! ```
//!
//! Sections that do not have exactly that shape are skipped. Sections that do
//! have it but contain bad data reject the whole file, so a replay is either
//! loaded completely or not at all.

use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::replay::{BoardSize, Cell, ReplayLog, Roster, Round};

/// Number of rounds every AntCode game records.
pub(crate) const EXPECTED_ROUNDS: usize = 200;

pub(crate) const SECTION_SEPARATOR: &str = "==============================";
pub(crate) const BOARD_SEPARATOR: &str = "=========================";

// ROUND, NORTH, SOUTH, separator
const ROUND_HEADER_LINES: usize = 4;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"SIZE (\d+) (\d+)").unwrap());
static WINNER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"WINNER (\w+)").unwrap());
static ROUND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ROUND (\d+)").unwrap());
static NORTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"NORTH (\d+)").unwrap());
static SOUTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"SOUTH (\d+)").unwrap());

#[derive(Debug, Error, PartialEq)]
pub(crate) enum FormatError {
    #[error("board size not found")]
    MissingBoardSize,

    #[error("winner not found")]
    MissingWinner,

    #[error("round number not found in section starting {0:?}")]
    MissingRoundNumber(String),

    #[error("{team} points not found in round {round}")]
    MissingPoints { round: u32, team: &'static str },

    #[error("board separator not found in round {0}")]
    MissingBoardSeparator(u32),

    #[error("board in round {round} has {found} of {expected} rows")]
    TruncatedBoard { round: u32, found: usize, expected: usize },

    #[error("invalid board line in round {round}: {line:?}")]
    InvalidBoardLine { round: u32, line: String },

    #[error("number out of range: {0}")]
    InvalidNumber(String),

    #[error("file contains incomplete game data ({found} rounds, {missing} missing)")]
    MissingRounds { found: usize, missing: usize },

    #[error("file contains too much game data ({found} rounds, {excess} extra)")]
    ExcessRounds { found: usize, excess: usize },
}

/// Decodes a replay that must contain exactly `expected_rounds` rounds.
///
/// Rounds are returned in the order they appear in the file; declared round
/// numbers are kept but never used for ordering.
pub(crate) fn parse_with_round_count(raw: &str, expected_rounds: usize) -> Result<ReplayLog, FormatError> {
    // A replay always has at least one round to show.
    let expected_rounds = expected_rounds.max(1);
    let sections: Vec<&str> = raw.split(SECTION_SEPARATOR).collect();

    let header = sections[0].trim();
    let board_size = match SIZE_RE.captures(header) {
        Some(caps) => BoardSize {
            rows: parse_number(&caps[1])?,
            cols: parse_number(&caps[2])?,
        },
        None => return Err(FormatError::MissingBoardSize),
    };
    let section_lines = board_size
        .rows
        .checked_add(ROUND_HEADER_LINES)
        .ok_or_else(|| FormatError::InvalidNumber(board_size.rows.to_string()))?;

    let footer = sections[sections.len() - 1].trim();
    let winner = match WINNER_RE.captures(footer) {
        Some(caps) => caps[1].to_string(),
        None => return Err(FormatError::MissingWinner),
    };

    let middle = if sections.len() > 2 { &sections[1..sections.len() - 1] } else { &[][..] };

    let mut rounds = Vec::with_capacity(expected_rounds);
    let mut roster = Roster::default();

    for section in middle {
        let stripped = section.trim();
        let lines: Vec<&str> = stripped.lines().collect();
        if stripped.is_empty() || lines.len() != section_lines {
            continue;
        }

        let round = parse_round(&lines, board_size)?;
        for row in &round.board {
            roster.record(row);
        }
        rounds.push(round);
    }

    if rounds.len() < expected_rounds {
        return Err(FormatError::MissingRounds {
            found: rounds.len(),
            missing: expected_rounds - rounds.len(),
        });
    }
    if rounds.len() > expected_rounds {
        return Err(FormatError::ExcessRounds {
            found: rounds.len(),
            excess: rounds.len() - expected_rounds,
        });
    }

    Ok(ReplayLog {
        board_size,
        winner,
        rounds,
        roster,
    })
}

fn parse_round(lines: &[&str], size: BoardSize) -> Result<Round, FormatError> {
    let number = match ROUND_RE.captures(lines[0]) {
        Some(caps) => parse_number(&caps[1])?,
        None => return Err(FormatError::MissingRoundNumber(lines[0].to_string())),
    };

    let north_points = match NORTH_RE.captures(lines[1]) {
        Some(caps) => parse_number(&caps[1])?,
        None => return Err(FormatError::MissingPoints { round: number, team: "NORTH" }),
    };
    let south_points = match SOUTH_RE.captures(lines[2]) {
        Some(caps) => parse_number(&caps[1])?,
        None => return Err(FormatError::MissingPoints { round: number, team: "SOUTH" }),
    };

    let start = lines
        .iter()
        .position(|line| *line == BOARD_SEPARATOR)
        .ok_or(FormatError::MissingBoardSeparator(number))?
        + 1;
    let board = &lines[start..lines.len().min(start.saturating_add(size.rows))];
    if board.len() != size.rows {
        return Err(FormatError::TruncatedBoard {
            round: number,
            found: board.len(),
            expected: size.rows,
        });
    }

    for line in board {
        let valid = line.chars().count() == size.cols && line.chars().all(|c| Cell::from_char(c).is_some());
        if !valid {
            return Err(FormatError::InvalidBoardLine {
                round: number,
                line: line.to_string(),
            });
        }
    }

    Ok(Round {
        number,
        north_points,
        south_points,
        board: board.iter().map(|line| line.to_string()).collect(),
    })
}

fn parse_number<T: FromStr>(digits: &str) -> Result<T, FormatError> {
    digits
        .parse()
        .map_err(|_| FormatError::InvalidNumber(digits.to_string()))
}
