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

//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::{replay::EXPECTED_ROUNDS, tasks::generator::DEFAULT_GENERATOR};

#[derive(Debug, Parser)]
#[command(name = "antcode-viewer")]
#[command(about = "Replay viewer for recorded AntCode games")]
pub(crate) struct Args {
    /// Replay log to open at startup
    pub(crate) log: Option<PathBuf>,

    /// Settings file, defaults to the per-user configuration directory
    #[arg(long)]
    pub(crate) settings: Option<PathBuf>,

    /// Directory searched when `load` is given no path
    #[arg(long, default_value = ".")]
    pub(crate) log_dir: PathBuf,

    /// Command run by `generate`
    #[arg(long, default_value = DEFAULT_GENERATOR)]
    pub(crate) generator: String,

    /// Number of rounds a complete replay contains
    #[arg(long, default_value_t = EXPECTED_ROUNDS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) rounds: u32,

    /// File receiving diagnostic logs
    #[arg(long, default_value = "antcode-viewer.log")]
    pub(crate) log_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["antcode-viewer"]).unwrap();

        assert_eq!(args.log, None);
        assert_eq!(args.log_dir, PathBuf::from("."));
        assert_eq!(args.generator, "python3 ./antcode/main.py");
        assert_eq!(args.rounds, 200);
        assert_eq!(args.log_file, PathBuf::from("antcode-viewer.log"));
    }

    #[test]
    fn explicit_values() {
        let args = Args::try_parse_from([
            "antcode-viewer",
            "games/latest.txt",
            "--settings",
            "viewer.toml",
            "--rounds",
            "50",
            "--generator",
            "./make-games --count 3",
        ])
        .unwrap();

        assert_eq!(args.log, Some(PathBuf::from("games/latest.txt")));
        assert_eq!(args.settings, Some(PathBuf::from("viewer.toml")));
        assert_eq!(args.rounds, 50);
        assert_eq!(args.generator, "./make-games --count 3");
    }

    #[test]
    fn rejects_zero_rounds() {
        assert!(Args::try_parse_from(["antcode-viewer", "--rounds", "0"]).is_err());
    }
}
