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

//! Running the AntCode simulation to produce new replay logs.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result, bail};

pub(crate) const DEFAULT_GENERATOR: &str = "python3 ./antcode/main.py";

/// Outcome of one generator run.
#[derive(Debug)]
pub(crate) struct GenerateReport {
    pub(crate) status: ExitStatus,
    pub(crate) last_line: Option<String>,
}

impl GenerateReport {
    /// Transcript lines describing the run.
    pub(crate) fn summary(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);

        if self.status.success() {
            lines.push("Generator finished successfully".to_string());
        } else {
            let code = self
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            lines.push(format!("Generator failed (exit code: {code})"));
        }

        if let Some(line) = &self.last_line {
            lines.push(line.clone());
        }

        lines
    }
}

/// The external game generator, as a whitespace-separated command line.
#[derive(Clone, Debug)]
pub(crate) struct Generator {
    command: String,
}

impl Generator {
    pub(crate) fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    /// Runs the generator to completion, capturing its output so the
    /// terminal is left alone.
    pub(crate) fn run(&self) -> Result<GenerateReport> {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("No generator command configured");
        };

        tracing::info!(command = %self.command, "running generator");

        let output = Command::new(program)
            .args(parts)
            .output()
            .with_context(|| format!("Failed to run generator: {}", self.command))?;

        let last_line = last_line(&output.stdout).or_else(|| last_line(&output.stderr));
        tracing::info!(status = %output.status, "generator finished");

        Ok(GenerateReport {
            status: output.status,
            last_line,
        })
    }
}

fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_skips_trailing_blanks() {
        assert_eq!(last_line(b"one\ntwo\n\n  \n"), Some("two".to_string()));
        assert_eq!(last_line(b""), None);
    }

    #[test]
    fn empty_command_is_an_error() {
        assert!(Generator::new("   ").run().is_err());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = Generator::new("antcode-generator-that-does-not-exist --fast").run().unwrap_err();
        assert!(err.to_string().starts_with("Failed to run generator"));
    }

    #[cfg(unix)]
    #[test]
    fn reports_status_and_last_output_line() {
        let report = Generator::new("echo games written").run().unwrap();

        assert!(report.status.success());
        assert_eq!(report.last_line.as_deref(), Some("games written"));
        assert_eq!(report.summary(), vec!["Generator finished successfully", "games written"]);
    }

    #[cfg(unix)]
    #[test]
    fn reports_failure() {
        let report = Generator::new("false").run().unwrap();

        assert!(!report.status.success());
        assert_eq!(report.summary(), vec!["Generator failed (exit code: 1)"]);
    }
}
