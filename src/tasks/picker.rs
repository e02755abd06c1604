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

//! Choosing a replay file when `load` is given no path.

use std::{path::PathBuf, time::SystemTime};

use walkdir::WalkDir;

const LOG_EXTENSION: &str = "txt";

/// Supplies a replay path, or `None` when the choice was cancelled or
/// nothing suitable exists.
pub(crate) trait FilePicker {
    fn pick(&self) -> Option<PathBuf>;
}

/// Picks the most recently modified `.txt` file below a directory.
pub(crate) struct RecentLogPicker {
    root: PathBuf,
}

impl RecentLogPicker {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FilePicker for RecentLogPicker {
    fn pick(&self) -> Option<PathBuf> {
        let newest = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == LOG_EXTENSION))
            .filter_map(|e| {
                let modified = e.metadata().ok()?.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((modified, e.into_path()))
            })
            .max_by(|(a, a_path), (b, b_path)| a.cmp(b).then_with(|| b_path.cmp(a_path)));

        match newest {
            Some((_, path)) => {
                tracing::debug!(path = %path.display(), "picked newest replay");
                Some(path)
            }
            None => {
                tracing::info!(root = %self.root.display(), "no replay found to pick");
                None
            }
        }
    }
}
