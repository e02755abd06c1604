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

//! Commands handed from the input thread to the playback loop.
//!
//! Every console command that is recognised becomes exactly one
//! [`AppCommand`]. The input thread never touches viewer state itself; it
//! only queues these messages, and the loop applies them in order.

use std::path::PathBuf;

use crate::config::SettingValue;

/// The `config` command's three forms.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ConfigRequest {
    ListAll,
    Query(String),
    Set(String, SettingValue),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AppCommand {
    Help(Option<String>),
    Config(ConfigRequest),
    Load(Option<PathBuf>),
    Toggle,
    Pause,
    Play,
    SkipStart,
    StepBack,
    StepForward,
    SkipEnd,
    Steps,
    Score,
    Winner,
    Generate,
    Quit,
}

impl AppCommand {
    /// Console name of the command that produced this message.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            AppCommand::Help(_) => "help",
            AppCommand::Config(_) => "config",
            AppCommand::Load(_) => "load",
            AppCommand::Toggle => "toggle",
            AppCommand::Pause => "pause",
            AppCommand::Play => "play",
            AppCommand::SkipStart => "skip-start",
            AppCommand::StepBack => "step-back",
            AppCommand::StepForward => "step-forward",
            AppCommand::SkipEnd => "skip-end",
            AppCommand::Steps => "steps",
            AppCommand::Score => "score",
            AppCommand::Winner => "winner",
            AppCommand::Generate => "generate",
            AppCommand::Quit => "quit",
        }
    }

    /// Whether the command needs a loaded replay to do anything.
    pub(crate) fn needs_replay(&self) -> bool {
        matches!(
            self,
            AppCommand::Toggle
                | AppCommand::Pause
                | AppCommand::Play
                | AppCommand::SkipStart
                | AppCommand::StepBack
                | AppCommand::StepForward
                | AppCommand::SkipEnd
                | AppCommand::Steps
                | AppCommand::Score
                | AppCommand::Winner
        )
    }
}
