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

//! The console command set and its dispatcher.
//!
//! Commands are declared once in [`COMMANDS`]. Each entry names the command,
//! its aliases, its help text and the function that turns the typed
//! arguments into an [`AppCommand`]. The [`Dispatcher`] indexes the table by
//! name and alias and queues the resulting message on the command channel.

use std::{collections::HashMap, path::PathBuf};

use thiserror::Error;

use crate::{
    actions::{
        channel::CommandSender,
        commands::{AppCommand, ConfigRequest},
    },
    commander::fuzzy,
    config::SettingValue,
};

type Builder = fn(&Dispatcher, &[&str]) -> Result<AppCommand, DispatchError>;

pub(crate) struct CommandSpec {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) summary: &'static str,
    pub(crate) details: &'static str,
    build: Builder,
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum DispatchError {
    #[error("Command '{0}' not found.")]
    CommandNotFound(String),

    #[error("No good match found for '{0}'.")]
    NoKeyMatch(String),

    #[error("The viewer is no longer accepting commands.")]
    Disconnected,
}

pub(crate) static COMMANDS: [CommandSpec; 15] = [
    CommandSpec {
        name: "help",
        aliases: &[],
        summary: "Display this help message.",
        details: "Displays a list of all available commands, or a specific command's long description and aliases if one is given.",
        build: |_, args| Ok(AppCommand::Help(args.first().map(|name| name.to_ascii_lowercase()))),
    },
    CommandSpec {
        name: "config",
        aliases: &["conf", "settings", "set"],
        summary: "Modify simulation settings",
        details: "With no arguments, list every setting and its description. With a key, show that setting. With a key and a value, update it. Key names are matched approximately, so small typos are forgiven.",
        build: build_config,
    },
    CommandSpec {
        name: "load",
        aliases: &["open"],
        summary: "Load a new game",
        details: "Load the AntCode log at the given path, or the newest log in the log directory when no path is given. The file is checked for validity; anything that is not a complete AntCode log is rejected.",
        build: |_, args| Ok(AppCommand::Load((!args.is_empty()).then(|| PathBuf::from(args.join(" "))))),
    },
    CommandSpec {
        name: "toggle",
        aliases: &[""],
        summary: "Toggle the simulation playback state",
        details: "Toggle simulation playback. If the simulation is currently running, it will be paused, and vice versa.",
        build: |_, _| Ok(AppCommand::Toggle),
    },
    CommandSpec {
        name: "pause",
        aliases: &[],
        summary: "Pause the simulation",
        details: "Temporarily stop playback of the simulation by preventing map data from updating. Functionality of other commands is not affected.",
        build: |_, _| Ok(AppCommand::Pause),
    },
    CommandSpec {
        name: "play",
        aliases: &[],
        summary: "Unpause the simulation",
        details: "Resume playback of the simulation.",
        build: |_, _| Ok(AppCommand::Play),
    },
    CommandSpec {
        name: "skip-start",
        aliases: &["ss", "aa"],
        summary: "Skip to the start",
        details: "Skip to the very start of the simulation, or in other words, the first step.",
        build: |_, _| Ok(AppCommand::SkipStart),
    },
    CommandSpec {
        name: "step-back",
        aliases: &["step-backward", "sb", "a"],
        summary: "Step once backward",
        details: "Decrement the step counter and update the map data.",
        build: |_, _| Ok(AppCommand::StepBack),
    },
    CommandSpec {
        name: "step-forward",
        aliases: &["step-front", "step", "sf", "d", "s"],
        summary: "Step once forward",
        details: "Increment the step counter and update the map data.",
        build: |_, _| Ok(AppCommand::StepForward),
    },
    CommandSpec {
        name: "skip-end",
        aliases: &["se", "dd"],
        summary: "Skip to the end",
        details: "Skip to the very end of the simulation, or in other words, the last step.",
        build: |_, _| Ok(AppCommand::SkipEnd),
    },
    CommandSpec {
        name: "steps",
        aliases: &[],
        summary: "View current steps out of the total",
        details: "Print the step number the simulation is currently on and the total number of steps in the loaded map.",
        build: |_, _| Ok(AppCommand::Steps),
    },
    CommandSpec {
        name: "score",
        aliases: &[],
        summary: "View the current score for each team",
        details: "Print the North and South teams' scores for the current step.",
        build: |_, _| Ok(AppCommand::Score),
    },
    CommandSpec {
        name: "winner",
        aliases: &[],
        summary: "View the game's winner",
        details: "Print the loaded game's winner. This value is independent of the current step.",
        build: |_, _| Ok(AppCommand::Winner),
    },
    CommandSpec {
        name: "generate",
        aliases: &["gen"],
        summary: "Generate a new test map",
        details: "Run the text-based AntCode simulation to generate new games and maps.",
        build: |_, _| Ok(AppCommand::Generate),
    },
    CommandSpec {
        name: "quit",
        aliases: &["exit"],
        summary: "Quit the simulation",
        details: "Save all settings and shut down the program.",
        build: |_, _| Ok(AppCommand::Quit),
    },
];

fn build_config(dispatcher: &Dispatcher, args: &[&str]) -> Result<AppCommand, DispatchError> {
    let request = match args {
        [] => ConfigRequest::ListAll,
        [key] => ConfigRequest::Query(dispatcher.match_key(key)?),
        [key, value @ ..] => {
            let key = dispatcher.match_key(key)?;
            ConfigRequest::Set(key, SettingValue::parse_input(&value.join(" ")))
        }
    };

    Ok(AppCommand::Config(request))
}

/// Resolves console lines to commands.
pub(crate) struct Dispatcher {
    lookup: HashMap<&'static str, &'static CommandSpec>,
    setting_keys: Vec<String>,
}

impl Dispatcher {
    /// Indexes [`COMMANDS`]; `setting_keys` are the names `config` matches
    /// against, in settings order.
    pub(crate) fn new(setting_keys: Vec<String>) -> Self {
        let mut lookup = HashMap::new();
        for spec in &COMMANDS {
            lookup.insert(spec.name, spec);
            for alias in spec.aliases {
                lookup.insert(*alias, spec);
            }
        }

        Self { lookup, setting_keys }
    }

    /// Finds a command by name or alias.
    pub(crate) fn find(&self, token: &str) -> Option<&'static CommandSpec> {
        self.lookup.get(token).copied()
    }

    /// Turns a console line into a command without queueing it.
    ///
    /// The first word selects the command (case-insensitive); the rest are
    /// its arguments. An empty line is the `toggle` shortcut.
    pub(crate) fn resolve(&self, line: &str) -> Result<AppCommand, DispatchError> {
        let mut words = line.split_whitespace();
        let token = words.next().unwrap_or("").to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let spec = self
            .find(&token)
            .ok_or_else(|| DispatchError::CommandNotFound(token.clone()))?;

        (spec.build)(self, &args)
    }

    /// Resolves `line` and queues the resulting command.
    pub(crate) fn dispatch(&self, line: &str, sender: &CommandSender) -> Result<&'static str, DispatchError> {
        let command = self.resolve(line)?;
        let name = command.name();

        tracing::debug!(command = name, "dispatching");
        sender.push(command).map_err(|_| DispatchError::Disconnected)?;

        Ok(name)
    }

    fn match_key(&self, input: &str) -> Result<String, DispatchError> {
        fuzzy::best_match(input, self.setting_keys.iter().map(String::as_str))
            .map(str::to_string)
            .ok_or_else(|| DispatchError::NoKeyMatch(input.to_string()))
    }
}

/// Finds a command by name or alias without an index.
pub(crate) fn find_command(token: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == token || spec.aliases.iter().any(|alias| *alias == token))
}

/// Lines printed by a bare `help`.
pub(crate) fn help_overview() -> Vec<String> {
    let mut names: Vec<&str> = COMMANDS.iter().map(|spec| spec.name).collect();
    names.sort_unstable();
    let width = names.iter().map(|name| name.len()).max().unwrap_or(0) + 5;

    let mut lines = vec![
        "Available commands".to_string(),
        String::new(),
        "Type \"help [command]\" to view help for a specific command".to_string(),
        String::new(),
    ];
    lines.extend(
        names
            .chunks(2)
            .map(|pair| pair.iter().map(|name| format!("{name:<width$}")).collect::<String>().trim_end().to_string()),
    );

    lines
}

/// Lines printed by `help <command>`.
pub(crate) fn help_for(spec: &CommandSpec) -> Vec<String> {
    let mut lines = vec![
        format!("{} - {}", spec.name, spec.summary),
        String::new(),
        spec.details.to_string(),
    ];

    if !spec.aliases.is_empty() {
        let aliases: Vec<&str> = spec
            .aliases
            .iter()
            .map(|alias| if alias.is_empty() { "<ENTER>" } else { alias })
            .collect();
        lines.push(String::new());
        lines.push(format!("Aliases: {}", aliases.join(", ")));
    }

    lines
}
