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

//! # AntCode Replay Viewer.
//!
//! A terminal viewer for games recorded by the AntCode simulation.
//!
//! The viewer coordinates a TUI frontend built with `ratatui` and a console
//! for typed commands:
//!
//! * The **Input Thread** reads keys, edits the command line and dispatches
//!   completed commands.
//! * The **Main Thread** runs the playback loop: it applies queued commands,
//!   advances the replay and renders the terminal.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of an error. Communication
//! between the threads is handled via `std::sync::mpsc` channels.

mod actions;
mod cli;
mod commander;
mod config;
mod logging;
mod player;
mod render;
mod replay;
mod tasks;
mod theme;

use std::{
    collections::VecDeque,
    io,
    sync::mpsc::{self, Receiver},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    actions::{
        channel::{CommandReceiver, command_channel},
        events::{ConsoleEvent, Prompt, load_replay, process_events},
    },
    cli::Args,
    commander::{registry::Dispatcher, spawn_input_thread},
    config::Settings,
    player::PlaybackController,
    tasks::{FilePicker, Generator, RecentLogPicker},
    theme::Theme,
};

const MAX_TRANSCRIPT_LINES: usize = 500;

/// Application state, owned by the playback loop.
struct App {
    pub settings: Settings,
    pub controller: PlaybackController,

    pub theme: Theme,
    pub transcript: VecDeque<String>,
    pub prompt: Prompt,

    pub picker: Box<dyn FilePicker>,
    pub generator: Generator,
    pub expected_rounds: usize,

    pub command_rx: CommandReceiver,
    pub console_rx: Receiver<ConsoleEvent>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(
        settings: Settings,
        picker: Box<dyn FilePicker>,
        generator: Generator,
        expected_rounds: usize,
        command_rx: CommandReceiver,
        console_rx: Receiver<ConsoleEvent>,
    ) -> Self {
        let controller = PlaybackController::new(&settings);

        let mut app = Self {
            settings,
            controller,
            theme: Theme::default(),
            transcript: VecDeque::new(),
            prompt: Prompt::default(),
            picker,
            generator,
            expected_rounds,
            command_rx,
            console_rx,
        };

        app.print_lines(vec![
            "AntCode - A team resource collection game for CS courses".to_string(),
            "Type \":help\" to see the full list of commands available".to_string(),
        ]);

        app
    }

    /// Appends to the console transcript, one entry per line of `text`.
    pub fn print(&mut self, text: impl Into<String>) {
        for line in text.into().lines() {
            if self.transcript.len() == MAX_TRANSCRIPT_LINES {
                self.transcript.pop_front();
            }
            self.transcript.push_back(line.to_string());
        }
    }

    pub fn print_lines(&mut self, lines: Vec<String>) {
        for line in lines {
            self.print(line);
        }
    }
}

/// The entry point of the application.
///
/// Parses arguments, starts logging, loads settings, runs the viewer and
/// saves settings on the way out. A failure to save on exit is returned as
/// an error.
fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(&args.log_file)?;

    let settings_path = args.settings.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path);
    tracing::info!(path = %settings.path().display(), "settings loaded");

    let dispatcher = Dispatcher::new(settings.keys().map(str::to_string).collect());
    let (command_tx, command_rx) = command_channel();
    let (console_tx, console_rx) = mpsc::channel();

    let mut app = App::new(
        settings,
        Box::new(RecentLogPicker::new(&args.log_dir)),
        Generator::new(&args.generator),
        args.rounds as usize,
        command_rx,
        console_rx,
    );

    if let Some(path) = args.log {
        load_replay(&mut app, Some(path));
    }

    let mut terminal = setup_terminal()?;
    spawn_input_thread(dispatcher, command_tx, console_tx);
    let res = process_events(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    shut_down(&app.settings, res)
}

/// Saves settings whatever the outcome of the loop, then reports the loop's
/// error ahead of any save failure.
fn shut_down(settings: &Settings, res: Result<()>) -> Result<()> {
    let saved = settings.persist().context("Failed to save settings");
    res.context("Application error occurred")?;
    saved?;
    tracing::info!("settings saved, exiting");

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function enables raw mode, so every key including Ctrl-C arrives as
/// an event, and switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and makes the cursor
/// visible again. It is best-effort and does not return a result.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::config::{AUTO_SAVE, CELL_SIZE, SettingValue};

    struct NoPick;

    impl FilePicker for NoPick {
        fn pick(&self) -> Option<PathBuf> {
            None
        }
    }

    fn app(dir: &TempDir) -> App {
        let (_, command_rx) = command_channel();
        let (_, console_rx) = mpsc::channel();
        let settings = Settings::with_defaults(dir.path().join("settings.toml"));

        App::new(settings, Box::new(NoPick), Generator::new("true"), 200, command_rx, console_rx)
    }

    #[test]
    fn starts_with_banner() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        assert_eq!(app.transcript.len(), 2);
        assert!(app.transcript[1].contains(":help"));
    }

    #[test]
    fn print_splits_lines_and_caps_transcript() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.print("North Score: 1\nSouth Score: 2");
        assert_eq!(app.transcript.back().map(String::as_str), Some("South Score: 2"));

        for i in 0..MAX_TRANSCRIPT_LINES {
            app.print(format!("line {i}"));
        }
        assert_eq!(app.transcript.len(), MAX_TRANSCRIPT_LINES);
        assert_eq!(app.transcript[0], "line 0");
    }

    #[test]
    fn shut_down_saves_settings_when_loop_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        let mut settings = Settings::with_defaults(&path);
        settings.set(AUTO_SAVE, SettingValue::Bool(false)).unwrap();
        settings.set(CELL_SIZE, SettingValue::Int(45)).unwrap();

        let err = shut_down(&settings, Err(anyhow::anyhow!("draw failed"))).unwrap_err();

        assert!(format!("{err:#}").contains("draw failed"));
        assert_eq!(Settings::load(&path).get(CELL_SIZE).unwrap(), &SettingValue::Int(45));
    }
}
