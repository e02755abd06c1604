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

//! The playback loop.
//!
//! The loop is the only place viewer state changes. Each iteration it:
//!
//! 1. **Drains** prompt updates and diagnostics sent by the input thread as
//!    [`ConsoleEvent`]s.
//! 2. **Applies** every queued [`AppCommand`] in order, then releases the
//!    input thread with an acknowledgement.
//! 3. **Advances** playback if the switch interval has elapsed.
//! 4. **Renders** the frame and sleeps out the rest of it.

use std::{
    fs,
    io::Stdout,
    path::PathBuf,
    sync::mpsc::TryRecvError,
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    actions::commands::{AppCommand, ConfigRequest},
    commander::registry::{self, DispatchError},
    config::{STEPS_PER_SECOND, SettingsError},
    render::draw,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 30);

/// Messages from the input thread that only affect the display.
#[derive(Debug, PartialEq)]
pub(crate) enum ConsoleEvent {
    Prompt { text: String, cursor: usize, active: bool },
    Echo(String),
    Diagnostic(String),
}

/// What the prompt line currently shows.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Prompt {
    pub(crate) text: String,
    pub(crate) cursor: usize,
    pub(crate) active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Runs the playback loop until a `quit` command arrives or the input thread
/// goes away.
pub(crate) fn process_events(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        if run_tick(app, frame_start) == Flow::Quit {
            break;
        }

        terminal.draw(|f| draw(f, app))?;

        if let Some(rest) = FRAME_INTERVAL.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    tracing::info!("leaving playback loop");

    Ok(())
}

/// Everything one loop iteration does short of drawing.
pub(crate) fn run_tick(app: &mut App, now: Instant) -> Flow {
    if drain_console(app) == Flow::Quit {
        return Flow::Quit;
    }

    let commands = app.command_rx.drain_if_any();
    if !commands.is_empty() {
        for command in commands {
            if apply_command(app, command) == Flow::Quit {
                return Flow::Quit;
            }
        }
        app.command_rx.acknowledge();
    }

    app.controller.tick(now, &app.settings);

    Flow::Continue
}

fn drain_console(app: &mut App) -> Flow {
    loop {
        match app.console_rx.try_recv() {
            Ok(ConsoleEvent::Prompt { text, cursor, active }) => app.prompt = Prompt { text, cursor, active },
            Ok(ConsoleEvent::Echo(line)) => app.print(format!("> {line}")),
            Ok(ConsoleEvent::Diagnostic(message)) => app.print(message),
            Err(TryRecvError::Empty) => return Flow::Continue,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("input thread has gone away");
                return Flow::Quit;
            }
        }
    }
}

/// Applies a single command to the viewer.
pub(crate) fn apply_command(app: &mut App, command: AppCommand) -> Flow {
    tracing::debug!(command = command.name(), "applying command");

    if command.needs_replay() && !app.controller.is_loaded() {
        app.print("No map is currently loaded");
        return Flow::Continue;
    }

    match command {
        AppCommand::Help(None) => app.print_lines(registry::help_overview()),
        AppCommand::Help(Some(name)) => match registry::find_command(&name) {
            Some(spec) => app.print_lines(registry::help_for(spec)),
            None => app.print(DispatchError::CommandNotFound(name).to_string()),
        },

        AppCommand::Config(request) => apply_config(app, request),
        AppCommand::Load(path) => load_replay(app, path),

        AppCommand::Generate => match app.generator.run() {
            Ok(report) => app.print_lines(report.summary()),
            Err(e) => {
                tracing::warn!(error = %e, "generator failed to start");
                app.print(format!("{e:#}"));
            }
        },

        AppCommand::Quit => return Flow::Quit,

        AppCommand::Toggle => {
            app.controller.toggle();
            print_paused(app);
        }
        AppCommand::Pause => {
            app.controller.pause();
            print_paused(app);
        }
        AppCommand::Play => {
            app.controller.play();
            print_paused(app);
        }

        AppCommand::SkipStart => {
            app.controller.skip_to_start(&app.settings);
            print_step(app);
        }
        AppCommand::StepBack => {
            app.controller.step_backward(&app.settings);
            print_step(app);
        }
        AppCommand::StepForward => {
            app.controller.step_forward(&app.settings);
            print_step(app);
        }
        AppCommand::SkipEnd => {
            app.controller.skip_to_end(&app.settings);
            print_step(app);
        }
        AppCommand::Steps => print_step(app),

        AppCommand::Score => {
            if let Some(round) = app.controller.current_round() {
                let lines = vec![
                    format!("North Score: {}", round.north_points),
                    format!("South Score: {}", round.south_points),
                ];
                app.print_lines(lines);
            }
        }
        AppCommand::Winner => {
            if let Some(log) = app.controller.replay() {
                let line = format!("Winner for this game: {}", log.winner);
                app.print(line);
            }
        }
    }

    Flow::Continue
}

/// Loads the replay at `path`, or the one the picker offers when no path is
/// given. Any failure leaves the placeholder board showing.
pub(crate) fn load_replay(app: &mut App, path: Option<PathBuf>) {
    let Some(path) = path.or_else(|| app.picker.pick()) else {
        app.controller.unload();
        app.print("No file selected");
        return;
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read replay");
            app.controller.unload();
            app.print(format!("Error loading maps: failed to read {}: {e}", path.display()));
            return;
        }
    };

    match app.controller.load_text(&text, app.expected_rounds) {
        Ok(()) => app.print(format!("Successfully loaded map from {}", path.display())),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rejected replay");
            app.print(format!("Error loading maps: {e}"));
        }
    }
}

fn apply_config(app: &mut App, request: ConfigRequest) {
    match request {
        ConfigRequest::ListAll => {
            let keys: Vec<String> = app.settings.keys().map(str::to_string).collect();
            for key in keys {
                describe_setting(app, &key);
            }
        }

        ConfigRequest::Query(key) => describe_setting(app, &key),

        ConfigRequest::Set(key, value) => {
            match app.settings.set(&key, value.clone()) {
                Ok(()) => {}
                // The value is applied even when saving it fails.
                Err(e @ SettingsError::Storage(_)) => {
                    tracing::warn!(error = %e, "autosave failed");
                    app.print(e.to_string());
                }
                Err(e) => {
                    app.print(e.to_string());
                    return;
                }
            }

            tracing::info!(key = %key, value = %value, "setting updated");
            app.print(format!("Updated '{key}' to '{value}'"));

            if key == STEPS_PER_SECOND
                && let Some(steps) = app.settings.integer(STEPS_PER_SECOND)
            {
                app.controller.set_steps_per_second(steps);
            }
        }
    }
}

fn describe_setting(app: &mut App, key: &str) {
    if !app.settings.contains(key) {
        app.print(SettingsError::Key(key.to_string()).to_string());
        return;
    }

    let value = app.settings.get(key).map(ToString::to_string).unwrap_or_default();

    let mut lines = vec![format!("{key} ({}): {value}", app.settings.type_name(key))];
    if let Some(description) = app.settings.describe(key) {
        lines.push(format!("    {description}"));
    }

    app.print_lines(lines);
}

fn print_paused(app: &mut App) {
    let line = if app.controller.is_paused() {
        "Simulation paused"
    } else {
        "Simulation unpaused"
    };
    app.print(line);
}

fn print_step(app: &mut App) {
    let line = format!("Step: {} / {}", app.controller.cursor() + 1, app.controller.round_count());
    app.print(line);
}
