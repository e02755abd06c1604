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

//! Command-line input logic and the input thread.
//!
//! The [`Commander`] owns the line editor. While it is inactive, single keys
//! act as playback shortcuts; `:` activates the line editor and `Enter`
//! submits the typed line. Either way the result is a console line that is
//! resolved through the [`Dispatcher`], so shortcuts and typed commands share
//! one path into the playback loop.

pub(crate) mod fuzzy;
pub(crate) mod registry;

use std::{sync::mpsc::Sender, thread};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::{channel::CommandSender, events::ConsoleEvent},
    commander::registry::{DispatchError, Dispatcher},
};

pub(crate) struct Commander {
    active: bool,
    input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn value(&self) -> &str {
        self.input.value()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Feeds one terminal event to the editor.
    ///
    /// Returns the console line to dispatch, if the event completed one.
    pub(crate) fn handle_event(&mut self, event: &Event) -> Option<String> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some("quit".to_string());
        }

        if self.active {
            self.handle_line_key(key, event)
        } else {
            self.handle_shortcut(key)
        }
    }

    fn handle_line_key(&mut self, key: &KeyEvent, event: &Event) -> Option<String> {
        match key.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
                None
            }

            KeyCode::Enter => {
                let line = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;
                Some(line)
            }

            _ => {
                self.input.handle_event(event);
                None
            }
        }
    }

    fn handle_shortcut(&mut self, key: &KeyEvent) -> Option<String> {
        let line = match key.code {
            KeyCode::Char(':') => {
                self.active = true;
                return None;
            }

            KeyCode::Enter | KeyCode::Char(' ') => "toggle",
            KeyCode::Left => "step-back",
            KeyCode::Right => "step-forward",
            KeyCode::Home => "skip-start",
            KeyCode::End => "skip-end",
            KeyCode::Char('q') => "quit",

            _ => return None,
        };

        Some(line.to_string())
    }

    fn prompt(&self) -> ConsoleEvent {
        ConsoleEvent::Prompt {
            text: self.value().to_string(),
            cursor: self.cursor(),
            active: self.active(),
        }
    }
}

/// Starts the input thread.
///
/// The thread reads terminal events, mirrors the prompt to the loop through
/// `console_tx` and dispatches completed lines. After each queued command it
/// waits for the loop's acknowledgement before reading further input. It ends
/// when either channel closes.
pub(crate) fn spawn_input_thread(
    dispatcher: Dispatcher,
    command_tx: CommandSender,
    console_tx: Sender<ConsoleEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut commander = Commander::new();

        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read terminal event");
                    break;
                }
            };

            let submitted = commander.handle_event(&event);
            if console_tx.send(commander.prompt()).is_err() {
                break;
            }

            let Some(line) = submitted else {
                continue;
            };
            if console_tx.send(ConsoleEvent::Echo(line.clone())).is_err() {
                break;
            }

            match dispatcher.dispatch(&line, &command_tx) {
                Ok(_) => {
                    if command_tx.wait_for_ack().is_err() {
                        break;
                    }
                }
                Err(DispatchError::Disconnected) => break,
                Err(e) => {
                    tracing::debug!(line = %line, error = %e, "rejected console line");
                    if console_tx.send(ConsoleEvent::Diagnostic(e.to_string())).is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("input thread finished");
    })
}
