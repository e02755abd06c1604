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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! The primary entry point is the [`draw`] function, which is called once per
//! loop iteration.

mod board;
mod commander;
mod icons;
mod top_bar;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

use crate::{
    App,
    config::SHOW_TOP_BAR,
    render::{
        board::draw_board,
        commander::{draw_commander, draw_transcript},
        top_bar::draw_top_bar,
    },
};

const TOP_BAR_HEIGHT: u16 = 3;
const TRANSCRIPT_WIDTH: u16 = 52;

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the optional top bar, the map beside the console
/// transcript, and the command line at the bottom.
pub(crate) fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    let top_bar_height = if app.settings.flag(SHOW_TOP_BAR) { TOP_BAR_HEIGHT } else { 0 };

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top_bar_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(TRANSCRIPT_WIDTH)])
        .split(outer[1]);

    if top_bar_height > 0 {
        draw_top_bar(f, outer[0], app);
    }

    draw_board(f, main[0], app);
    draw_transcript(f, main[1], app);
    draw_commander(f, outer[2], app);
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, sync::mpsc};

    use ratatui::{Terminal, backend::TestBackend};
    use tempfile::TempDir;

    use super::*;
    use crate::{
        actions::channel::command_channel,
        config::{SettingValue, Settings},
        replay::parser::tests::uniform_replay,
        tasks::{FilePicker, Generator},
    };

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

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn idle_screen_shows_placeholder() {
        let dir = TempDir::new().unwrap();
        let screen = render(&app(&dir));

        assert!(screen.contains("No replay loaded"));
        assert!(screen.contains("Console"));
        assert!(screen.contains("AntCode"));
    }

    #[test]
    fn loaded_replay_shows_step_and_scores() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.controller.load_text(&uniform_replay(200), 200).unwrap();

        let screen = render(&app);

        assert!(screen.contains("Step 1 / 200"));
        assert!(screen.contains("North"));
        assert!(screen.contains("Map 3x3"));
    }

    #[test]
    fn top_bar_can_be_hidden() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.settings.set(SHOW_TOP_BAR, SettingValue::Bool(false)).unwrap();
        app.controller.load_text(&uniform_replay(200), 200).unwrap();

        assert!(!render(&app).contains("Step 1 / 200"));
    }
}
