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

//! Render the command-line interface and the console transcript.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let prompt = &app.prompt;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let (text, colour) = if prompt.active {
        (format!(":{}", prompt.text), app.theme.commander_colour)
    } else {
        ("Press : to type a command, space to play or pause, q to quit".to_string(), app.theme.muted_colour)
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour).bg(app.theme.commander_bg)),
        container[0],
    );

    if prompt.active {
        let cursor_x = container[0].x + 1 + prompt.cursor as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

pub(crate) fn draw_transcript(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1))
        .title(" Console ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = usize::from(inner.height);
    let skip = app.transcript.len().saturating_sub(visible);
    let lines: Vec<Line> = app.transcript.iter().skip(skip).map(|line| Line::raw(line.as_str())).collect();

    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(app.theme.text_colour)),
        inner,
    );
}
