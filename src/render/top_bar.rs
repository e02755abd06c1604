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

//! Render the game details panel: scores, team rosters and the step counter.

use std::collections::BTreeSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    player::PlaybackState,
    render::icons::{ICON_EMPTY, ICON_PAUSE, ICON_PLAY},
    replay::Team,
};

pub(crate) fn draw_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(24), Constraint::Fill(1)])
        .split(inner);

    let (Some(log), Some(round)) = (app.controller.replay(), app.controller.current_round()) else {
        let idle = Line::from(vec![
            Span::raw(format!("{ICON_EMPTY} ")),
            Span::styled("No replay loaded", Style::default().fg(app.theme.muted_colour)),
        ]);
        f.render_widget(Paragraph::new(idle).alignment(Alignment::Center), chunks[1]);
        return;
    };

    let north = team_line(app, Team::North, round.north_points, &log.roster.north);
    f.render_widget(Paragraph::new(north), chunks[0]);

    let icon = match app.controller.state() {
        PlaybackState::Playing => ICON_PLAY,
        _ => ICON_PAUSE,
    };
    let step = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.text_colour),
        Span::styled(
            step_label(app.controller.cursor(), app.controller.round_count()),
            Style::default().add_modifier(Modifier::BOLD),
        )
        .fg(app.theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(step).alignment(Alignment::Center), chunks[1]);

    let south = team_line(app, Team::South, round.south_points, &log.roster.south);
    f.render_widget(Paragraph::new(south).alignment(Alignment::Right), chunks[2]);
}

pub(crate) fn step_label(cursor: usize, count: usize) -> String {
    format!("Step {} / {}", cursor + 1, count)
}

fn team_line<'a>(app: &App, team: Team, points: u32, roster: &BTreeSet<char>) -> Line<'a> {
    let colour = app.theme.team_colour(team);
    let name = match team {
        Team::North => "North",
        Team::South => "South",
    };

    let mut spans = vec![
        Span::styled(format!("{name} "), Style::default().add_modifier(Modifier::BOLD)).fg(colour),
        Span::styled(points.to_string(), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.text_colour),
        Span::raw("  "),
    ];
    spans.extend(
        roster
            .iter()
            .map(|id| Span::styled(format!(" {id} "), Style::default().fg(Color::Black).bg(colour))),
    );

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_label_is_one_based() {
        assert_eq!(step_label(0, 200), "Step 1 / 200");
        assert_eq!(step_label(199, 200), "Step 200 / 200");
    }
}
