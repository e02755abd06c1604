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

//! Render the map of the current round.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    App,
    config::{CELL_SIZE, FANCY_GRAPHICS},
    render::icons::{GLYPH_ANTHILL, GLYPH_EMPTY, GLYPH_WALL},
    replay::Cell,
    theme::Theme,
};

// Setting units per terminal column.
const CELL_SIZE_UNIT: i64 = 15;

/// Terminal columns used per board cell for a `cellSize` setting.
pub(crate) fn cell_width(cell_size: i64) -> usize {
    usize::try_from(cell_size / CELL_SIZE_UNIT).unwrap_or(0).max(1)
}

pub(crate) fn draw_board(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.controller.replay() {
        Some(log) => format!(
            " Map {}x{}, {} ants per team ",
            log.board_size.rows,
            log.board_size.cols,
            log.roster.size()
        ),
        None => " Map ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .title(title);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.controller.board();
    let width = cell_width(app.settings.integer(CELL_SIZE).unwrap_or(CELL_SIZE_UNIT));
    let board_cols = rows.first().map_or(0, |row| row.chars().count()) * width;

    let [column] = Layout::horizontal([Constraint::Length(board_cols as u16)])
        .flex(Flex::Center)
        .areas(inner);
    let [board_area] = Layout::vertical([Constraint::Length(rows.len() as u16)])
        .flex(Flex::Center)
        .areas(column);

    let lines = board_lines(rows, width, app.settings.flag(FANCY_GRAPHICS), &app.theme);
    f.render_widget(Paragraph::new(lines), board_area);
}

/// Styled lines for a board, `width` columns per cell.
pub(crate) fn board_lines(rows: &[String], width: usize, fancy: bool, theme: &Theme) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| {
                    let cell = Cell::from_char(c).unwrap_or(Cell::Empty);
                    if fancy {
                        fancy_span(cell, width, theme)
                    } else {
                        Span::styled(" ".repeat(width), Style::default().bg(theme.cell_colour(cell)))
                    }
                })
                .collect::<Line>()
        })
        .collect()
}

fn fancy_span(cell: Cell, width: usize, theme: &Theme) -> Span<'static> {
    let base = Style::default().bg(theme.empty_colour);

    let (glyph, style) = match cell {
        Cell::Wall => {
            let wall = GLYPH_WALL.to_string().repeat(width);
            return Span::styled(wall, Style::default().fg(theme.wall_colour));
        }
        Cell::Empty => (GLYPH_EMPTY, base.fg(theme.border_colour)),
        Cell::Food(amount) => (
            char::from(b'0' + amount),
            base.fg(theme.food_colour).add_modifier(Modifier::BOLD),
        ),
        Cell::Anthill(team) => (GLYPH_ANTHILL, base.fg(theme.team_colour(team)).add_modifier(Modifier::BOLD)),
        Cell::Ant { id, team, carrying } => {
            let style = Style::default()
                .fg(theme.team_colour(team))
                .bg(if carrying { theme.food_colour } else { theme.empty_colour })
                .add_modifier(Modifier::BOLD);
            (id, style)
        }
    };

    Span::styled(format!("{glyph:^width$}"), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_width_follows_cell_size() {
        assert_eq!(cell_width(30), 2);
        assert_eq!(cell_width(45), 3);
        assert_eq!(cell_width(10), 1);
        assert_eq!(cell_width(-5), 1);
    }

    #[test]
    fn plain_cells_are_coloured_blocks() {
        let theme = Theme::default();
        let lines = board_lines(&["#.a".to_string()], 2, false, &theme);

        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "  ");
        assert_eq!(spans[0].style.bg, Some(theme.wall_colour));
        assert_eq!(spans[1].style.bg, Some(theme.empty_colour));
        assert_eq!(spans[2].style.bg, Some(theme.north_carrying_colour));
    }

    #[test]
    fn fancy_cells_use_glyphs() {
        let theme = Theme::default();
        let lines = board_lines(&["#3Xe".to_string()], 3, true, &theme);
        let spans = &lines[0].spans;

        assert_eq!(spans[0].content, "\u{2588}\u{2588}\u{2588}");
        assert_eq!(spans[1].content, " 3 ");
        assert_eq!(spans[2].content, " \u{2302} ");
        assert_eq!(spans[3].content, " E ");
        assert_eq!(spans[3].style.fg, Some(theme.south_colour));
        assert_eq!(spans[3].style.bg, Some(theme.food_colour));
    }
}
