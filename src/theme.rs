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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the viewer's color palette: the chrome around the
//! board and one color per kind of board cell.

use ratatui::style::Color;

use crate::replay::{Cell, Team};

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) text_colour: Color,
    pub(crate) muted_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) commander_bg: Color,

    pub(crate) wall_colour: Color,
    pub(crate) empty_colour: Color,
    pub(crate) food_colour: Color,
    pub(crate) north_colour: Color,
    pub(crate) south_colour: Color,
    pub(crate) north_carrying_colour: Color,
    pub(crate) south_carrying_colour: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            text_colour: Color::Rgb(255, 255, 255),
            muted_colour: Color::Rgb(162, 161, 166),
            commander_colour: Color::Rgb(255, 215, 0),
            commander_bg: Color::Rgb(50, 30, 60),

            wall_colour: Color::Rgb(90, 90, 90),
            empty_colour: Color::Rgb(226, 214, 180),
            food_colour: Color::Rgb(76, 175, 80),
            north_colour: Color::Rgb(220, 50, 47),
            south_colour: Color::Rgb(38, 139, 210),
            north_carrying_colour: Color::Rgb(255, 140, 120),
            south_carrying_colour: Color::Rgb(130, 200, 255),
        }
    }

    pub(crate) fn team_colour(&self, team: Team) -> Color {
        match team {
            Team::North => self.north_colour,
            Team::South => self.south_colour,
        }
    }

    /// Fill color of a board cell in plain mode.
    pub(crate) fn cell_colour(&self, cell: Cell) -> Color {
        match cell {
            Cell::Wall => self.wall_colour,
            Cell::Empty => self.empty_colour,
            Cell::Food(_) => self.food_colour,
            Cell::Anthill(team) => self.team_colour(team),
            Cell::Ant { team: Team::North, carrying: true, .. } => self.north_carrying_colour,
            Cell::Ant { team: Team::South, carrying: true, .. } => self.south_carrying_colour,
            Cell::Ant { team, .. } => self.team_colour(team),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrying_ants_are_distinct() {
        let theme = Theme::default();
        let idle = Cell::Ant { id: 'A', team: Team::North, carrying: false };
        let loaded = Cell::Ant { id: 'A', team: Team::North, carrying: true };

        assert_eq!(theme.cell_colour(idle), theme.north_colour);
        assert_ne!(theme.cell_colour(loaded), theme.cell_colour(idle));
        assert_eq!(theme.cell_colour(Cell::Anthill(Team::South)), theme.south_colour);
    }
}
