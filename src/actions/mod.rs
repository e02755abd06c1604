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

//! Commands and the loop that applies them.
//!
//! This module is the hub between the input thread and the viewer state.
//!
//! # Organization
//!
//! * [`commands`]: The messages a console line turns into.
//! * [`channel`]: The FIFO that carries them, with its acknowledgement link.
//! * [`events`]: The playback loop that drains the channel, applies each
//!   command and renders.

pub(crate) mod channel;
pub(crate) mod commands;
pub(crate) mod events;
