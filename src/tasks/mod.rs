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

//! Slow work performed on behalf of console commands.
//!
//! Locating a replay on disk and running the external game generator both
//! take more than a trivial amount of time. They run synchronously on the
//! loop thread when their command is applied, so each sits behind a small
//! trait or struct that the loop can call and tests can swap out.

pub(crate) mod generator;
pub(crate) mod picker;

pub(crate) use generator::Generator;
pub(crate) use picker::{FilePicker, RecentLogPicker};
