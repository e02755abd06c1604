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

//! Replay playback state.
//!
//! The [`PlaybackController`] owns the decoded replay and a cursor into its
//! rounds. It is driven from the loop thread only: commands move the cursor
//! or change [`PlaybackState`], and [`PlaybackController::tick`] advances the
//! replay while it is playing.

use std::time::{Duration, Instant};

use crate::{
    config::{PAUSE_ON_STEP, STEPS_PER_SECOND, STOP_ON_LAST_STEP, Settings},
    replay::{self, BLANK_BOARD, FormatError, ReplayLog, Round},
};

/// Represents the current playback status of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlaybackState {
    NoLogLoaded,
    Paused,
    Playing,
}

pub(crate) struct PlaybackController {
    log: Option<ReplayLog>,
    cursor: usize,
    state: PlaybackState,
    switch_interval: Duration,
    last_switch: Instant,
    placeholder: Vec<String>,
}

/// Time between automatic steps for the given rate; rates below one step per
/// second are treated as one.
pub(crate) fn switch_interval(steps_per_second: i64) -> Duration {
    let steps = u64::try_from(steps_per_second.max(1)).unwrap_or(1);
    Duration::from_millis(1000 / steps)
}

impl PlaybackController {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            log: None,
            cursor: 0,
            state: PlaybackState::NoLogLoaded,
            switch_interval: switch_interval(settings.integer(STEPS_PER_SECOND).unwrap_or(1)),
            last_switch: Instant::now(),
            placeholder: BLANK_BOARD.iter().map(|row| row.to_string()).collect(),
        }
    }

    /// Parses `text` and starts a paused replay at the first round.
    ///
    /// On failure any previous replay is dropped and the placeholder board is
    /// shown instead.
    pub(crate) fn load_text(&mut self, text: &str, expected_rounds: usize) -> Result<(), FormatError> {
        match replay::parse_with_round_count(text, expected_rounds) {
            Ok(log) => {
                self.load(log);
                Ok(())
            }
            Err(e) => {
                self.unload();
                Err(e)
            }
        }
    }

    pub(crate) fn load(&mut self, log: ReplayLog) {
        tracing::info!(rounds = log.rounds.len(), winner = %log.winner, "replay loaded");
        self.log = Some(log);
        self.cursor = 0;
        self.state = PlaybackState::Paused;
        self.last_switch = Instant::now();
    }

    /// Drops the current replay and returns to the placeholder board.
    pub(crate) fn unload(&mut self) {
        self.log = None;
        self.cursor = 0;
        self.state = PlaybackState::NoLogLoaded;
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.log.is_some()
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.state != PlaybackState::Playing
    }

    pub(crate) fn replay(&self) -> Option<&ReplayLog> {
        self.log.as_ref()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn round_count(&self) -> usize {
        self.log.as_ref().map_or(0, |log| log.rounds.len())
    }

    pub(crate) fn current_round(&self) -> Option<&Round> {
        self.log.as_ref().and_then(|log| log.rounds.get(self.cursor))
    }

    /// Board rows to draw this frame.
    pub(crate) fn board(&self) -> &[String] {
        match self.current_round() {
            Some(round) => &round.board,
            None => &self.placeholder,
        }
    }

    #[cfg(test)]
    pub(crate) fn switch_interval(&self) -> Duration {
        self.switch_interval
    }

    pub(crate) fn set_steps_per_second(&mut self, steps_per_second: i64) {
        self.switch_interval = switch_interval(steps_per_second);
    }

    pub(crate) fn toggle(&mut self) {
        match self.state {
            PlaybackState::Paused => self.play(),
            PlaybackState::Playing => self.pause(),
            PlaybackState::NoLogLoaded => {}
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.is_loaded() {
            self.state = PlaybackState::Paused;
        }
    }

    pub(crate) fn play(&mut self) {
        if self.is_loaded() && self.state != PlaybackState::Playing {
            self.state = PlaybackState::Playing;
            self.last_switch = Instant::now();
        }
    }

    pub(crate) fn step_forward(&mut self, settings: &Settings) {
        let count = self.round_count();
        if count > 0 {
            self.pause_on_step(settings);
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub(crate) fn step_backward(&mut self, settings: &Settings) {
        let count = self.round_count();
        if count > 0 {
            self.pause_on_step(settings);
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    pub(crate) fn skip_to_start(&mut self, settings: &Settings) {
        if self.is_loaded() {
            self.pause_on_step(settings);
            self.cursor = 0;
        }
    }

    pub(crate) fn skip_to_end(&mut self, settings: &Settings) {
        if let Some(last) = self.log.as_ref().map(ReplayLog::last_index) {
            self.pause_on_step(settings);
            self.cursor = last;
        }
    }

    /// Advances playback if the switch interval has elapsed at `now`.
    ///
    /// Returns `true` when the cursor moved.
    pub(crate) fn tick(&mut self, now: Instant, settings: &Settings) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        if now.saturating_duration_since(self.last_switch) < self.switch_interval {
            return false;
        }

        let count = self.round_count();
        self.last_switch = now;
        self.cursor = (self.cursor + 1) % count;

        if self.cursor == count - 1 && settings.flag(STOP_ON_LAST_STEP) {
            tracing::debug!("reached last round, pausing");
            self.state = PlaybackState::Paused;
        }

        true
    }

    fn pause_on_step(&mut self, settings: &Settings) {
        if settings.flag(PAUSE_ON_STEP) {
            self.state = PlaybackState::Paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{SettingValue, AUTO_SAVE},
        replay::parser::tests::uniform_replay,
    };

    fn settings() -> Settings {
        let mut settings = Settings::with_defaults("unused.toml");
        settings.set(AUTO_SAVE, SettingValue::Bool(false)).unwrap();
        settings
    }

    fn loaded(settings: &Settings, rounds: usize) -> PlaybackController {
        let mut controller = PlaybackController::new(settings);
        controller.load_text(&uniform_replay(rounds), rounds).unwrap();
        controller
    }

    #[test]
    fn starts_with_placeholder_board() {
        let controller = PlaybackController::new(&settings());

        assert_eq!(controller.state(), PlaybackState::NoLogLoaded);
        assert_eq!(controller.board().len(), BLANK_BOARD.len());
        assert!(controller.current_round().is_none());
    }

    #[test]
    fn commands_without_replay_are_no_ops() {
        let settings = settings();
        let mut controller = PlaybackController::new(&settings);

        controller.toggle();
        controller.play();
        controller.step_forward(&settings);
        controller.step_backward(&settings);
        controller.skip_to_end(&settings);

        assert_eq!(controller.state(), PlaybackState::NoLogLoaded);
        assert_eq!(controller.cursor(), 0);
        assert!(!controller.tick(Instant::now() + Duration::from_secs(5), &settings));
    }

    #[test]
    fn end_to_end_load_skip_and_toggle() {
        let settings = settings();
        let mut controller = PlaybackController::new(&settings);

        controller.load_text(&uniform_replay(200), 200).unwrap();
        assert_eq!(controller.round_count(), 200);
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.replay().unwrap().winner, "NORTH");

        controller.skip_to_end(&settings);
        assert_eq!(controller.cursor(), 199);

        controller.toggle();
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn failed_load_discards_previous_replay() {
        let settings = settings();
        let mut controller = loaded(&settings, 200);
        controller.skip_to_end(&settings);

        let err = controller.load_text(&uniform_replay(10), 200).unwrap_err();

        assert_eq!(err, FormatError::MissingRounds { found: 10, missing: 190 });
        assert_eq!(controller.state(), PlaybackState::NoLogLoaded);
        assert!(controller.replay().is_none());
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.board().len(), BLANK_BOARD.len());
    }

    #[test]
    fn stepping_round_trips() {
        let settings = settings();
        let mut controller = loaded(&settings, 200);

        for start in [0, 1, 57, 198, 199] {
            controller.skip_to_start(&settings);
            for _ in 0..start {
                controller.step_forward(&settings);
            }
            assert_eq!(controller.cursor(), start);

            controller.step_forward(&settings);
            controller.step_backward(&settings);
            assert_eq!(controller.cursor(), start);

            controller.step_backward(&settings);
            controller.step_forward(&settings);
            assert_eq!(controller.cursor(), start);
        }
    }

    #[test]
    fn stepping_wraps_at_both_ends() {
        let settings = settings();
        let mut controller = loaded(&settings, 200);

        controller.step_backward(&settings);
        assert_eq!(controller.cursor(), 199);

        controller.step_forward(&settings);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn stepping_pauses_when_pause_on_step_is_set() {
        let mut settings = settings();
        let mut controller = loaded(&settings, 200);

        controller.play();
        controller.step_forward(&settings);
        assert_eq!(controller.state(), PlaybackState::Paused);

        settings.set(PAUSE_ON_STEP, SettingValue::Bool(false)).unwrap();
        controller.play();
        controller.skip_to_start(&settings);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn tick_advances_only_after_interval() {
        let settings = settings();
        let mut controller = loaded(&settings, 200);
        assert_eq!(controller.switch_interval(), Duration::from_millis(200));

        let start = Instant::now();
        assert!(!controller.tick(start + Duration::from_secs(1), &settings));

        controller.play();
        let now = Instant::now();
        assert!(!controller.tick(now, &settings));
        assert!(controller.tick(now + Duration::from_millis(250), &settings));
        assert_eq!(controller.cursor(), 1);
        assert!(!controller.tick(now + Duration::from_millis(300), &settings));
    }

    #[test]
    fn tick_stops_on_last_round() {
        let mut settings = settings();
        let mut controller = loaded(&settings, 3);
        controller.play();

        let mut now = Instant::now();
        for _ in 0..2 {
            now += Duration::from_secs(1);
            assert!(controller.tick(now, &settings));
        }
        assert_eq!(controller.cursor(), 2);
        assert_eq!(controller.state(), PlaybackState::Paused);

        settings.set(STOP_ON_LAST_STEP, SettingValue::Bool(false)).unwrap();
        controller.skip_to_start(&settings);
        controller.play();
        for _ in 0..3 {
            now += Duration::from_secs(1);
            controller.tick(now, &settings);
        }
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn steps_per_second_sets_interval() {
        let mut controller = PlaybackController::new(&settings());

        controller.set_steps_per_second(10);
        assert_eq!(controller.switch_interval(), Duration::from_millis(100));

        controller.set_steps_per_second(0);
        assert_eq!(controller.switch_interval(), Duration::from_secs(1));
    }
}
