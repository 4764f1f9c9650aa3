//! Timing minigame that decides player matches.
//!
//! A marker bounces along a track from 0 to 100 (percent). The player presses
//! the action key once; landing inside the target zone wins the match.

use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Track ends, in percent.
pub const TRACK_MIN: i32 = 0;
pub const TRACK_MAX: i32 = 100;

/// Possible marker speeds, in percent of the track per tick. Sign is direction.
pub const BAR_SPEEDS: [i32; 6] = [2, 3, 4, -2, -3, -4];

/// Where the target zone may start.
pub const TARGET_START_RANGE: RangeInclusive<i32> = 15..=65;

/// Target zone width in percent (a 40px zone on a 200px bar).
pub const TARGET_ZONE_WIDTH: i32 = 20;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameStatus {
    #[default]
    Active,
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameResult {
    Win,
    Loss,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Minigame {
    pub bar_pos: i32,
    pub speed: i32,
    pub target_start: i32,
    pub target_end: i32,
    pub status: MinigameStatus,
    /// Set exactly once, when the action is pressed.
    pub result: Option<MinigameResult>,
}

impl Minigame {
    /// Fresh minigame: marker at 0, random speed and target zone.
    pub fn start<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let speed = *rng.choose_one(&BAR_SPEEDS).unwrap_or(&BAR_SPEEDS[0]);
        let target_start = rng.uniform_int(TARGET_START_RANGE);
        let game = Self::with_params(TRACK_MIN, speed, target_start);
        log::debug!(
            "Minigame started, target {}-{}, speed {}",
            game.target_start,
            game.target_end,
            game.speed
        );
        game
    }

    /// Minigame with a fixed layout. The target zone is shifted left if it would pass the track end.
    pub fn with_params(bar_pos: i32, speed: i32, target_start: i32) -> Self {
        let mut target_start = target_start.clamp(TRACK_MIN, TRACK_MAX);
        let mut target_end = target_start + TARGET_ZONE_WIDTH;
        if target_end > TRACK_MAX {
            target_end = TRACK_MAX;
            target_start = TRACK_MAX - TARGET_ZONE_WIDTH;
        }
        Self {
            bar_pos: bar_pos.clamp(TRACK_MIN, TRACK_MAX),
            speed,
            target_start,
            target_end,
            status: MinigameStatus::Active,
            result: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MinigameStatus::Active
    }

    /// True iff the marker is inside the target zone (bounds inclusive).
    pub fn on_target(&self) -> bool {
        (self.target_start..=self.target_end).contains(&self.bar_pos)
    }

    /// Advance one frame: move and bounce the marker, then judge `action_pressed`
    /// at the new position. Does nothing once finished.
    pub fn tick(&mut self, action_pressed: bool) {
        if !self.is_active() {
            return;
        }
        self.bar_pos += self.speed;
        if self.bar_pos >= TRACK_MAX {
            self.bar_pos = TRACK_MAX;
            self.speed = -self.speed.abs();
        } else if self.bar_pos <= TRACK_MIN {
            self.bar_pos = TRACK_MIN;
            self.speed = self.speed.abs();
        }
        if action_pressed {
            self.press_action();
        }
    }

    /// Judge the current marker position and finish. Ignored once finished.
    pub fn press_action(&mut self) {
        if !self.is_active() {
            return;
        }
        let result = if self.on_target() {
            MinigameResult::Win
        } else {
            MinigameResult::Loss
        };
        log::debug!("Minigame action at {}: {:?}", self.bar_pos, result);
        self.result = Some(result);
        self.status = MinigameStatus::Finished;
    }

    /// Some(true) if the player won, None while still running.
    pub fn player_won(&self) -> Option<bool> {
        self.result.map(|r| r == MinigameResult::Win)
    }
}
