//! Cup business logic: setup, bracket progression, match resolution, minigame.

mod bracket;
mod minigame;
mod quick_match;
mod resolver;
mod setup;

pub use bracket::{advance_cup, pending_player_match, report_player_match_result, Advance};
pub use minigame::{
    Minigame, MinigameResult, MinigameStatus, BAR_SPEEDS, TARGET_START_RANGE, TARGET_ZONE_WIDTH,
    TRACK_MAX, TRACK_MIN,
};
pub use quick_match::{QuickMatch, QuickMatchStatus};
pub use resolver::{RandomResolver, SkillMinigameResolver};
pub use setup::initialize_cup;
