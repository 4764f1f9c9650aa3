//! Penguin cup arcade game: library with models, cup logic, roster and the game shell.

pub mod config;
pub mod logic;
pub mod models;
pub mod rng;
pub mod roster;
pub mod shell;

pub use config::{ConfigError, GameConfig};
pub use logic::{
    advance_cup, initialize_cup, pending_player_match, report_player_match_result, Advance,
    Minigame, MinigameResult, MinigameStatus, QuickMatch, QuickMatchStatus, RandomResolver,
    SkillMinigameResolver,
};
pub use models::{
    stage_names_for, Cup, CupError, CupMatch, CupStatus, MatchId, Rgb, Side, Stage, Team, TeamId,
    CUP_STAGES, DEFAULT_FIELD_SIZE, MAX_FIELD_SIZE,
};
pub use rng::RandomSource;
pub use roster::{Roster, RosterError};
pub use shell::{Cue, Key, MenuOption, ScreenView, Shell, ShellSettings, ShellView};
