//! Data structures for the cup: teams, matches, stages, cup state.

mod cup;
mod game;
mod team;

pub use cup::{
    stage_names_for, Cup, CupError, CupStatus, Stage, CUP_STAGES, DEFAULT_FIELD_SIZE,
    MAX_FIELD_SIZE,
};
pub use game::{CupMatch, MatchId, Side};
pub use team::{Rgb, Team, TeamId};
