//! Cup (the tournament aggregate), Stage and CupStatus.

use crate::models::game::{CupMatch, MatchId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Every stage a cup can have, in play order. A cup uses the trailing
/// `log2(field_size)` entries, so the last stage is always the Final.
pub const CUP_STAGES: [&str; 4] = ["Round of 16", "Quarter-Finals", "Semifinal", "Final"];

/// Default number of teams entering a cup.
pub const DEFAULT_FIELD_SIZE: usize = 16;

/// Largest field the stage list can name.
pub const MAX_FIELD_SIZE: usize = 1 << CUP_STAGES.len();

/// Errors that can occur during cup operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CupError {
    /// Field size is not a power of two in `2..=MAX_FIELD_SIZE` (byes are not supported).
    UnsupportedFieldSize(usize),
    /// The roster cannot supply even a two-team field.
    NotEnoughTeams { available: usize },
    /// No match with this id in any stage built so far.
    MatchNotFound(MatchId),
    /// The match exists but the player's team is not in it.
    NotAPlayerMatch(MatchId),
    /// The cup is finished or halted.
    NotActive,
}

impl std::fmt::Display for CupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CupError::UnsupportedFieldSize(n) => write!(
                f,
                "Field size {} is not supported (must be a power of two between 2 and {})",
                n, MAX_FIELD_SIZE
            ),
            CupError::NotEnoughTeams { available } => {
                write!(f, "Need at least 2 teams for a cup (roster has {})", available)
            }
            CupError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            CupError::NotAPlayerMatch(id) => write!(f, "Match {} is not a player match", id),
            CupError::NotActive => write!(f, "Cup is not active"),
        }
    }
}

impl std::error::Error for CupError {}

/// Stage names for a cup of `field_size` teams.
pub fn stage_names_for(field_size: usize) -> Result<&'static [&'static str], CupError> {
    if field_size < 2 || field_size > MAX_FIELD_SIZE || !field_size.is_power_of_two() {
        return Err(CupError::UnsupportedFieldSize(field_size));
    }
    let rounds = field_size.trailing_zeros() as usize;
    Ok(&CUP_STAGES[CUP_STAGES.len() - rounds..])
}

/// Current phase of the cup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CupStatus {
    #[default]
    Active,
    /// Champion decided; `cup_winner` is set.
    Finished,
    /// A stage completed without winners. The cup stops progressing; see `Cup::diagnostic`.
    Error,
}

/// One round of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub matches: Vec<CupMatch>,
}

impl Stage {
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(CupMatch::played)
    }
}

/// Full cup state: the player's team, every stage built so far, and the outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cup {
    pub player_team: Team,
    pub field_size: usize,
    /// The stages this cup will go through, in order.
    pub stage_names: Vec<String>,
    pub current_stage_index: usize,
    /// Stages built so far, appended one at a time and never removed.
    pub stages: Vec<Stage>,
    /// Winners of the stage just completed, in match order. Empty between advances.
    pub advancing_teams: Vec<Team>,
    pub status: CupStatus,
    pub cup_winner: Option<Team>,
    /// Set when `status` is `Error`.
    pub diagnostic: Option<String>,
}

impl Cup {
    pub fn player_team_id(&self) -> TeamId {
        self.player_team.id
    }

    pub fn current_stage_name(&self) -> &str {
        &self.stage_names[self.current_stage_index]
    }

    pub fn is_last_stage(&self) -> bool {
        self.current_stage_index + 1 >= self.stage_names.len()
    }

    /// The stage currently being played, if it has been built.
    pub fn current_stage(&self) -> Option<&Stage> {
        self.stage(self.current_stage_name())
    }

    pub fn current_stage_mut(&mut self) -> Option<&mut Stage> {
        let name = self.stage_names[self.current_stage_index].clone();
        self.stages.iter_mut().find(|s| s.name == name)
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn find_match_mut(&mut self, match_id: &str) -> Option<&mut CupMatch> {
        self.stages
            .iter_mut()
            .flat_map(|s| s.matches.iter_mut())
            .find(|m| m.id == match_id)
    }

    /// Look up a match by id in any stage.
    pub fn find_match(&self, match_id: &str) -> Option<&CupMatch> {
        self.stages
            .iter()
            .flat_map(|s| s.matches.iter())
            .find(|m| m.id == match_id)
    }

    /// Number of resolved matches across every stage.
    pub fn played_match_count(&self) -> usize {
        self.stages
            .iter()
            .flat_map(|s| s.matches.iter())
            .filter(|m| m.played())
            .count()
    }

    pub fn is_active(&self) -> bool {
        self.status == CupStatus::Active
    }
}
