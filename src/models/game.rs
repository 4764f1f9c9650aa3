//! A single cup match between two teams, and which side won it.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Match identifier, unique within a stage: `"{stage_name}_{position}"` (1-based).
pub type MatchId = String;

/// Which side of a match won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// A single match: two teams, created with a stage and resolved exactly once.
///
/// The winner is stored as a [`Side`], so a resolved match can only ever point
/// at one of its own two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CupMatch {
    pub id: MatchId,
    pub team_1: Team,
    pub team_2: Team,
    /// None until the match has been played.
    pub winner: Option<Side>,
    /// True iff one of the two teams is the player's.
    pub is_player_match: bool,
}

impl CupMatch {
    pub fn new(id: impl Into<MatchId>, team_1: Team, team_2: Team, player_team_id: TeamId) -> Self {
        let is_player_match = team_1.id == player_team_id || team_2.id == player_team_id;
        Self {
            id: id.into(),
            team_1,
            team_2,
            winner: None,
            is_player_match,
        }
    }

    pub fn played(&self) -> bool {
        self.winner.is_some()
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::One => &self.team_1,
            Side::Two => &self.team_2,
        }
    }

    /// The winning team, once played.
    pub fn winner_team(&self) -> Option<&Team> {
        self.winner.map(|side| self.team(side))
    }

    /// Which side `team_id` plays on, if it plays in this match at all.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.team_1.id == team_id {
            Some(Side::One)
        } else if self.team_2.id == team_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// Record the result. Returns false (and changes nothing) if the match was already played.
    pub fn set_winner(&mut self, side: Side) -> bool {
        if self.played() {
            return false;
        }
        self.winner = Some(side);
        true
    }
}
