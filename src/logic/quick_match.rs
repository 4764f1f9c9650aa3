//! Quick match: the player's team against one random opponent, decided by the minigame.

use crate::models::{Team, TeamId};
use crate::rng::RandomSource;
use crate::roster::Roster;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickMatchStatus {
    /// Teams announced, minigame not started yet.
    #[default]
    Starting,
    Playing,
    Finished,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuickMatch {
    pub player_team: Team,
    pub opponent_team: Team,
    pub status: QuickMatchStatus,
    pub winner: Option<Team>,
}

impl QuickMatch {
    /// Pair the player's team (placeholder if unknown) with a random opponent.
    pub fn start<R: RandomSource + ?Sized>(roster: &Roster, player_team_id: TeamId, rng: &mut R) -> Self {
        let player_team = roster.get_team(player_team_id).cloned().unwrap_or_else(|| {
            log::warn!(
                "Quick match team {} not found, using a placeholder team",
                player_team_id
            );
            Team::placeholder()
        });
        let opponents: Vec<&Team> = roster
            .all()
            .iter()
            .filter(|t| t.id != player_team.id)
            .collect();
        let opponent_team = match rng.choose_one(&opponents) {
            Some(team) => (*team).clone(),
            None => {
                log::warn!("No opponent available for a quick match, using a placeholder");
                Team::placeholder_opponent()
            }
        };
        log::info!(
            "Quick match started: {} vs {}",
            player_team.name,
            opponent_team.name
        );
        Self {
            player_team,
            opponent_team,
            status: QuickMatchStatus::Starting,
            winner: None,
        }
    }

    /// Starting -> Playing. No effect in any other status.
    pub fn begin_play(&mut self) {
        if self.status == QuickMatchStatus::Starting {
            self.status = QuickMatchStatus::Playing;
        }
    }

    /// Record the minigame outcome. Only the first call while playing counts.
    pub fn finish(&mut self, player_won: bool) -> bool {
        if self.status != QuickMatchStatus::Playing {
            return false;
        }
        let winner = if player_won {
            self.player_team.clone()
        } else {
            self.opponent_team.clone()
        };
        log::info!("Quick match finished. Winner: {}", winner.name);
        self.winner = Some(winner);
        self.status = QuickMatchStatus::Finished;
        true
    }
}
