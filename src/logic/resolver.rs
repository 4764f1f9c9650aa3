//! Match resolution: coin flip for AI matches, the skill minigame for player matches.

use crate::logic::bracket::report_player_match_result;
use crate::logic::minigame::Minigame;
use crate::models::{Cup, CupError, CupMatch, MatchId, Side, Team};
use crate::rng::RandomSource;

/// Decides a match with a fair coin flip.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomResolver;

impl RandomResolver {
    /// Resolve `m` and return its winner. An already played match keeps its recorded winner.
    pub fn resolve<'m, R: RandomSource + ?Sized>(&self, m: &'m mut CupMatch, rng: &mut R) -> &'m Team {
        if let Some(side) = m.winner {
            return m.team(side);
        }
        let side = if rng.uniform_bool() { Side::One } else { Side::Two };
        m.set_winner(side);
        log::debug!(
            "Simulated {}: {} vs {} -> {}",
            m.id,
            m.team_1.name,
            m.team_2.name,
            m.team(side).name
        );
        m.team(side)
    }
}

/// Runs the minigame for one player match and reports its outcome into the cup.
#[derive(Clone, Debug)]
pub struct SkillMinigameResolver {
    match_id: MatchId,
    minigame: Minigame,
    reported: bool,
}

impl SkillMinigameResolver {
    pub fn start<R: RandomSource + ?Sized>(match_id: impl Into<MatchId>, rng: &mut R) -> Self {
        Self::with_minigame(match_id, Minigame::start(rng))
    }

    pub fn with_minigame(match_id: impl Into<MatchId>, minigame: Minigame) -> Self {
        Self {
            match_id: match_id.into(),
            minigame,
            reported: false,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn minigame(&self) -> &Minigame {
        &self.minigame
    }

    pub fn tick(&mut self, action_pressed: bool) {
        self.minigame.tick(action_pressed);
    }

    /// Some(player_won) once the minigame has finished.
    pub fn outcome(&self) -> Option<bool> {
        self.minigame.player_won()
    }

    /// Report the finished minigame into `cup`, at most once.
    ///
    /// Returns `Ok(Some(player_won))` on the call that reported it, `Ok(None)`
    /// while the minigame is still running or after it was reported.
    pub fn report(&mut self, cup: &mut Cup) -> Result<Option<bool>, CupError> {
        if self.reported {
            return Ok(None);
        }
        let Some(player_won) = self.outcome() else {
            return Ok(None);
        };
        report_player_match_result(cup, &self.match_id, player_won)?;
        self.reported = true;
        Ok(Some(player_won))
    }
}
