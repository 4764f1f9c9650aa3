//! Cup progression: simulate AI matches, take the player's results, build the next stage.

use crate::logic::resolver::RandomResolver;
use crate::logic::setup::build_stage;
use crate::models::{Cup, CupError, CupMatch, CupStatus, MatchId, Team};
use crate::rng::RandomSource;

/// What a call to [`advance_cup`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Advance {
    /// A player match in the current stage is still unplayed; nothing moved.
    AwaitingPlayer(MatchId),
    /// The current stage is done and the named stage was built.
    NextStage(String),
    /// The Final was played.
    Finished(Team),
    /// The cup was already finished or halted; nothing moved.
    Inactive(CupStatus),
}

/// First unplayed player match of the current stage, if the cup is active.
pub fn pending_player_match(cup: &Cup) -> Option<&CupMatch> {
    if !cup.is_active() {
        return None;
    }
    cup.current_stage()?
        .matches
        .iter()
        .find(|m| m.is_player_match && !m.played())
}

/// Move the cup forward as far as it can go without the player.
///
/// 1. Simulate every unplayed AI match in the current stage.
/// 2. If a player match is still unplayed, stop (`AwaitingPlayer`).
/// 3. Collect the winners, in match order, into `advancing_teams`.
/// 4. No winners: halt with `CupStatus::Error`.
/// 5. Not the last stage: shuffle the winners and pair them into the next stage.
/// 6. Last stage: the sole winner takes the cup.
pub fn advance_cup<R: RandomSource + ?Sized>(cup: &mut Cup, rng: &mut R) -> Advance {
    if !cup.is_active() {
        return Advance::Inactive(cup.status);
    }
    let stage_name = cup.current_stage_name().to_string();
    let Some(stage) = cup.current_stage_mut() else {
        halt(cup, format!("Stage {} was never built", stage_name));
        return Advance::Inactive(CupStatus::Error);
    };

    let resolver = RandomResolver;
    for m in stage
        .matches
        .iter_mut()
        .filter(|m| !m.played() && !m.is_player_match)
    {
        resolver.resolve(m, rng);
    }

    if let Some(waiting) = stage.matches.iter().find(|m| !m.played()) {
        return Advance::AwaitingPlayer(waiting.id.clone());
    }

    let match_count = stage.matches.len();
    let winners: Vec<Team> = stage
        .matches
        .iter()
        .filter_map(|m| m.winner_team().cloned())
        .collect();
    cup.advancing_teams = winners;

    if cup.advancing_teams.is_empty() {
        halt(
            cup,
            format!(
                "No advancing teams from {} ({} matches played)",
                stage_name, match_count
            ),
        );
        return Advance::Inactive(CupStatus::Error);
    }

    if !cup.is_last_stage() {
        cup.current_stage_index += 1;
        let next_name = cup.current_stage_name().to_string();
        let mut teams = std::mem::take(&mut cup.advancing_teams);
        rng.shuffle(&mut teams);
        let next_stage = build_stage(&next_name, &teams, cup.player_team_id());
        cup.stages.push(next_stage);
        log::info!("Advanced to {} ({} teams left)", next_name, teams.len());
        return Advance::NextStage(next_name);
    }

    let champion = cup.advancing_teams[0].clone();
    cup.cup_winner = Some(champion.clone());
    cup.status = CupStatus::Finished;
    log::info!("Cup finished! Winner: {}", champion.name);
    Advance::Finished(champion)
}

/// Record the player's result for `match_id`.
///
/// `player_won` makes the player's team the winner, otherwise the opponent wins.
/// Reporting an already played match is a no-op and returns `Ok(false)`.
pub fn report_player_match_result(
    cup: &mut Cup,
    match_id: &str,
    player_won: bool,
) -> Result<bool, CupError> {
    let player_id = cup.player_team_id();
    let active = cup.is_active();
    let m = cup
        .find_match_mut(match_id)
        .ok_or_else(|| CupError::MatchNotFound(match_id.to_string()))?;
    let player_side = m
        .side_of(player_id)
        .ok_or_else(|| CupError::NotAPlayerMatch(match_id.to_string()))?;
    if m.played() {
        return Ok(false);
    }
    if !active {
        return Err(CupError::NotActive);
    }
    let side = if player_won {
        player_side
    } else {
        player_side.opposite()
    };
    m.set_winner(side);
    log::info!(
        "Player match {} ({} vs {}) done. Winner: {}",
        m.id,
        m.team_1.name,
        m.team_2.name,
        m.team(side).name
    );
    Ok(true)
}

fn halt(cup: &mut Cup, diagnostic: String) {
    log::error!("Cup halted: {}", diagnostic);
    cup.status = CupStatus::Error;
    cup.diagnostic = Some(diagnostic);
}
