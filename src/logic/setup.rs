//! Cup setup: pick the field, seed it randomly and build the first stage.

use crate::models::{stage_names_for, Cup, CupError, CupMatch, CupStatus, Stage, Team, TeamId};
use crate::rng::RandomSource;
use crate::roster::Roster;

/// Start a cup for the player's team against `field_size - 1` random AI teams.
///
/// 1. Look up the player's team (unknown id: placeholder team, warning).
/// 2. Sample the AI opponents, excluding both the requested id and the player's actual id.
/// 3. If the roster falls short, shrink the field to the largest power of two it can fill (warning).
/// 4. Shuffle the field and pair consecutive teams into the first stage.
pub fn initialize_cup<R: RandomSource + ?Sized>(
    roster: &Roster,
    player_team_id: TeamId,
    field_size: usize,
    rng: &mut R,
) -> Result<Cup, CupError> {
    stage_names_for(field_size)?;

    let player_team = match roster.get_team(player_team_id) {
        Some(team) => team.clone(),
        None => {
            log::warn!(
                "Player team with id {} not found, using a placeholder team",
                player_team_id
            );
            Team::placeholder()
        }
    };

    // A placeholder player must not share its id with a sampled roster team.
    let wanted = field_size - 1;
    let ai_teams = roster.random_sample(rng, wanted, &[player_team_id, player_team.id]);
    if ai_teams.len() < wanted {
        log::warn!(
            "Could not select {} unique AI opponents (got {}), the cup will be smaller",
            wanted,
            ai_teams.len()
        );
    }

    // Player first so truncation never drops them; the AI teams are already in random order.
    let mut field = Vec::with_capacity(field_size);
    field.push(player_team.clone());
    field.extend(ai_teams);

    if field.len() < 2 {
        return Err(CupError::NotEnoughTeams {
            available: field.len(),
        });
    }
    let playable = 1usize << (usize::BITS - 1 - field.len().leading_zeros());
    if playable < field.len() {
        log::warn!(
            "Field of {} teams is not a power of two, playing with {}",
            field.len(),
            playable
        );
        field.truncate(playable);
    }

    let stage_names = stage_names_for(field.len())?;
    rng.shuffle(&mut field);
    let first_stage = build_stage(stage_names[0], &field, player_team.id);

    log::info!(
        "Cup initialized for {} with {} teams, starting at {}",
        player_team.name,
        field.len(),
        stage_names[0]
    );

    Ok(Cup {
        player_team,
        field_size: field.len(),
        stage_names: stage_names.iter().map(|s| s.to_string()).collect(),
        current_stage_index: 0,
        stages: vec![first_stage],
        advancing_teams: Vec::new(),
        status: CupStatus::Active,
        cup_winner: None,
        diagnostic: None,
    })
}

/// Pair consecutive teams into matches named `"{stage}_{n}"`. `teams` must have even length.
pub(crate) fn build_stage(name: &str, teams: &[Team], player_team_id: TeamId) -> Stage {
    let matches = teams
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            CupMatch::new(
                format!("{}_{}", name, i + 1),
                pair[0].clone(),
                pair[1].clone(),
                player_team_id,
            )
        })
        .collect();
    Stage {
        name: name.to_string(),
        matches,
    }
}
