//! Integration tests for the timing minigame and the resolver that feeds it into a cup.

use penguin_cup::logic::{BAR_SPEEDS, TARGET_ZONE_WIDTH};
use penguin_cup::{
    initialize_cup, pending_player_match, Minigame, MinigameResult, MinigameStatus, Roster,
    SkillMinigameResolver,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn start_picks_layout_within_bounds() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let game = Minigame::start(&mut rng);
        assert_eq!(game.bar_pos, 0);
        assert!(BAR_SPEEDS.contains(&game.speed));
        assert!((15..=65).contains(&game.target_start));
        assert_eq!(game.target_end - game.target_start, TARGET_ZONE_WIDTH);
        assert!(game.target_end <= 100);
        assert_eq!(game.status, MinigameStatus::Active);
        assert_eq!(game.result, None);
    }
}

#[test]
fn target_zone_is_kept_on_the_track() {
    let game = Minigame::with_params(0, 2, 95);
    assert_eq!(game.target_end, 100);
    assert_eq!(game.target_start, 100 - TARGET_ZONE_WIDTH);
}

#[test]
fn marker_bounces_off_the_far_end() {
    let mut game = Minigame::with_params(0, 3, 40);
    for _ in 0..33 {
        game.tick(false);
    }
    assert_eq!(game.bar_pos, 99);
    assert_eq!(game.speed, 3);

    game.tick(false);
    assert_eq!(game.bar_pos, 100);
    assert_eq!(game.speed, -3);

    game.tick(false);
    assert_eq!(game.bar_pos, 97);
    game.tick(false);
    assert_eq!(game.bar_pos, 94);
}

#[test]
fn marker_bounces_off_the_near_end() {
    let mut game = Minigame::with_params(0, -4, 40);
    game.tick(false);
    assert_eq!(game.bar_pos, 0);
    assert_eq!(game.speed, 4);
    game.tick(false);
    assert_eq!(game.bar_pos, 4);
}

#[test]
fn marker_stays_on_the_track_forever() {
    for speed in BAR_SPEEDS {
        let mut game = Minigame::with_params(0, speed, 40);
        for _ in 0..1000 {
            game.tick(false);
            assert!((0..=100).contains(&game.bar_pos));
        }
    }
}

#[test]
fn action_is_judged_after_the_marker_moves() {
    // 37 + 3 lands on the zone start; 57 + 3 on its end.
    for (pos, landed) in [(37, 40), (39, 42), (47, 50), (57, 60)] {
        let mut game = Minigame::with_params(pos, 3, 40);
        game.tick(true);
        assert_eq!(game.bar_pos, landed, "pos {pos}");
        assert_eq!(game.result, Some(MinigameResult::Win), "pos {pos}");
        assert_eq!(game.status, MinigameStatus::Finished);
    }
}

#[test]
fn action_outside_target_loses() {
    for (pos, speed) in [(0, 3), (34, 3), (58, 3), (97, 3), (42, -3)] {
        let mut game = Minigame::with_params(pos, speed, 40);
        game.tick(true);
        assert_eq!(game.result, Some(MinigameResult::Loss), "pos {pos} speed {speed}");
    }
}

#[test]
fn action_on_a_bounce_frame_uses_the_clamped_position() {
    let mut game = Minigame::with_params(98, 4, 80);
    game.tick(true);
    assert_eq!(game.bar_pos, 100);
    assert_eq!(game.speed, -4);
    assert_eq!(game.result, Some(MinigameResult::Win));
}

#[test]
fn finished_minigame_ignores_further_input() {
    let mut game = Minigame::with_params(50, 3, 40);
    game.tick(true);
    let done = game.clone();
    game.tick(false);
    game.tick(true);
    game.press_action();
    assert_eq!(game, done);
    assert_eq!(game.player_won(), Some(true));
}

#[test]
fn skill_resolver_reports_into_the_cup_once() {
    let roster = Roster::builtin();
    let mut rng = StdRng::seed_from_u64(21);
    let mut cup = initialize_cup(&roster, 4, 8, &mut rng).unwrap();
    let m = pending_player_match(&cup).unwrap().clone();
    let player_side = m.side_of(4).unwrap();

    // Marker parked inside the zone: the first action wins.
    let mut resolver = SkillMinigameResolver::with_minigame(m.id.clone(), Minigame::with_params(50, 2, 45));
    assert_eq!(resolver.report(&mut cup).unwrap(), None);
    resolver.tick(true);
    assert_eq!(resolver.outcome(), Some(true));
    assert_eq!(resolver.report(&mut cup).unwrap(), Some(true));
    assert_eq!(resolver.report(&mut cup).unwrap(), None);

    assert_eq!(cup.find_match(&m.id).unwrap().winner, Some(player_side));
    assert!(pending_player_match(&cup).is_none());
}

#[test]
fn skill_resolver_loss_hands_the_match_to_the_opponent() {
    let roster = Roster::builtin();
    let mut rng = StdRng::seed_from_u64(22);
    let mut cup = initialize_cup(&roster, 4, 8, &mut rng).unwrap();
    let m = pending_player_match(&cup).unwrap().clone();
    let player_side = m.side_of(4).unwrap();

    let mut resolver = SkillMinigameResolver::with_minigame(m.id.clone(), Minigame::with_params(0, 2, 45));
    resolver.tick(true);
    assert_eq!(resolver.report(&mut cup).unwrap(), Some(false));
    assert_eq!(cup.find_match(&m.id).unwrap().winner, Some(player_side.opposite()));
}
