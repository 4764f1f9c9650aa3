//! Integration tests for the game shell: menus, quick match and a full cup run.

use penguin_cup::{
    CupStatus, Cue, Key, MinigameStatus, QuickMatchStatus, Roster, ScreenView, Shell, ShellSettings,
};
use std::sync::Arc;

fn shell(field_size: usize, seed: u64) -> Shell {
    Shell::new(
        Arc::new(Roster::builtin()),
        ShellSettings {
            field_size,
            quick_match_team_id: 1,
        },
        Some(seed),
    )
}

fn press_and_tick(shell: &mut Shell, keys: &[Key]) {
    for &key in keys {
        shell.press(key);
    }
    shell.tick();
}

#[test]
fn menu_selection_wraps() {
    let mut s = shell(16, 1);
    press_and_tick(&mut s, &[Key::Down]);
    assert!(matches!(s.view().screen, ScreenView::MainMenu { selected: 1, .. }));
    press_and_tick(&mut s, &[Key::Up, Key::Up]);
    assert!(matches!(s.view().screen, ScreenView::MainMenu { selected: 2, .. }));
    assert_eq!(
        s.drain_cues(),
        vec![Cue::MenuNavigate, Cue::MenuNavigate, Cue::MenuNavigate]
    );
    assert!(s.drain_cues().is_empty());
}

#[test]
fn quit_from_menu_closes_the_game() {
    let mut s = shell(16, 2);
    press_and_tick(&mut s, &[Key::Up, Key::Enter]);
    assert!(s.is_closed());
    assert!(matches!(s.view().screen, ScreenView::Closed));
    let frame = s.frame();
    press_and_tick(&mut s, &[Key::Down]);
    assert_eq!(s.frame(), frame);
}

#[test]
fn quit_key_closes_from_anywhere() {
    let mut s = shell(16, 3);
    press_and_tick(&mut s, &[Key::Down, Key::Enter]);
    assert!(matches!(s.view().screen, ScreenView::TeamSelect { .. }));
    press_and_tick(&mut s, &[Key::Quit]);
    assert!(s.is_closed());
}

#[test]
fn quick_match_is_decided_by_the_minigame() {
    let mut s = shell(16, 4);
    press_and_tick(&mut s, &[Key::Enter]);
    match s.view().screen {
        ScreenView::QuickMatch { quick_match, minigame } => {
            assert_eq!(quick_match.status, QuickMatchStatus::Playing);
            assert_eq!(quick_match.player_team.id, 1);
            assert_ne!(quick_match.opponent_team.id, 1);
            assert_eq!(minigame.unwrap().status, MinigameStatus::Active);
        }
        other => panic!("unexpected screen {other:?}"),
    }

    // Enter is ignored while the match is running.
    press_and_tick(&mut s, &[Key::Enter]);
    assert!(matches!(s.view().screen, ScreenView::QuickMatch { .. }));

    s.drain_cues();
    press_and_tick(&mut s, &[Key::Action]);
    let player_won = match s.view().screen {
        ScreenView::QuickMatch { quick_match, minigame } => {
            assert_eq!(quick_match.status, QuickMatchStatus::Finished);
            let won = minigame.unwrap().player_won().unwrap();
            let expected = if won {
                &quick_match.player_team
            } else {
                &quick_match.opponent_team
            };
            assert_eq!(quick_match.winner.as_ref(), Some(expected));
            won
        }
        other => panic!("unexpected screen {other:?}"),
    };
    let outcome = if player_won { Cue::MinigameWin } else { Cue::MinigameLoss };
    assert_eq!(s.drain_cues(), vec![Cue::MinigameAction, outcome]);

    press_and_tick(&mut s, &[Key::Enter]);
    assert!(matches!(s.view().screen, ScreenView::MainMenu { selected: 0, .. }));
}

#[test]
fn team_select_scrolls_a_page_window() {
    let mut s = shell(16, 5);
    press_and_tick(&mut s, &[Key::Down, Key::Enter]);
    press_and_tick(&mut s, &[Key::Down; 12]);
    match s.view().screen {
        ScreenView::TeamSelect {
            teams,
            selected,
            scroll_offset,
            selected_team,
        } => {
            assert_eq!(selected, 12);
            assert_eq!(scroll_offset, 3);
            assert_eq!(teams.len(), 10);
            assert_eq!(teams[0].id, 4);
            assert_eq!(selected_team.id, 13);
        }
        other => panic!("unexpected screen {other:?}"),
    }

    press_and_tick(&mut s, &[Key::Down; 8]);
    assert!(matches!(
        s.view().screen,
        ScreenView::TeamSelect { selected: 0, scroll_offset: 0, .. }
    ));
    press_and_tick(&mut s, &[Key::Up]);
    assert!(matches!(
        s.view().screen,
        ScreenView::TeamSelect { selected: 19, scroll_offset: 10, .. }
    ));
}

#[test]
fn full_cup_run_through_the_shell() {
    let mut s = shell(8, 6);
    press_and_tick(&mut s, &[Key::Down, Key::Enter]);
    press_and_tick(&mut s, &[Key::Down, Key::Down]);
    press_and_tick(&mut s, &[Key::Enter]);
    assert_eq!(s.cup().unwrap().player_team.id, 3);

    let mut player_matches = 0;
    let mut finished = false;
    for _ in 0..1000 {
        match s.view().screen {
            ScreenView::PlayerMatch {
                player_team,
                opponent_team,
                minigame,
                ..
            } => {
                assert_eq!(player_team.id, 3);
                assert_ne!(opponent_team.id, 3);
                if minigame.status == MinigameStatus::Active {
                    player_matches += 1;
                    s.press(Key::Action);
                } else {
                    s.press(Key::Enter);
                }
            }
            ScreenView::CupFinished { status, winner, .. } => {
                assert_eq!(status, CupStatus::Finished);
                assert!(winner.is_some());
                finished = true;
                break;
            }
            _ => {}
        }
        s.tick();
    }
    assert!(finished);
    assert!((1..=3).contains(&player_matches));

    let cup = s.cup().unwrap();
    assert_eq!(cup.stages.len(), 3);
    assert_eq!(cup.played_match_count(), 7);

    press_and_tick(&mut s, &[Key::Enter]);
    assert!(s.cup().is_none());
    assert!(matches!(s.view().screen, ScreenView::MainMenu { .. }));
}

#[test]
fn double_action_in_one_frame_counts_once() {
    let mut s = shell(4, 7);
    press_and_tick(&mut s, &[Key::Down, Key::Enter]);
    press_and_tick(&mut s, &[Key::Enter]);
    // Starting the cup lands straight on the player's first match; one idle frame decides nothing.
    press_and_tick(&mut s, &[]);
    assert!(matches!(s.view().screen, ScreenView::PlayerMatch { .. }));
    s.drain_cues();

    press_and_tick(&mut s, &[Key::Action, Key::Action]);
    let cues = s.drain_cues();
    assert_eq!(cues.iter().filter(|c| **c == Cue::MinigameAction).count(), 1);
    assert_eq!(cues.len(), 2);
}
