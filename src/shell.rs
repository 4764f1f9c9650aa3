//! Game shell: the screen state machine a presenter drives with key presses and frame ticks.
//!
//! The shell owns the menus, the quick match and the cup session, and turns
//! minigame outcomes into cup results. It does no drawing and plays no sound:
//! a presenter renders [`Shell::view`] and plays the [`Cue`]s from
//! [`Shell::drain_cues`].

use crate::logic::{
    advance_cup, initialize_cup, pending_player_match, Advance, Minigame, QuickMatch,
    QuickMatchStatus, SkillMinigameResolver,
};
use crate::models::{Cup, CupStatus, Team, TeamId};
use crate::roster::Roster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Main menu entries, in display order.
pub const MENU_OPTIONS: [MenuOption; 3] = [MenuOption::QuickMatch, MenuOption::Cup, MenuOption::Quit];

/// Teams visible at once on the team-select screen.
pub const TEAMS_PER_PAGE: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOption {
    QuickMatch,
    Cup,
    Quit,
}

impl MenuOption {
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::QuickMatch => "Quick Match",
            MenuOption::Cup => "Cup",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Keys the shell understands. Each press is an edge event consumed by the next tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Enter,
    /// Minigame action (space bar).
    Action,
    /// Close the game.
    Quit,
}

/// Sound effects the presenter should play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    MenuNavigate,
    MenuSelect,
    MinigameAction,
    MinigameWin,
    MinigameLoss,
}

/// Shell settings taken from the game config.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShellSettings {
    pub field_size: usize,
    pub quick_match_team_id: TeamId,
}

#[derive(Clone, Debug)]
enum Screen {
    MainMenu,
    QuickMatch {
        game: QuickMatch,
        minigame: Option<Minigame>,
    },
    TeamSelect {
        selected: usize,
        scroll_offset: usize,
    },
    CupActive,
    PlayerMatch {
        resolver: SkillMinigameResolver,
    },
    /// Cup over: finished, or halted on error.
    CupFinished,
    Closed,
}

pub struct Shell {
    roster: Arc<Roster>,
    settings: ShellSettings,
    rng: StdRng,
    screen: Screen,
    menu_selected: usize,
    cup: Option<Cup>,
    pending_keys: Vec<Key>,
    cues: Vec<Cue>,
    last_error: Option<String>,
    frame: u64,
}

impl Shell {
    /// New shell on the main menu. `seed` makes every random choice reproducible.
    pub fn new(roster: Arc<Roster>, settings: ShellSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            roster,
            settings,
            rng,
            screen: Screen::MainMenu,
            menu_selected: 0,
            cup: None,
            pending_keys: Vec::new(),
            cues: Vec::new(),
            last_error: None,
            frame: 0,
        }
    }

    /// Queue a key press for the next tick.
    pub fn press(&mut self, key: Key) {
        self.pending_keys.push(key);
    }

    /// Cues emitted since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn cup(&self) -> Option<&Cup> {
        self.cup.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.screen, Screen::Closed)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame: apply queued keys in order, then advance whatever the
    /// current screen runs. Several `Action` presses in one frame count once.
    pub fn tick(&mut self) {
        if self.is_closed() {
            self.pending_keys.clear();
            return;
        }
        self.frame += 1;
        let keys = std::mem::take(&mut self.pending_keys);
        let action = keys.contains(&Key::Action);
        for key in keys.into_iter().filter(|k| *k != Key::Action) {
            self.handle_key(key);
        }
        self.update(action);
    }

    fn handle_key(&mut self, key: Key) {
        if key == Key::Quit {
            log::info!("Game closed");
            self.screen = Screen::Closed;
            return;
        }
        match &mut self.screen {
            Screen::MainMenu => match key {
                Key::Up => {
                    self.menu_selected = (self.menu_selected + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
                    self.cues.push(Cue::MenuNavigate);
                }
                Key::Down => {
                    self.menu_selected = (self.menu_selected + 1) % MENU_OPTIONS.len();
                    self.cues.push(Cue::MenuNavigate);
                }
                Key::Enter => {
                    self.cues.push(Cue::MenuSelect);
                    self.select_menu_option();
                }
                _ => {}
            },
            Screen::QuickMatch { game, .. } => {
                if key == Key::Enter && game.status == QuickMatchStatus::Finished {
                    self.screen = Screen::MainMenu;
                }
            }
            Screen::TeamSelect {
                selected,
                scroll_offset,
            } => {
                let count = self.roster.len();
                match key {
                    Key::Up => {
                        *selected = (*selected + count - 1) % count;
                        *scroll_offset = scroll_window(*selected, *scroll_offset);
                        self.cues.push(Cue::MenuNavigate);
                    }
                    Key::Down => {
                        *selected = (*selected + 1) % count;
                        *scroll_offset = scroll_window(*selected, *scroll_offset);
                        self.cues.push(Cue::MenuNavigate);
                    }
                    Key::Enter => {
                        let team_id = self.roster.all()[*selected].id;
                        self.cues.push(Cue::MenuSelect);
                        self.start_cup(team_id);
                    }
                    _ => {}
                }
            }
            Screen::PlayerMatch { resolver } => {
                if key == Key::Enter && resolver.outcome().is_some() {
                    self.screen = Screen::CupActive;
                }
            }
            Screen::CupFinished => {
                if key == Key::Enter {
                    self.cup = None;
                    self.screen = Screen::MainMenu;
                }
            }
            Screen::CupActive | Screen::Closed => {}
        }
    }

    fn select_menu_option(&mut self) {
        let option = MENU_OPTIONS[self.menu_selected];
        log::debug!("Menu selected: {}", option.label());
        match option {
            MenuOption::QuickMatch => {
                let game = QuickMatch::start(&self.roster, self.settings.quick_match_team_id, &mut self.rng);
                self.screen = Screen::QuickMatch {
                    game,
                    minigame: None,
                };
            }
            MenuOption::Cup => {
                self.screen = Screen::TeamSelect {
                    selected: 0,
                    scroll_offset: 0,
                };
            }
            MenuOption::Quit => {
                log::info!("Game closed from menu");
                self.screen = Screen::Closed;
            }
        }
    }

    fn start_cup(&mut self, team_id: TeamId) {
        match initialize_cup(&self.roster, team_id, self.settings.field_size, &mut self.rng) {
            Ok(cup) => {
                self.last_error = None;
                self.cup = Some(cup);
                self.screen = Screen::CupActive;
            }
            Err(e) => {
                log::warn!("Could not start cup: {}", e);
                self.last_error = Some(e.to_string());
                self.screen = Screen::MainMenu;
            }
        }
    }

    fn update(&mut self, action: bool) {
        match &mut self.screen {
            Screen::QuickMatch { game, minigame } => match game.status {
                QuickMatchStatus::Starting => {
                    game.begin_play();
                    *minigame = Some(Minigame::start(&mut self.rng));
                }
                QuickMatchStatus::Playing => {
                    let Some(mg) = minigame.as_mut() else {
                        *minigame = Some(Minigame::start(&mut self.rng));
                        return;
                    };
                    if action && mg.is_active() {
                        self.cues.push(Cue::MinigameAction);
                    }
                    mg.tick(action);
                    if let Some(player_won) = mg.player_won() {
                        game.finish(player_won);
                        self.cues.push(outcome_cue(player_won));
                    }
                }
                QuickMatchStatus::Finished => {}
            },
            Screen::PlayerMatch { resolver } => {
                if resolver.outcome().is_some() {
                    return;
                }
                if action {
                    self.cues.push(Cue::MinigameAction);
                }
                resolver.tick(action);
                let Some(cup) = self.cup.as_mut() else {
                    self.screen = Screen::MainMenu;
                    return;
                };
                match resolver.report(cup) {
                    Ok(Some(player_won)) => self.cues.push(outcome_cue(player_won)),
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("Could not report player match: {}", e);
                        self.last_error = Some(e.to_string());
                    }
                }
            }
            Screen::CupActive => self.update_cup(),
            Screen::MainMenu | Screen::TeamSelect { .. } | Screen::CupFinished | Screen::Closed => {}
        }
    }

    fn update_cup(&mut self) {
        let Some(cup) = self.cup.as_mut() else {
            self.screen = Screen::MainMenu;
            return;
        };
        if let Some(m) = pending_player_match(cup) {
            log::info!("Next player cup match: {} vs {}", m.team_1.name, m.team_2.name);
            self.screen = Screen::PlayerMatch {
                resolver: SkillMinigameResolver::start(m.id.clone(), &mut self.rng),
            };
            return;
        }
        match advance_cup(cup, &mut self.rng) {
            Advance::Finished(_) => self.screen = Screen::CupFinished,
            Advance::Inactive(CupStatus::Error) => {
                self.last_error = cup.diagnostic.clone();
                self.screen = Screen::CupFinished;
            }
            Advance::Inactive(_) => self.screen = Screen::CupFinished,
            Advance::NextStage(_) | Advance::AwaitingPlayer(_) => {}
        }
    }

    /// Serializable snapshot for the presenter.
    pub fn view(&self) -> ShellView {
        let screen = match &self.screen {
            Screen::MainMenu => ScreenView::MainMenu {
                options: MENU_OPTIONS.iter().map(|o| o.label()).collect(),
                selected: self.menu_selected,
            },
            Screen::QuickMatch { game, minigame } => ScreenView::QuickMatch {
                quick_match: game.clone(),
                minigame: minigame.clone(),
            },
            Screen::TeamSelect {
                selected,
                scroll_offset,
            } => {
                let teams = self.roster.all();
                let end = (*scroll_offset + TEAMS_PER_PAGE).min(teams.len());
                ScreenView::TeamSelect {
                    teams: teams[*scroll_offset..end].to_vec(),
                    selected: *selected,
                    scroll_offset: *scroll_offset,
                    selected_team: teams[*selected].clone(),
                }
            }
            Screen::CupActive => ScreenView::CupActive {
                stage: self
                    .cup
                    .as_ref()
                    .map(|c| c.current_stage_name().to_string())
                    .unwrap_or_default(),
            },
            Screen::PlayerMatch { resolver } => {
                let (player_team, opponent_team) = self
                    .cup
                    .as_ref()
                    .and_then(|c| {
                        let m = c.find_match(resolver.match_id())?;
                        let player = m.side_of(c.player_team_id())?;
                        Some((m.team(player).clone(), m.team(player.opposite()).clone()))
                    })
                    .unwrap_or_else(|| (Team::placeholder(), Team::placeholder_opponent()));
                ScreenView::PlayerMatch {
                    match_id: resolver.match_id().to_string(),
                    player_team,
                    opponent_team,
                    minigame: resolver.minigame().clone(),
                }
            }
            Screen::CupFinished => ScreenView::CupFinished {
                status: self.cup.as_ref().map(|c| c.status).unwrap_or_default(),
                winner: self.cup.as_ref().and_then(|c| c.cup_winner.clone()),
                diagnostic: self.cup.as_ref().and_then(|c| c.diagnostic.clone()),
            },
            Screen::Closed => ScreenView::Closed,
        };
        ShellView {
            screen,
            cup: self.cup.clone(),
            last_error: self.last_error.clone(),
            frame: self.frame,
        }
    }
}

/// What the presenter should draw.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenView {
    MainMenu {
        options: Vec<&'static str>,
        selected: usize,
    },
    QuickMatch {
        quick_match: QuickMatch,
        minigame: Option<Minigame>,
    },
    TeamSelect {
        /// The visible page only.
        teams: Vec<Team>,
        selected: usize,
        scroll_offset: usize,
        selected_team: Team,
    },
    CupActive {
        stage: String,
    },
    PlayerMatch {
        match_id: String,
        player_team: Team,
        opponent_team: Team,
        minigame: Minigame,
    },
    CupFinished {
        status: CupStatus,
        winner: Option<Team>,
        diagnostic: Option<String>,
    },
    Closed,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShellView {
    pub screen: ScreenView,
    /// Full bracket, for drawing behind the current screen.
    pub cup: Option<Cup>,
    pub last_error: Option<String>,
    pub frame: u64,
}

/// Keep `selected` inside a `TEAMS_PER_PAGE` window starting at `offset`.
fn scroll_window(selected: usize, offset: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + TEAMS_PER_PAGE {
        selected + 1 - TEAMS_PER_PAGE
    } else {
        offset
    }
}

fn outcome_cue(player_won: bool) -> Cue {
    if player_won {
        Cue::MinigameWin
    } else {
        Cue::MinigameLoss
    }
}
