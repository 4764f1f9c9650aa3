//! Team roster: the built-in twenty teams, or one loaded from CSV.

use crate::models::{Rgb, Team, TeamId};
use crate::rng::RandomSource;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Errors that can occur while building a roster.
#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateTeamId(TeamId),
    Empty,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(e) => write!(f, "Could not read roster: {}", e),
            RosterError::Csv(e) => write!(f, "Invalid roster CSV: {}", e),
            RosterError::DuplicateTeamId(id) => write!(f, "Team id {} appears more than once", id),
            RosterError::Empty => write!(f, "Roster has no teams"),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<std::io::Error> for RosterError {
    fn from(e: std::io::Error) -> Self {
        RosterError::Io(e)
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// One CSV row: `id,name,skin_id,r,g,b`.
#[derive(Deserialize)]
struct TeamRecord {
    id: TeamId,
    name: String,
    skin_id: u32,
    r: u8,
    g: u8,
    b: u8,
}

impl From<TeamRecord> for Team {
    fn from(rec: TeamRecord) -> Self {
        Team::new(rec.id, rec.name.trim(), rec.skin_id, Rgb(rec.r, rec.g, rec.b))
    }
}

const BUILTIN_TEAMS: [(&str, Rgb); 20] = [
    ("Red Robins", Rgb(255, 0, 0)),
    ("Blue Blizzards", Rgb(0, 0, 255)),
    ("Green Ghosts", Rgb(0, 255, 0)),
    ("Yellow Yaks", Rgb(255, 255, 0)),
    ("Purple Penguins", Rgb(128, 0, 128)),
    ("Orange Otters", Rgb(255, 165, 0)),
    ("Cyan Cyclones", Rgb(0, 255, 255)),
    ("Pink Panthers", Rgb(255, 192, 203)),
    ("Brown Bears", Rgb(165, 42, 42)),
    ("Grey Geese", Rgb(128, 128, 128)),
    ("Golden Griffins", Rgb(255, 215, 0)),
    ("Silver Sharks", Rgb(192, 192, 192)),
    ("Bronze Badgers", Rgb(205, 127, 50)),
    ("Navy Narwhals", Rgb(0, 0, 128)),
    ("Teal Turtles", Rgb(0, 128, 128)),
    ("Maroon Monkeys", Rgb(128, 0, 0)),
    ("Olive Owls", Rgb(128, 128, 0)),
    ("Lime Lions", Rgb(0, 128, 0)),
    ("Indigo Iguanas", Rgb(75, 0, 130)),
    ("Violet Vultures", Rgb(238, 130, 238)),
];

/// Immutable list of teams with O(1) lookup by id.
#[derive(Clone, Debug)]
pub struct Roster {
    teams: Vec<Team>,
    by_id: HashMap<TeamId, usize>,
}

impl Roster {
    /// Build a roster. Ids must be unique and the list non-empty.
    pub fn new(teams: Vec<Team>) -> Result<Self, RosterError> {
        if teams.is_empty() {
            return Err(RosterError::Empty);
        }
        let mut by_id = HashMap::with_capacity(teams.len());
        for (idx, team) in teams.iter().enumerate() {
            if by_id.insert(team.id, idx).is_some() {
                return Err(RosterError::DuplicateTeamId(team.id));
            }
        }
        Ok(Self { teams, by_id })
    }

    /// The twenty teams shipped with the game (ids 1..=20, skin id == team id).
    pub fn builtin() -> Self {
        let teams: Vec<Team> = BUILTIN_TEAMS
            .iter()
            .zip(1..)
            .map(|(&(name, color), id)| Team::new(id, name, id as u32, color))
            .collect();
        let by_id = teams.iter().enumerate().map(|(idx, t)| (t.id, idx)).collect();
        Self { teams, by_id }
    }

    /// Read a roster from CSV with a header row `id,name,skin_id,r,g,b`.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, RosterError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut teams = Vec::new();
        for rec in rdr.deserialize::<TeamRecord>() {
            teams.push(Team::from(rec?));
        }
        Self::new(teams)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn all(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.by_id.get(&id).map(|&idx| &self.teams[idx])
    }

    /// `count` distinct teams chosen uniformly from the roster minus `exclude_ids`.
    ///
    /// Asking for more teams than are available returns all of them (logged);
    /// the caller must notice the shortfall.
    pub fn random_sample<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        exclude_ids: &[TeamId],
    ) -> Vec<Team> {
        let available: Vec<Team> = self
            .teams
            .iter()
            .filter(|t| !exclude_ids.contains(&t.id))
            .cloned()
            .collect();
        if count > available.len() {
            log::warn!(
                "Requested {} teams, but only {} unique teams are available after exclusion",
                count,
                available.len()
            );
        }
        rng.sample_without_replacement(&available, count)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::builtin()
    }
}
