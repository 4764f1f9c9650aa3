//! Runtime configuration from environment variables.
//!
//! | Variable              | Default   |
//! |-----------------------|-----------|
//! | `HOST`                | `0.0.0.0` |
//! | `PORT`                | `8080`    |
//! | `CUP_FIELD_SIZE`      | `16`      |
//! | `QUICK_MATCH_TEAM_ID` | `1`       |
//! | `FRAME_RATE`          | `60`      |
//! | `SESSION_IDLE_HOURS`  | `12`      |
//! | `ROSTER_CSV`          | built-in  |
//! | `RNG_SEED`            | entropy   |

use crate::models::{stage_names_for, TeamId, DEFAULT_FIELD_SIZE};
use crate::roster::{Roster, RosterError};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// A variable was set to something unusable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid {}={:?}: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub host: String,
    pub port: u16,
    /// Teams per cup: a power of two, 2..=16.
    pub field_size: usize,
    /// Team the player controls in quick matches.
    pub quick_match_team_id: TeamId,
    /// Server-side ticks per second.
    pub frame_rate: u32,
    /// Sessions untouched this long are dropped.
    pub session_idle: Duration,
    pub roster_csv: Option<PathBuf>,
    /// Seed for reproducible sessions; each session derives its own seed from it.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            field_size: DEFAULT_FIELD_SIZE,
            quick_match_team_id: 1,
            frame_rate: 60,
            session_idle: Duration::from_secs(12 * 3600),
            roster_csv: None,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let field_size = parse_or(&get, "CUP_FIELD_SIZE", defaults.field_size)?;
        if let Err(e) = stage_names_for(field_size) {
            return Err(invalid("CUP_FIELD_SIZE", field_size, e));
        }
        let frame_rate: u32 = parse_or(&get, "FRAME_RATE", defaults.frame_rate)?;
        if !(1..=240).contains(&frame_rate) {
            return Err(invalid("FRAME_RATE", frame_rate, "must be between 1 and 240"));
        }
        let idle_hours: u64 = parse_or(&get, "SESSION_IDLE_HOURS", 12)?;
        if idle_hours == 0 {
            return Err(invalid("SESSION_IDLE_HOURS", idle_hours, "must be at least 1"));
        }

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(&get, "PORT", defaults.port)?,
            field_size,
            quick_match_team_id: parse_or(&get, "QUICK_MATCH_TEAM_ID", defaults.quick_match_team_id)?,
            frame_rate,
            session_idle: Duration::from_secs(idle_hours * 3600),
            roster_csv: get("ROSTER_CSV").map(PathBuf::from),
            rng_seed: get("RNG_SEED").map(|v| parse("RNG_SEED", &v)).transpose()?,
        })
    }

    /// Duration of one server tick.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }

    /// The CSV roster if one is configured, else the built-in teams.
    pub fn load_roster(&self) -> Result<Roster, RosterError> {
        match &self.roster_csv {
            Some(path) => Roster::from_csv_path(path),
            None => Ok(Roster::builtin()),
        }
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => parse(key, &v),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: impl ToString, reason: impl ToString) -> ConfigError {
    ConfigError {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
