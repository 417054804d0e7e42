use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The settled outcome of a play, as recorded in the `MASTER` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "P")]
    Push,
}

impl PlayResult {
    /// The single-letter code used by the data provider.
    pub fn code(&self) -> &'static str {
        match self {
            PlayResult::Win => "W",
            PlayResult::Loss => "L",
            PlayResult::Push => "P",
        }
    }
}

impl FromStr for PlayResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "W" => Ok(PlayResult::Win),
            "L" => Ok(PlayResult::Loss),
            "P" => Ok(PlayResult::Push),
            _ => Err(CoreError::UnknownResultCode(s.trim().to_string())),
        }
    }
}

impl fmt::Display for PlayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How pushes are treated when computing a win rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRatePolicy {
    /// `wins / (wins + losses)`. Pushes are not decisions.
    #[default]
    ExcludePushes,
    /// `wins / total`. Pushes count against the rate.
    IncludePushes,
}
