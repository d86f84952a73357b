use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::rules::MARKS_REQUIRED_RANGE;
use crate::errors::domain::{DomainError, ValidationKind};

/// Starting score of an X01 game.
///
/// Serialized as the plain number (`501`), so scripts and stored records stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum StartScore {
    S101,
    S201,
    S301,
    S501,
    S701,
}

impl StartScore {
    pub const ALL: [StartScore; 5] = [
        StartScore::S101,
        StartScore::S201,
        StartScore::S301,
        StartScore::S501,
        StartScore::S701,
    ];

    pub const fn points(self) -> u16 {
        match self {
            StartScore::S101 => 101,
            StartScore::S201 => 201,
            StartScore::S301 => 301,
            StartScore::S501 => 501,
            StartScore::S701 => 701,
        }
    }
}

impl TryFrom<u16> for StartScore {
    type Error = DomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        StartScore::ALL
            .into_iter()
            .find(|s| s.points() == value)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidConfig,
                    format!("start score must be one of 101, 201, 301, 501, 701 (got {value})"),
                )
            })
    }
}

impl From<StartScore> for u16 {
    fn from(value: StartScore) -> Self {
        value.points()
    }
}

impl fmt::Display for StartScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Who throws first in the next leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegStarter {
    /// Plain round-robin continuation: the player after the one who threw the
    /// winning turn opens the next leg.
    #[default]
    Continue,
    /// Leg openers rotate through the roster in seat order.
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Config {
    pub start_score: StartScore,
    /// Legs needed to win a set.
    pub legs_to_win: u8,
    /// Sets needed to win the match.
    pub sets_to_win: u8,
    #[serde(default)]
    pub leg_starter: LegStarter,
}

impl Default for X01Config {
    fn default() -> Self {
        Self {
            start_score: StartScore::S501,
            legs_to_win: 1,
            sets_to_win: 1,
            leg_starter: LegStarter::Continue,
        }
    }
}

impl X01Config {
    pub fn new(start_score: StartScore, legs_to_win: u8, sets_to_win: u8) -> Self {
        Self {
            start_score,
            legs_to_win,
            sets_to_win,
            leg_starter: LegStarter::default(),
        }
    }

    pub fn with_leg_starter(mut self, leg_starter: LegStarter) -> Self {
        self.leg_starter = leg_starter;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.legs_to_win == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "legs_to_win must be at least 1",
            ));
        }
        if self.sets_to_win == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "sets_to_win must be at least 1",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CricketMode {
    /// Closed-number scoring: excess marks score points while an opponent is open.
    #[default]
    Cricket,
    /// Strict sequence 20 → 15 → Bull, one number at a time, no points.
    Route,
}

impl std::str::FromStr for CricketMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cricket" => Ok(CricketMode::Cricket),
            "route" => Ok(CricketMode::Route),
            other => Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("unknown cricket mode '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CricketConfig {
    #[serde(default)]
    pub mode: CricketMode,
    pub marks_required: u8,
}

impl Default for CricketConfig {
    fn default() -> Self {
        Self {
            mode: CricketMode::Cricket,
            marks_required: 3,
        }
    }
}

impl CricketConfig {
    pub fn new(mode: CricketMode, marks_required: u8) -> Self {
        Self {
            mode,
            marks_required,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !MARKS_REQUIRED_RANGE.contains(&self.marks_required) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "marks_required must be in {MARKS_REQUIRED_RANGE:?} (got {})",
                    self.marks_required
                ),
            ));
        }
        Ok(())
    }
}
