//! Public snapshot API for observing match state without exposing internals.
//!
//! Every engine event carries the players as snapshots; completion events add
//! a summary with the winner.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::CheckoutType;
use crate::domain::roster::PlayerProfile;
use crate::domain::state::Seat;
use crate::domain::stats::PlayerStats;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct X01PlayerSnapshot {
    pub seat: Seat,
    pub profile: PlayerProfile,
    pub remaining: u16,
    /// Legs won over the whole match.
    pub legs_won: u16,
    /// Legs won in the set being played.
    pub set_legs_won: u8,
    pub sets_won: u8,
    pub is_active: bool,
    /// Classification of `remaining`, for finish hints.
    pub checkout: CheckoutType,
    pub stats: PlayerStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct X01Summary {
    pub leg_no: u16,
    pub set_no: u16,
    pub winner: Option<PlayerProfile>,
    pub players: Vec<X01PlayerSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberMarks {
    pub number: u8,
    pub marks: u8,
    pub closed: bool,
}

/// Marks pace against the rest of the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    pub marks_per_turn: f64,
    pub marks_difference: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CricketPlayerSnapshot {
    pub seat: Seat,
    pub profile: PlayerProfile,
    pub marks: Vec<NumberMarks>,
    pub points: u32,
    pub total_marks: u32,
    pub turns: u32,
    pub closed_all: bool,
    pub is_active: bool,
    pub pace: Pace,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CricketSummary {
    pub winner: Option<PlayerProfile>,
    pub players: Vec<CricketPlayerSnapshot>,
}
