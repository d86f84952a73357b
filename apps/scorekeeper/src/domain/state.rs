use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Roster position of a player within a match (0-based, throwing order).
pub type Seat = usize;

/// Match progression shared by both engines.
///
/// Cricket only ever uses `InProgress` and `GameComplete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    LegComplete,
    SetComplete,
    GameComplete,
}

/// Next seat in throwing order, wrapping at `players`.
#[inline]
pub fn next_seat(seat: Seat, players: usize) -> Seat {
    debug_assert!(players > 0, "a match always has at least one player");
    (seat + 1) % players
}

/// Seat `n` steps after `start`.
#[inline]
pub fn nth_from(start: Seat, n: usize, players: usize) -> Seat {
    (start + n) % players
}

pub fn require_in_progress(status: MatchStatus, ctx: &'static str) -> Result<(), DomainError> {
    if status != MatchStatus::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("{ctx}: match is {status:?}, not in progress"),
        ));
    }
    Ok(())
}

pub fn require_active(active: Option<Seat>, ctx: &'static str) -> Result<Seat, DomainError> {
    active.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: active seat must be set ({ctx})"))
    })
}
