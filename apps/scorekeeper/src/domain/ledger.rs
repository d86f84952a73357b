//! Append-only per-player turn history, grouped by leg.

use serde::{Deserialize, Serialize};

use crate::domain::rules::DARTS_PER_TURN;

/// Checkout detail attached to a turn thrown while on a finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
    /// Darts thrown at a finishing double this turn.
    pub darts_at_double: u8,
    pub success: bool,
}

/// One scoring visit. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Value submitted by the player.
    pub score: u16,
    /// Value that counts toward averages: `score`, or 0 for a bust.
    pub counted: u16,
    pub darts: u8,
    pub bust: bool,
    pub checkout: Option<CheckoutRecord>,
}

impl Turn {
    /// A full three-dart visit that counts.
    pub fn scored(score: u16) -> Self {
        Self {
            score,
            counted: score,
            darts: DARTS_PER_TURN,
            bust: false,
            checkout: None,
        }
    }

    /// Three darts thrown, nothing counts.
    pub fn bust(score: u16) -> Self {
        Self {
            score,
            counted: 0,
            darts: DARTS_PER_TURN,
            bust: true,
            checkout: None,
        }
    }

    /// The leg-winning visit, finished with the first dart at a double.
    pub fn checkout(score: u16, darts: u8) -> Self {
        Self::checkout_at_double(score, darts, 1)
    }

    /// The leg-winning visit, including doubles missed before the finish.
    pub fn checkout_at_double(score: u16, darts: u8, darts_at_double: u8) -> Self {
        Self {
            score,
            counted: score,
            darts,
            bust: false,
            checkout: Some(CheckoutRecord {
                darts_at_double,
                success: true,
            }),
        }
    }

    /// A counted visit that was on a finish but did not go out.
    pub fn missed_checkout(score: u16, darts_at_double: u8) -> Self {
        Self {
            checkout: Some(CheckoutRecord {
                darts_at_double,
                success: false,
            }),
            ..Self::scored(score)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLedger {
    completed_legs: Vec<Vec<Turn>>,
    current: Vec<Turn>,
}

impl TurnLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.current.push(turn);
    }

    /// Remove the latest turn of the current leg. Closed legs are immutable.
    pub fn pop_current(&mut self) -> Option<Turn> {
        self.current.pop()
    }

    /// Seal the current leg. An empty leg is still recorded so leg indices
    /// line up across players.
    pub fn close_leg(&mut self) {
        let leg = std::mem::take(&mut self.current);
        self.completed_legs.push(leg);
    }

    pub fn current_leg(&self) -> &[Turn] {
        &self.current
    }

    pub fn completed_legs(&self) -> &[Vec<Turn>] {
        &self.completed_legs
    }

    /// Completed legs followed by the current one.
    pub fn legs(&self) -> impl Iterator<Item = &[Turn]> {
        self.completed_legs
            .iter()
            .map(Vec::as_slice)
            .chain(std::iter::once(self.current.as_slice()))
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.legs().flat_map(|leg| leg.iter())
    }

    pub fn last(&self) -> Option<&Turn> {
        self.current.last()
    }

    pub fn darts_this_leg(&self) -> u32 {
        self.current.iter().map(|t| t.darts as u32).sum()
    }

    pub fn scored_this_leg(&self) -> u32 {
        self.current.iter().map(|t| t.counted as u32).sum()
    }
}
