//! Checkout classification for X01 remaining scores.

use serde::{Deserialize, Serialize};

use crate::domain::rules::MAX_CHECKOUT;

/// Scores within checkout range that no three darts can finish on a double.
pub const IMPOSSIBLE_CHECKOUTS: [u16; 7] = [169, 168, 166, 165, 163, 162, 159];

/// High finishes that still go out in two darts.
pub const HIGH_TWO_DART_CHECKOUTS: [u16; 4] = [110, 107, 104, 101];

/// How hard a remaining score is to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutType {
    /// Out of checkout range (or nothing left to finish).
    #[serde(rename = "none")]
    None,
    /// In range but not finishable with three darts.
    #[serde(rename = "impossible")]
    Impossible,
    #[serde(rename = "1dart")]
    OneDart,
    #[serde(rename = "2dart")]
    TwoDart,
    #[serde(rename = "3dart")]
    ThreeDart,
}

impl CheckoutType {
    /// Fewest darts that can finish a score of this type.
    pub const fn min_darts(self) -> Option<u8> {
        match self {
            CheckoutType::OneDart => Some(1),
            CheckoutType::TwoDart => Some(2),
            CheckoutType::ThreeDart => Some(3),
            CheckoutType::None | CheckoutType::Impossible => None,
        }
    }

    pub const fn is_finishable(self) -> bool {
        self.min_darts().is_some()
    }
}

/// Classify a remaining score.
///
/// Scores below 2 have no finish and classify as `None`.
pub fn checkout_type(score: u16) -> CheckoutType {
    if score > MAX_CHECKOUT || score < 2 {
        return CheckoutType::None;
    }
    if IMPOSSIBLE_CHECKOUTS.contains(&score) {
        return CheckoutType::Impossible;
    }
    if (score <= 40 && score % 2 == 0) || score == 50 {
        return CheckoutType::OneDart;
    }
    if HIGH_TWO_DART_CHECKOUTS.contains(&score) {
        return CheckoutType::TwoDart;
    }
    if score <= 110 && score != 99 {
        return CheckoutType::TwoDart;
    }
    CheckoutType::ThreeDart
}
