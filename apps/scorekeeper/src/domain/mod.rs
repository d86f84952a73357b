//! Domain layer: pure scoring logic for X01 and Cricket.

pub mod checkout;
pub mod keypad;
pub mod ledger;
pub mod roster;
pub mod rules;
pub mod stats;
pub mod throws;

pub mod cricket;
pub mod snapshot;
pub mod state;
pub mod x01;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_checkout;
#[cfg(test)]
mod tests_x01;

// Re-exports for ergonomics
pub use checkout::{checkout_type, CheckoutType};
pub use cricket::{CricketEvent, CricketMatch, CricketTransition, MarksApplied, TurnSelection};
pub use keypad::ScoreInput;
pub use ledger::{CheckoutRecord, Turn, TurnLedger};
pub use roster::{validate_roster, PlayerProfile};
pub use snapshot::{CricketPlayerSnapshot, CricketSummary, Pace, X01PlayerSnapshot, X01Summary};
pub use state::{MatchStatus, Seat};
pub use stats::{PlayerStats, StatsAccumulator};
pub use x01::{CheckoutKind, PendingCheckout, TurnPhase, X01Event, X01Match, X01Transition};
