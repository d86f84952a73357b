#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod replay;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::{CricketConfig, CricketMode, LegStarter, StartScore, X01Config};
pub use domain::{
    checkout_type, CheckoutType, CricketEvent, CricketMatch, MatchStatus, PlayerProfile,
    ScoreInput, X01Event, X01Match,
};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use services::{InMemoryMatchStore, MatchRecord, MatchService, StaticRoster};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
