//! Collaborators around the engines: where rosters come from and where
//! finished matches go. Both are injected into [`MatchService`].

pub mod match_record;
pub mod match_service;
pub mod match_store;
pub mod roster_source;

pub use match_record::{GameVariant, MatchRecord, PlayerResult, ResultDetail};
pub use match_service::MatchService;
pub use match_store::{InMemoryMatchStore, MatchStore};
pub use roster_source::{JsonFileRoster, RosterSource, StaticRoster};
