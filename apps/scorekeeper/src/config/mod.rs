//! Match configuration: typed game settings and their environment defaults.

pub mod env;
pub mod match_config;

pub use match_config::{CricketConfig, CricketMode, LegStarter, StartScore, X01Config};
