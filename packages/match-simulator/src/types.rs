//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

/// How well a simulated player throws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Novice,
    Club,
    County,
    Pro,
}

impl SkillLevel {
    /// Chance of hitting the aimed treble.
    pub fn treble_rate(self) -> f64 {
        match self {
            SkillLevel::Novice => 0.05,
            SkillLevel::Club => 0.15,
            SkillLevel::County => 0.3,
            SkillLevel::Pro => 0.45,
        }
    }

    /// Chance of hitting the aimed double.
    pub fn double_rate(self) -> f64 {
        match self {
            SkillLevel::Novice => 0.1,
            SkillLevel::Club => 0.2,
            SkillLevel::County => 0.33,
            SkillLevel::Pro => 0.42,
        }
    }

    /// Chance of hitting an aimed single.
    pub fn single_rate(self) -> f64 {
        match self {
            SkillLevel::Novice => 0.6,
            SkillLevel::Club => 0.75,
            SkillLevel::County => 0.85,
            SkillLevel::Pro => 0.92,
        }
    }
}
