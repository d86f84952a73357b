//! Roster lookup seam.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::roster::PlayerProfile;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Supplies the players for a new match.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(&self) -> Result<Vec<PlayerProfile>, DomainError>;
}

/// Fixed roster held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    players: Vec<PlayerProfile>,
}

impl StaticRoster {
    pub fn new(players: Vec<PlayerProfile>) -> Self {
        Self { players }
    }
}

#[async_trait]
impl RosterSource for StaticRoster {
    async fn fetch_roster(&self) -> Result<Vec<PlayerProfile>, DomainError> {
        Ok(self.players.clone())
    }
}

/// Roster read from a JSON array of player profiles on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRoster {
    path: PathBuf,
}

impl JsonFileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterSource for JsonFileRoster {
    async fn fetch_roster(&self) -> Result<Vec<PlayerProfile>, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::infra(
                InfraErrorKind::RosterUnavailable,
                format!("Cannot read roster {}: {e}", self.path.display()),
            )
        })?;
        let players: Vec<PlayerProfile> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::RosterUnavailable,
                format!("Malformed roster {}: {e}", self.path.display()),
            )
        })?;
        debug!(path = %self.path.display(), players = players.len(), "Roster loaded");
        Ok(players)
    }
}
