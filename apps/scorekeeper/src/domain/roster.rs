//! Player identities handed to the engines at setup.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Lightweight player-selection record supplied by the roster collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl PlayerProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Name key used for duplicate detection: trimmed and case-folded.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Setup-time validation of a roster before a match may start.
pub fn validate_roster(players: &[PlayerProfile]) -> Result<(), DomainError> {
    if players.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyRoster,
            "A match needs at least one player",
        ));
    }

    let mut names = HashSet::with_capacity(players.len());
    let mut ids = HashSet::with_capacity(players.len());
    for p in players {
        if p.name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::BlankPlayerName,
                format!("Player '{}' has a blank name", p.id),
            ));
        }
        if !names.insert(name_key(&p.name)) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayerName,
                format!("Player name '{}' is used more than once", p.name.trim()),
            ));
        }
        if !ids.insert(p.id.as_str()) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayerId,
                format!("Player id '{}' is used more than once", p.id),
            ));
        }
    }
    Ok(())
}
