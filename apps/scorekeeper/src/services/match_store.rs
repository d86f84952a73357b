//! Persistence seam for finished matches.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::services::match_record::MatchRecord;

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn save_completed_match(&self, record: MatchRecord) -> Result<(), DomainError>;

    async fn load_match(&self, id: Uuid) -> Result<MatchRecord, DomainError>;
}

/// Process-local store, keyed by match id. Saving the same id twice is a
/// conflict.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    records: Mutex<HashMap<Uuid, MatchRecord>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<MatchRecord> {
        self.records.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> Vec<MatchRecord> {
        let mut all: Vec<MatchRecord> = self.records.lock().values().cloned().collect();
        all.sort_by_key(|r| r.finished_at);
        all
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn save_completed_match(&self, record: MatchRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock();
        if records.contains_key(&record.id) {
            return Err(DomainError::conflict(
                ConflictKind::MatchAlreadyRecorded,
                format!("Match {} is already recorded", record.id),
            ));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn load_match(&self, id: Uuid) -> Result<MatchRecord, DomainError> {
        self.get(id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {id} is not recorded"))
        })
    }
}
