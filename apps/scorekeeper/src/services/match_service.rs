//! Match setup and hand-off of finished matches.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{CricketConfig, X01Config};
use crate::domain::cricket::CricketMatch;
use crate::domain::x01::X01Match;
use crate::errors::domain::DomainError;
use crate::services::match_record::MatchRecord;
use crate::services::match_store::MatchStore;
use crate::services::roster_source::RosterSource;

/// Starts matches from the injected roster and saves finished ones to the
/// injected store.
#[derive(Clone)]
pub struct MatchService {
    roster: Arc<dyn RosterSource>,
    store: Arc<dyn MatchStore>,
}

impl MatchService {
    pub fn new(roster: Arc<dyn RosterSource>, store: Arc<dyn MatchStore>) -> Self {
        Self { roster, store }
    }

    pub async fn start_x01(&self, config: X01Config) -> Result<X01Match, DomainError> {
        let roster = self.roster.fetch_roster().await?;
        X01Match::new(config, roster)
    }

    pub async fn start_cricket(&self, config: CricketConfig) -> Result<CricketMatch, DomainError> {
        let roster = self.roster.fetch_roster().await?;
        CricketMatch::new(config, roster)
    }

    /// Save in the background. Failures are logged, never surfaced to the
    /// caller; the handle is returned for callers that want to wait.
    pub fn publish_completed(&self, record: MatchRecord) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let id = record.id;
            match store.save_completed_match(record).await {
                Ok(()) => info!(match_id = %id, "Match recorded"),
                Err(err) => warn!(match_id = %id, error = %err, "Failed to record match"),
            }
        })
    }

    pub async fn recorded_match(&self, id: Uuid) -> Result<MatchRecord, DomainError> {
        self.store.load_match(id).await
    }

    pub fn publish_x01(&self, m: &X01Match) -> Result<JoinHandle<()>, DomainError> {
        Ok(self.publish_completed(MatchRecord::from_x01(m)?))
    }

    pub fn publish_cricket(&self, m: &CricketMatch) -> Result<JoinHandle<()>, DomainError> {
        Ok(self.publish_completed(MatchRecord::from_cricket(m)?))
    }
}
