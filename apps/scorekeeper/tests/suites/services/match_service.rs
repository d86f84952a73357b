use std::sync::Arc;

use async_trait::async_trait;
use scorekeeper::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};
use scorekeeper::services::{MatchStore, RosterSource};
use scorekeeper::{
    CricketConfig, DomainError, InMemoryMatchStore, MatchRecord, MatchService, StartScore,
    StaticRoster, X01Config, X01Match,
};
use uuid::Uuid;

use crate::common::roster;

struct UnavailableStore;

#[async_trait]
impl MatchStore for UnavailableStore {
    async fn save_completed_match(&self, _record: MatchRecord) -> Result<(), DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::StoreUnavailable,
            "store is offline",
        ))
    }

    async fn load_match(&self, _id: Uuid) -> Result<MatchRecord, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::StoreUnavailable,
            "store is offline",
        ))
    }
}

fn service_with(players: usize) -> (MatchService, Arc<InMemoryMatchStore>) {
    let store = Arc::new(InMemoryMatchStore::new());
    let roster: Arc<dyn RosterSource> = Arc::new(StaticRoster::new(roster(players)));
    (MatchService::new(roster, store.clone()), store)
}

fn finished_x01(service_match: &mut X01Match) {
    service_match.submit_score(101).unwrap();
    service_match.confirm_darts_used(2).unwrap();
}

#[tokio::test]
async fn starts_matches_from_the_injected_roster() -> Result<(), DomainError> {
    let (service, _) = service_with(3);

    let x01 = service.start_x01(X01Config::default()).await?;
    assert_eq!(x01.players().len(), 3);
    assert_eq!(x01.active(), Some(0));

    let cricket = service.start_cricket(CricketConfig::default()).await?;
    assert_eq!(cricket.players().len(), 3);
    Ok(())
}

#[tokio::test]
async fn empty_roster_is_a_setup_error() {
    let (service, _) = service_with(0);
    let err = service.start_x01(X01Config::default()).await.unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::EmptyRoster));
}

#[tokio::test]
async fn finished_match_is_saved_in_the_background() -> Result<(), DomainError> {
    let (service, store) = service_with(2);
    let mut m = service
        .start_x01(X01Config::new(StartScore::S101, 1, 1))
        .await?;
    finished_x01(&mut m);

    service.publish_x01(&m)?.await.expect("save task finished");

    assert_eq!(store.len(), 1);
    let record = &store.records()[0];
    assert_eq!(record.winner, m.players()[0].profile);
    assert!(record.players[0].won);
    assert!(!record.players[1].won);
    Ok(())
}

#[tokio::test]
async fn unfinished_match_cannot_be_published() {
    let (service, store) = service_with(2);
    let m = service.start_x01(X01Config::default()).await.unwrap();

    let err = service.publish_x01(&m).unwrap_err();
    assert_eq!(
        err,
        DomainError::conflict(
            ConflictKind::MatchNotComplete,
            "Only finished matches can be recorded"
        )
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn duplicate_publish_keeps_the_first_record() {
    let (service, store) = service_with(1);
    let mut m = service
        .start_x01(X01Config::new(StartScore::S101, 1, 1))
        .await
        .unwrap();
    finished_x01(&mut m);

    let record = MatchRecord::from_x01(&m).unwrap();
    service.publish_completed(record.clone()).await.unwrap();
    service.publish_completed(record.clone()).await.unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(record.id), Some(record));
}

#[tokio::test]
async fn store_failures_do_not_reach_the_caller() {
    let roster: Arc<dyn RosterSource> = Arc::new(StaticRoster::new(roster(1)));
    let service = MatchService::new(roster, Arc::new(UnavailableStore));
    let mut m = service
        .start_x01(X01Config::new(StartScore::S101, 1, 1))
        .await
        .unwrap();
    finished_x01(&mut m);

    let handle = service.publish_x01(&m).unwrap();
    assert!(handle.await.is_ok());

    let lookup = service.recorded_match(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        lookup,
        DomainError::Infra(InfraErrorKind::StoreUnavailable, _)
    ));
}

#[tokio::test]
async fn recorded_matches_are_looked_up_by_id() {
    let (service, _) = service_with(1);
    let mut m = service
        .start_x01(X01Config::new(StartScore::S101, 1, 1))
        .await
        .unwrap();
    finished_x01(&mut m);
    let record = MatchRecord::from_x01(&m).unwrap();
    let id = record.id;

    let missing = service.recorded_match(id).await.unwrap_err();
    assert!(matches!(
        missing,
        DomainError::NotFound(NotFoundKind::Match, _)
    ));
    assert_eq!(
        scorekeeper::AppError::from(missing).body().code,
        "MATCH_NOT_FOUND"
    );

    service.publish_completed(record.clone()).await.unwrap();
    assert_eq!(service.recorded_match(id).await.unwrap(), record);
}
