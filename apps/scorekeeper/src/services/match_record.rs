//! Persistable result of a finished match.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::{CricketConfig, X01Config};
use crate::domain::cricket::CricketMatch;
use crate::domain::roster::PlayerProfile;
use crate::domain::state::Seat;
use crate::domain::stats::PlayerStats;
use crate::domain::x01::X01Match;
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    X01(X01Config),
    Cricket(CricketConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultDetail {
    X01 {
        legs_won: u16,
        sets_won: u8,
        stats: PlayerStats,
    },
    Cricket {
        points: u32,
        total_marks: u32,
        turns: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub seat: Seat,
    pub profile: PlayerProfile,
    pub won: bool,
    pub detail: ResultDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub variant: GameVariant,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub winner: PlayerProfile,
    pub players: Vec<PlayerResult>,
}

impl MatchRecord {
    pub fn from_x01(m: &X01Match) -> Result<Self, DomainError> {
        let winner = finished_winner(m.winner())?;
        let players = m
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerResult {
                seat,
                profile: p.profile.clone(),
                won: seat == winner,
                detail: ResultDetail::X01 {
                    legs_won: p.legs_won,
                    sets_won: p.sets_won,
                    stats: p.stats(),
                },
            })
            .collect::<Vec<_>>();
        Self::build(GameVariant::X01(*m.config()), winner, players)
    }

    pub fn from_cricket(m: &CricketMatch) -> Result<Self, DomainError> {
        let winner = finished_winner(m.winner())?;
        let players = m
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerResult {
                seat,
                profile: p.profile.clone(),
                won: seat == winner,
                detail: ResultDetail::Cricket {
                    points: p.points,
                    total_marks: p.total_marks,
                    turns: p.turns,
                },
            })
            .collect::<Vec<_>>();
        Self::build(GameVariant::Cricket(*m.config()), winner, players)
    }

    fn build(
        variant: GameVariant,
        winner: Seat,
        players: Vec<PlayerResult>,
    ) -> Result<Self, DomainError> {
        let winner = players
            .get(winner)
            .map(|p| p.profile.clone())
            .ok_or_else(|| DomainError::validation_other("Winner seat outside the roster"))?;
        Ok(Self {
            id: Uuid::new_v4(),
            variant,
            finished_at: OffsetDateTime::now_utc(),
            winner,
            players,
        })
    }
}

fn finished_winner(winner: Option<Seat>) -> Result<Seat, DomainError> {
    winner.ok_or_else(|| {
        DomainError::conflict(
            ConflictKind::MatchNotComplete,
            "Only finished matches can be recorded",
        )
    })
}
