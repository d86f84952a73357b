//! Scripted replay: drive an engine from a JSON action list.
//!
//! A script names a roster, a game variant and a list of actions. Each action
//! produces one output line: the engine event, or the error it was rejected
//! with. Rejections do not stop the replay.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::env::{cricket_from_env, x01_from_env};
use crate::config::{CricketConfig, X01Config};
use crate::domain::cricket::{CricketEvent, CricketMatch};
use crate::domain::roster::PlayerProfile;
use crate::domain::x01::{X01Event, X01Match};
use crate::error::{AppError, ErrorBody};
use crate::errors::domain::DomainError;
use crate::services::match_record::GameVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub roster: Vec<PlayerProfile>,
    pub game: GameSpec,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Variant to play; a `null` config falls back to the `DARTS_*` environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSpec {
    X01(Option<X01Config>),
    Cricket(Option<CricketConfig>),
}

impl GameSpec {
    pub fn resolve(self) -> Result<GameVariant, AppError> {
        Ok(match self {
            GameSpec::X01(Some(config)) => GameVariant::X01(config),
            GameSpec::X01(None) => GameVariant::X01(x01_from_env()?),
            GameSpec::Cricket(Some(config)) => GameVariant::Cricket(config),
            GameSpec::Cricket(None) => GameVariant::Cricket(cricket_from_env()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Submit { score: u16 },
    Confirm { darts: u8 },
    ConfirmCheckout { darts: u8, at_double: u8 },
    Undo,
    NextLeg,
    Select { number: u8 },
    Mark,
    Unmark,
    Commit,
    Record { number: u8, marks: u8 },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Submit { .. } => "submit",
            Action::Confirm { .. } => "confirm",
            Action::ConfirmCheckout { .. } => "confirm_checkout",
            Action::Undo => "undo",
            Action::NextLeg => "next_leg",
            Action::Select { .. } => "select",
            Action::Mark => "mark",
            Action::Unmark => "unmark",
            Action::Commit => "commit",
            Action::Record { .. } => "record",
        }
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplayLine {
    X01(X01Event),
    Cricket(CricketEvent),
    Rejected { step: usize, error: ErrorBody },
}

enum Engine {
    X01(X01Match),
    Cricket(CricketMatch),
}

impl Engine {
    fn apply(&mut self, action: Action) -> Result<ReplayLine, DomainError> {
        match self {
            Engine::X01(m) => {
                let event = match action {
                    Action::Submit { score } => m.submit_score(score),
                    Action::Confirm { darts } => m.confirm_darts_used(darts),
                    Action::ConfirmCheckout { darts, at_double } => {
                        m.confirm_checkout(darts, at_double)
                    }
                    Action::Undo => m.undo(),
                    Action::NextLeg => m.start_next_leg(),
                    other => Err(not_applicable(other, "x01")),
                }?;
                Ok(ReplayLine::X01(event))
            }
            Engine::Cricket(m) => {
                let event = match action {
                    Action::Select { number } => m.select_number(number),
                    Action::Mark => m.add_mark(),
                    Action::Unmark => m.remove_mark(),
                    Action::Commit => m.commit_turn(),
                    Action::Record { number, marks } => m.record_marks(number, marks),
                    other => Err(not_applicable(other, "cricket")),
                }?;
                Ok(ReplayLine::Cricket(event))
            }
        }
    }
}

fn not_applicable(action: Action, variant: &str) -> DomainError {
    DomainError::validation_other(format!(
        "'{}' does not apply to a {variant} match",
        action.name()
    ))
}

pub fn load_script(path: &Path) -> Result<Script, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Run every action. Setup problems (bad roster or config) fail the whole
/// replay; rejected actions become `Rejected` lines.
pub fn run_script(script: &Script) -> Result<Vec<ReplayLine>, AppError> {
    let roster = script.roster.clone();
    let mut engine = match script.game.resolve()? {
        GameVariant::X01(config) => Engine::X01(X01Match::new(config, roster)?),
        GameVariant::Cricket(config) => Engine::Cricket(CricketMatch::new(config, roster)?),
    };
    info!(actions = script.actions.len(), "Replaying script");

    let lines = script
        .actions
        .iter()
        .enumerate()
        .map(|(step, action)| {
            engine.apply(*action).unwrap_or_else(|err| {
                debug!(step, action = action.name(), error = %err, "Action rejected");
                ReplayLine::Rejected {
                    step,
                    error: AppError::from(err).body(),
                }
            })
        })
        .collect();
    Ok(lines)
}
