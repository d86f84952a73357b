//! Domain-level error type used by the engines, setup validation and services.
//!
//! Engines never panic on caller input: every rejected operation comes back as
//! a `DomainError` with state untouched. A bust is not an error; it is a
//! regular transition reported by the X01 engine.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds for rejected inputs and rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Score above 180 or not reachable with three darts.
    InvalidScore,
    /// Dart count outside the allowed range for the pending prompt.
    InvalidDartCount,
    /// Operation not allowed in the current match status.
    PhaseMismatch,
    /// A dart-count prompt must be answered first.
    CheckoutPending,
    /// No dart-count prompt is waiting for an answer.
    NoPendingCheckout,
    /// Undo requested with nothing undoable in the current leg.
    NothingToUndo,
    /// Not one of 20..=15 or Bull.
    InvalidNumber,
    /// Number not selectable for the active player right now.
    NumberNotAvailable,
    /// Mark count outside 1..=9.
    InvalidMarks,
    /// Rejected configuration value.
    InvalidConfig,
    /// Keypad digit rejected.
    InvalidDigit,
    EmptyRoster,
    BlankPlayerName,
    DuplicatePlayerName,
    DuplicatePlayerId,
    Other(String),
}

/// Infra error kinds for collaborator failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    StoreUnavailable,
    RosterUnavailable,
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
}

/// Domain-level conflict kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    MatchAlreadyRecorded,
    MatchNotComplete,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Collaborator failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}
