//! Error codes for the scorekeeper.
//!
//! Every rejected operation maps to exactly one code. Add new codes here;
//! never pass ad-hoc strings as error codes. Codes are SCREAMING_SNAKE_CASE
//! and are what the replay binary prints in its error lines.

use core::fmt;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn validation
    /// Score above 180 or not reachable with three darts
    InvalidScore,
    /// Dart count not allowed for the pending prompt
    InvalidDartCount,
    /// Operation not allowed in the current match status
    PhaseMismatch,
    /// A dart-count prompt must be answered first
    CheckoutPending,
    /// No dart-count prompt is waiting
    NoPendingCheckout,
    /// Nothing to undo in the current leg
    NothingToUndo,
    /// Not a cricket number
    InvalidNumber,
    /// Number not selectable right now
    NumberNotAvailable,
    /// Mark count out of range
    InvalidMarks,
    /// Keypad digit rejected
    InvalidDigit,
    /// General validation error
    ValidationError,

    // Setup validation
    /// Configuration value rejected
    InvalidConfig,
    /// Roster has no players
    EmptyRoster,
    /// Player name is blank
    BlankPlayerName,
    /// Two players share a name
    DuplicatePlayerName,
    /// Two players share an id
    DuplicatePlayerId,

    // Resource Not Found
    MatchNotFound,

    // Conflicts
    MatchAlreadyRecorded,
    MatchNotComplete,

    // System Errors
    StoreUnavailable,
    RosterUnavailable,
    ConfigError,
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidScore => "INVALID_SCORE",
            Self::InvalidDartCount => "INVALID_DART_COUNT",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::CheckoutPending => "CHECKOUT_PENDING",
            Self::NoPendingCheckout => "NO_PENDING_CHECKOUT",
            Self::NothingToUndo => "NOTHING_TO_UNDO",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::NumberNotAvailable => "NUMBER_NOT_AVAILABLE",
            Self::InvalidMarks => "INVALID_MARKS",
            Self::InvalidDigit => "INVALID_DIGIT",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::InvalidConfig => "INVALID_CONFIG",
            Self::EmptyRoster => "EMPTY_ROSTER",
            Self::BlankPlayerName => "BLANK_PLAYER_NAME",
            Self::DuplicatePlayerName => "DUPLICATE_PLAYER_NAME",
            Self::DuplicatePlayerId => "DUPLICATE_PLAYER_ID",

            Self::MatchNotFound => "MATCH_NOT_FOUND",

            Self::MatchAlreadyRecorded => "MATCH_ALREADY_RECORDED",
            Self::MatchNotComplete => "MATCH_NOT_COMPLETE",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::RosterUnavailable => "ROSTER_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::InvalidScore => Self::InvalidScore,
            ValidationKind::InvalidDartCount => Self::InvalidDartCount,
            ValidationKind::PhaseMismatch => Self::PhaseMismatch,
            ValidationKind::CheckoutPending => Self::CheckoutPending,
            ValidationKind::NoPendingCheckout => Self::NoPendingCheckout,
            ValidationKind::NothingToUndo => Self::NothingToUndo,
            ValidationKind::InvalidNumber => Self::InvalidNumber,
            ValidationKind::NumberNotAvailable => Self::NumberNotAvailable,
            ValidationKind::InvalidMarks => Self::InvalidMarks,
            ValidationKind::InvalidConfig => Self::InvalidConfig,
            ValidationKind::InvalidDigit => Self::InvalidDigit,
            ValidationKind::EmptyRoster => Self::EmptyRoster,
            ValidationKind::BlankPlayerName => Self::BlankPlayerName,
            ValidationKind::DuplicatePlayerName => Self::DuplicatePlayerName,
            ValidationKind::DuplicatePlayerId => Self::DuplicatePlayerId,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => kind.into(),
            DomainError::Conflict(ConflictKind::MatchAlreadyRecorded, _) => {
                Self::MatchAlreadyRecorded
            }
            DomainError::Conflict(ConflictKind::MatchNotComplete, _) => Self::MatchNotComplete,
            DomainError::NotFound(NotFoundKind::Match, _) => Self::MatchNotFound,
            DomainError::Infra(InfraErrorKind::StoreUnavailable, _) => Self::StoreUnavailable,
            DomainError::Infra(InfraErrorKind::RosterUnavailable, _) => Self::RosterUnavailable,
        }
    }
}
