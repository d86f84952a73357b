//! Digit-by-digit score entry.

use serde::{Deserialize, Serialize};

use crate::domain::rules::MAX_TURN_SCORE;
use crate::errors::domain::{DomainError, ValidationKind};

const MAX_DIGITS: usize = 3;

/// Pending numeric value built from keypad presses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    digits: String,
}

impl ScoreInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Rejected when it would exceed three digits or 180.
    pub fn press(&mut self, digit: u8) -> Result<u16, DomainError> {
        if digit > 9 {
            return Err(DomainError::validation(
                ValidationKind::InvalidDigit,
                format!("{digit} is not a single digit"),
            ));
        }
        if self.digits.len() >= MAX_DIGITS {
            return Err(DomainError::validation(
                ValidationKind::InvalidDigit,
                "a score has at most three digits",
            ));
        }
        // A leading zero is replaced rather than kept, so "0" then "5" reads 5.
        let candidate = if self.digits == "0" {
            digit.to_string()
        } else {
            format!("{}{}", self.digits, digit)
        };
        let value: u16 = candidate
            .parse()
            .map_err(|_| DomainError::validation(ValidationKind::InvalidDigit, "unparsable input"))?;
        if value > MAX_TURN_SCORE {
            return Err(DomainError::validation(
                ValidationKind::InvalidDigit,
                format!("{value} is above {MAX_TURN_SCORE}"),
            ));
        }
        self.digits = candidate;
        Ok(value)
    }

    /// Drop the last digit.
    pub fn delete(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn value(&self) -> Option<u16> {
        self.digits.parse().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Take the entered value and reset the buffer.
    pub fn take(&mut self) -> Option<u16> {
        let value = self.value();
        self.digits.clear();
        value
    }
}
