//! Error types for the validation engine

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of a day's pair carried the bad volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeField {
    Simulated,
    Real,
}

impl fmt::Display for VolumeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeField::Simulated => write!(f, "simulated"),
            VolumeField::Real => write!(f, "real"),
        }
    }
}

/// Validation engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Insufficient data: {found} valid numeric values, at least {required} required")]
    InsufficientData { found: usize, required: usize },

    #[error("Non-numeric entry at position {position}: '{token}'")]
    NonNumericEntry { position: usize, token: String },

    #[error("Invalid {field} volume for day {day}: {value}")]
    InvalidVolume {
        day: u32,
        field: VolumeField,
        value: f64,
    },

    #[error("Invalid error value: {0} (must be finite and non-negative)")]
    InvalidErrorValue(f64),

    #[error("Invalid day index: {0} (days are 1-based)")]
    InvalidDay(u32),

    #[error("Duplicate day index: {0}")]
    DuplicateDay(u32),
}

/// Payload-free classification of [`ValidationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    InsufficientData,
    NonNumericEntry,
    InvalidVolume,
    InvalidErrorValue,
    InvalidDay,
    DuplicateDay,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::InsufficientData { .. } => ValidationErrorKind::InsufficientData,
            ValidationError::NonNumericEntry { .. } => ValidationErrorKind::NonNumericEntry,
            ValidationError::InvalidVolume { .. } => ValidationErrorKind::InvalidVolume,
            ValidationError::InvalidErrorValue(_) => ValidationErrorKind::InvalidErrorValue,
            ValidationError::InvalidDay(_) => ValidationErrorKind::InvalidDay,
            ValidationError::DuplicateDay(_) => ValidationErrorKind::DuplicateDay,
        }
    }

    /// Whether this error belongs to a single day rather than a whole sample
    pub fn is_per_record(&self) -> bool {
        !matches!(
            self,
            ValidationError::InsufficientData { .. } | ValidationError::NonNumericEntry { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ValidationError>;
