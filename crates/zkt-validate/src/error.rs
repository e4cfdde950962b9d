//! Error types for field validation.

use thiserror::Error;

/// A rejected input. Each variant carries the offending value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error(
        "invalid zakat ID format {value:?}. Expected format: ZKT-YDSF-{{MLG|JTM}}-YYYYMM-NNNN \
         (e.g., ZKT-YDSF-MLG-202311-0001)"
    )]
    InvalidFormat { value: String },

    #[error(
        "invalid timestamp format {value:?}. Expected ISO 8601 format (e.g., 2023-11-28T12:00:00Z)"
    )]
    InvalidTimestamp { value: String },

    #[error("invalid zakat type {value:?}. Must be either 'fitrah' or 'maal'")]
    InvalidKind { value: String },

    #[error("invalid amount {value}. Must be greater than 0")]
    InvalidAmount { value: f64 },

    #[error("invalid distribution amount {value}. Must be between 0 and {available}")]
    InvalidDistribution { value: f64, available: f64 },

    #[error("invalid organization {value:?}: {reason}")]
    InvalidOrganization { value: String, reason: String },

    #[error("invalid status {value:?}. Must be either 'collected' or 'distributed'")]
    InvalidStatus { value: String },
}

/// Convenience type alias for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;
