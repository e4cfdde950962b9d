use thiserror::Error;

/// Errors produced while parsing or decoding foundation types.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid record id {0:?}: expected ZKT-YDSF-{{MLG|JTM}}-YYYYMM-NNNN")]
    InvalidRecordId(String),

    #[error("invalid zakat kind {0:?}")]
    InvalidKind(String),

    #[error("invalid organization {0:?}")]
    InvalidOrganization(String),

    #[error("invalid organization code {0:?}")]
    InvalidOrgCode(String),

    #[error("invalid status {0:?}")]
    InvalidStatus(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("inconsistent record {id}: {reason}")]
    InconsistentRecord { id: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Rejections from the collected → distributed transition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("zakat transaction {0} has already been distributed")]
    AlreadyDistributed(String),

    #[error("distribution amount {requested} exceeds available amount {available}")]
    AmountExceeded { requested: f64, available: f64 },
}
