use zkt_store::StoreError;
use zkt_validate::ValidationError;

/// Errors produced by contract operations.
///
/// Validation failures are recoverable by the caller supplying corrected
/// input; store and decode failures end the current invocation and are not
/// retried here.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("the zakat {id} already exists")]
    AlreadyExists { id: String },

    #[error("initial zakat {id} already exists")]
    AlreadyInitialized { id: String },

    #[error("zakat transaction {id} has already been distributed")]
    AlreadyDistributed { id: String },

    #[error("distribution amount {requested} exceeds available amount {available} for zakat {id}")]
    AmountExceeded {
        id: String,
        requested: f64,
        available: f64,
    },

    #[error("the zakat transaction {id} does not exist")]
    NotFound { id: String },

    #[error("failed to read from world state: {0}")]
    StoreRead(#[source] StoreError),

    #[error("failed to write to world state: {0}")]
    Store(#[source] StoreError),

    #[error("failed to scan world state: {0}")]
    Scan(#[source] StoreError),

    #[error("failed to decode stored zakat {key}: {reason}")]
    Deserialization { key: String, reason: String },

    #[error("failed to encode zakat: {0}")]
    Serialization(String),

    #[error("invalid initial zakat: {0}")]
    InternalValidation(#[source] ValidationError),

    #[error("zakat {id} changed during the transaction; retry")]
    WriteConflict { id: String },
}

/// Stable, payload-free classification of a [`ContractError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFormat,
    InvalidTimestamp,
    InvalidKind,
    InvalidAmount,
    InvalidDistribution,
    InvalidOrganization,
    InvalidStatus,
    AlreadyExists,
    AlreadyInitialized,
    AlreadyDistributed,
    AmountExceeded,
    NotFound,
    StoreReadError,
    StoreError,
    ScanError,
    DeserializationError,
    SerializationError,
    InternalValidation,
    WriteConflict,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(v) => validation_kind(v),
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::AlreadyInitialized { .. } => ErrorKind::AlreadyInitialized,
            Self::AlreadyDistributed { .. } => ErrorKind::AlreadyDistributed,
            Self::AmountExceeded { .. } => ErrorKind::AmountExceeded,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::StoreRead(_) => ErrorKind::StoreReadError,
            Self::Store(_) => ErrorKind::StoreError,
            Self::Scan(_) => ErrorKind::ScanError,
            Self::Deserialization { .. } => ErrorKind::DeserializationError,
            Self::Serialization(_) => ErrorKind::SerializationError,
            Self::InternalValidation(_) => ErrorKind::InternalValidation,
            Self::WriteConflict { .. } => ErrorKind::WriteConflict,
        }
    }

    /// The underlying field failure, for both caller input and seed records.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(v) | Self::InternalValidation(v) => Some(v),
            _ => None,
        }
    }
}

fn validation_kind(err: &ValidationError) -> ErrorKind {
    match err {
        ValidationError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
        ValidationError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
        ValidationError::InvalidKind { .. } => ErrorKind::InvalidKind,
        ValidationError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
        ValidationError::InvalidDistribution { .. } => ErrorKind::InvalidDistribution,
        ValidationError::InvalidOrganization { .. } => ErrorKind::InvalidOrganization,
        ValidationError::InvalidStatus { .. } => ErrorKind::InvalidStatus,
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
