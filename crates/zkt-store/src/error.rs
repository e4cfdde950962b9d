/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The backend does not implement the requested operation.
    #[error("operation not supported by this store: {0}")]
    Unsupported(&'static str),

    /// The backend failed for a reason of its own (I/O, RPC, ...).
    #[error("backend error: {0}")]
    Backend(String),

    /// Serialization or deserialization failure (snapshots).
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
