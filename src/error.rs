//! Engine error taxonomy.
//!
//! Every externally reported failure carries a human-readable message and
//! none are process-fatal: the engine returns to a stable idle state after
//! any of them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required field was empty or otherwise unusable at creation time.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No dataset with the given id exists in the session collection.
    #[error("dataset {0} not found")]
    NotFound(u64),

    /// A protected value could not be decoded. Callers should treat the
    /// dataset as unreadable rather than guessing a value.
    #[error("malformed protected token: {0}")]
    MalformedToken(String),

    /// The ledger rejected a read or write. The in-memory mirror is not
    /// rolled back, so memory can run ahead of the ledger until the next
    /// successful load or save.
    #[error("ledger persistence failed: {0}")]
    Persistence(String),

    /// The reveal (or an identity-requiring mutation) was not authorized:
    /// signature rejected, verification failed, or no provider present.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
