use crate::db::RepositoryError;

/// Errors returned by access operations.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The caller supplied a value that fails validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied username/password pair does not authenticate.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The operation would violate a uniqueness rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
