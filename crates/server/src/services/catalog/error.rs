use crate::db::RepositoryError;

/// Errors returned by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The caller supplied a value that fails validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No product or category matches the given keyword.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation would violate a uniqueness rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}
