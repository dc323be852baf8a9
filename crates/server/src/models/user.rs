//! User domain types.

use serde::{Deserialize, Serialize};

/// A user account (domain type).
///
/// Password hashes never leave the access service; listings expose only the
/// username and resolved role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique username.
    pub username: String,
    /// Resolved role name, defaulting to "user".
    pub role: String,
}

/// The authenticated caller, as resolved by the Basic auth extractor.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Username presented in the Authorization header.
    pub username: String,
    /// Role resolved for that username.
    pub role: String,
}
