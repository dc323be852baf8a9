//! User credentials, registration, and roles.
//!
//! Credential checks return a plain boolean: a missing user and a wrong
//! password produce the same result, so callers get no username-enumeration
//! signal.

pub mod error;
pub mod hash;

pub use error::AccessError;
pub use hash::{PasswordHasher, Sha256Hasher};

use tracing::instrument;

use crate::db::RepositoryError;
use crate::db::store::UserStore;
use crate::models::UserAccount;

/// Role assigned when none is requested or resolved.
pub const DEFAULT_ROLE: &str = "user";

/// User and role operations over a user store.
///
/// Holds no state beyond the store and hasher handles; handlers construct
/// one per request.
pub struct AccessService<S, H> {
    store: S,
    hasher: H,
}

impl<S: UserStore, H: PasswordHasher> AccessService<S, H> {
    /// Create a new access service over the given store and hasher.
    #[must_use]
    pub const fn new(store: S, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// Whether the username/password pair authenticates.
    ///
    /// Returns false for a missing user, an empty stored hash, and a
    /// mismatched password alike.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if the store call fails.
    pub async fn check_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AccessError> {
        let Some(stored) = self.store.find_password_hash(username).await? else {
            return Ok(false);
        };
        if stored.is_empty() {
            return Ok(false);
        }
        Ok(self.hasher.hash(password) == stored)
    }

    /// Hash the password and insert a new user referencing the role by
    /// name. An unresolved role is stored as a null reference.
    ///
    /// No uniqueness pre-check runs here; the store's unique constraint is
    /// the only backstop.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::InvalidArgument` when the username or password
    /// is empty, `AccessError::Conflict` when the username is taken, or
    /// `AccessError::Storage` if the store call fails.
    #[instrument(skip(self, password))]
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<(), AccessError> {
        if username.is_empty() {
            return Err(AccessError::InvalidArgument(
                "username cannot be empty".to_owned(),
            ));
        }
        if password.is_empty() {
            return Err(AccessError::InvalidArgument(
                "password cannot be empty".to_owned(),
            ));
        }

        let password_hash = self.hasher.hash(password);
        self.store
            .insert_user(username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(message) => AccessError::Conflict(message),
                other => AccessError::Storage(other),
            })
    }

    /// Fetch the role for the username, defaulting to "user" when no role
    /// resolves.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if the store call fails.
    pub async fn user_role(&self, username: &str) -> Result<String, AccessError> {
        Ok(self
            .store
            .find_role(username)
            .await?
            .unwrap_or_else(|| DEFAULT_ROLE.to_owned()))
    }

    /// Delete the user after re-authenticating the given credentials.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::InvalidCredentials` when the pair does not
    /// authenticate, or `AccessError::Storage` if a store call fails.
    #[instrument(skip(self, password))]
    pub async fn delete_user(&self, username: &str, password: &str) -> Result<bool, AccessError> {
        if !self.check_user_credentials(username, password).await? {
            return Err(AccessError::InvalidCredentials);
        }
        Ok(self.store.delete_user(username).await?)
    }

    /// List every account with its resolved role.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if the store call fails.
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, AccessError> {
        Ok(self.store.list_users().await?)
    }

    /// Whether a role with this name exists (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if the store call fails.
    pub async fn role_exists(&self, name: &str) -> Result<bool, AccessError> {
        Ok(self.store.role_exists(name).await?)
    }

    /// List every role name.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if the store call fails.
    pub async fn list_roles(&self) -> Result<Vec<String>, AccessError> {
        Ok(self.store.list_roles().await?)
    }

    /// Insert a new role.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::InvalidArgument` when the name is empty,
    /// `AccessError::Conflict` when the name is already taken
    /// (case-insensitive), or `AccessError::Storage` if a store call fails.
    #[instrument(skip(self))]
    pub async fn add_role(&self, name: &str) -> Result<(), AccessError> {
        if name.is_empty() {
            return Err(AccessError::InvalidArgument(
                "role name cannot be empty".to_owned(),
            ));
        }
        if self.store.role_exists(name).await? {
            return Err(AccessError::Conflict(format!(
                "role '{name}' already exists"
            )));
        }

        self.store.insert_role(name).await.map_err(|e| match e {
            RepositoryError::Conflict(message) => AccessError::Conflict(message),
            other => AccessError::Storage(other),
        })
    }

    /// Delete the role matching the name (case-insensitive).
    ///
    /// An empty name is a silent no-op, not an error. Users referencing the
    /// role fall back to the default at read time.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Storage` if a store call fails.
    #[instrument(skip(self))]
    pub async fn delete_role(&self, name: &str) -> Result<bool, AccessError> {
        if name.is_empty() {
            return Ok(false);
        }
        if !self.store.role_exists(name).await? {
            return Ok(false);
        }
        Ok(self.store.delete_role(name).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;

    fn service() -> AccessService<MemoryUserStore, Sha256Hasher> {
        AccessService::new(MemoryUserStore::new(), Sha256Hasher)
    }

    #[tokio::test]
    async fn credentials_check_is_enumeration_safe() {
        let access = service();
        access
            .register_user("alice", "correct horse", DEFAULT_ROLE)
            .await
            .unwrap();

        let missing_user = access
            .check_user_credentials("bob", "whatever")
            .await
            .unwrap();
        let wrong_password = access
            .check_user_credentials("alice", "battery staple")
            .await
            .unwrap();
        assert_eq!(missing_user, wrong_password);
        assert!(!missing_user);
    }

    #[tokio::test]
    async fn registered_credentials_authenticate() {
        let access = service();
        access
            .register_user("alice", "correct horse", DEFAULT_ROLE)
            .await
            .unwrap();

        assert!(
            access
                .check_user_credentials("alice", "correct horse")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn usernames_match_exactly() {
        let access = service();
        access.register_user("alice", "pw", DEFAULT_ROLE).await.unwrap();

        assert!(!access.check_user_credentials("Alice", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn register_user_rejects_empty_fields() {
        let access = service();

        assert!(matches!(
            access.register_user("", "pw", DEFAULT_ROLE).await.unwrap_err(),
            AccessError::InvalidArgument(_)
        ));
        assert!(matches!(
            access
                .register_user("alice", "", DEFAULT_ROLE)
                .await
                .unwrap_err(),
            AccessError::InvalidArgument(_)
        ));
    }

    #[tokio::test]
    async fn registering_a_taken_username_fails_conflict() {
        let access = service();
        access.register_user("alice", "pw", DEFAULT_ROLE).await.unwrap();

        let err = access
            .register_user("alice", "other", DEFAULT_ROLE)
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Conflict(_)));
    }

    #[tokio::test]
    async fn user_role_defaults_when_nothing_resolves() {
        let access = service();
        // "auditor" was never created, so the stored reference is null.
        access.register_user("alice", "pw", "auditor").await.unwrap();

        assert_eq!(access.user_role("alice").await.unwrap(), "user");
        assert_eq!(access.user_role("ghost").await.unwrap(), "user");
    }

    #[tokio::test]
    async fn user_role_resolves_an_existing_role() {
        let access = service();
        access.add_role("admin").await.unwrap();
        access.register_user("alice", "pw", "admin").await.unwrap();

        assert_eq!(access.user_role("alice").await.unwrap(), "admin");
    }

    #[tokio::test]
    async fn delete_user_requires_valid_credentials() {
        let access = service();
        access.register_user("alice", "pw", DEFAULT_ROLE).await.unwrap();

        let err = access.delete_user("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidCredentials));

        assert!(access.delete_user("alice", "pw").await.unwrap());
        assert!(!access.check_user_credentials("alice", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn list_users_returns_usernames_with_resolved_roles() {
        let access = service();
        access.add_role("admin").await.unwrap();
        access.register_user("alice", "pw", "admin").await.unwrap();
        access.register_user("bob", "pw", DEFAULT_ROLE).await.unwrap();

        let users = access.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.contains(&UserAccount {
            username: "alice".to_owned(),
            role: "admin".to_owned(),
        }));
        assert!(users.contains(&UserAccount {
            username: "bob".to_owned(),
            role: "user".to_owned(),
        }));
    }

    #[tokio::test]
    async fn add_role_rejects_an_empty_name() {
        let access = service();
        let err = access.add_role("").await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn add_role_fails_conflict_case_insensitively() {
        let access = service();
        access.add_role("Admin").await.unwrap();

        let err = access.add_role("ADMIN").await.unwrap_err();
        assert!(matches!(err, AccessError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_role_is_a_silent_no_op_for_empty_or_absent_names() {
        let access = service();
        assert!(!access.delete_role("").await.unwrap());
        assert!(!access.delete_role("ghost").await.unwrap());

        access.add_role("auditor").await.unwrap();
        assert!(access.delete_role("AUDITOR").await.unwrap());
        assert!(access.list_roles().await.unwrap().is_empty());
    }
}
