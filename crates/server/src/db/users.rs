//! `PostgreSQL` user and role store.
//!
//! Username lookups are exact matches; role name lookups are
//! case-insensitive, mirroring the category queries. A user's role is a
//! nullable reference resolved by name at insert time with no foreign key.

use sqlx::PgPool;
use tracing::{debug, instrument};

use super::RepositoryError;
use super::store::UserStore;
use crate::models::UserAccount;

/// `PostgreSQL`-backed user store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash)
    }

    async fn find_role(&self, username: &str) -> Result<Option<String>, RepositoryError> {
        let role = sqlx::query_scalar::<_, String>(
            r"
            SELECT r.name
            FROM users u
            JOIN roles r ON r.role_id = u.role_id
            WHERE u.username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    #[instrument(skip(self, password_hash))]
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query::<sqlx::Postgres>(
            r"
            INSERT INTO users (username, password_hash, role_id)
            VALUES ($1, $2, (SELECT role_id FROM roles WHERE name = $3))
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        debug!("Inserted user");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, username: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Deleted user");
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r"
            SELECT u.username, COALESCE(r.name, 'user') AS role
            FROM users u
            LEFT JOIN roles r ON r.role_id = u.role_id
            ORDER BY u.username
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(username, role)| UserAccount { username, role })
            .collect())
    }

    async fn list_roles(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    async fn role_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM roles WHERE name ILIKE $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn insert_role(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query::<sqlx::Postgres>("INSERT INTO roles (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("role name already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        debug!("Inserted role");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_role(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>("DELETE FROM roles WHERE name ILIKE $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Deleted role");
        Ok(result.rows_affected() > 0)
    }
}
