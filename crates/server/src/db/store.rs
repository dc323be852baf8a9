//! Store contracts consumed by the catalog and access services.
//!
//! Two backends implement these traits: the `PostgreSQL` repositories in
//! [`inventory`](crate::db::inventory) and [`users`](crate::db::users), and
//! the in-memory doubles in [`memory`](crate::db::memory).
//!
//! A `keyword` parameter matches a product by name (case-insensitive) or by
//! barcode (exact). Stores perform no validation; that is service policy.

use stockroom_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{Product, StatusSummary, UserAccount};

/// Persistence operations for products and categories.
///
/// All methods return [`RepositoryError`] when the underlying store fails;
/// absence of a matching row is reported through `Option` or `bool`.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    /// Whether any product matches the keyword.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn product_exists(&self, keyword: &str) -> Result<bool, RepositoryError>;

    /// Fetch the product matching the keyword, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails or the stored
    /// data cannot be decoded.
    async fn find_product(&self, keyword: &str) -> Result<Option<Product>, RepositoryError>;

    /// Resolve the keyword to a product id and its current fields in a
    /// single read, if any product matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails or the stored
    /// data cannot be decoded.
    async fn find_product_entry(
        &self,
        keyword: &str,
    ) -> Result<Option<(ProductId, Product)>, RepositoryError>;

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Insert a product. The category name is resolved against the
    /// categories table; an unresolved reference is stored as null.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation, or
    /// `RepositoryError` for any other store failure.
    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Overwrite the product addressed by id with the given fields.
    /// Returns false when no row has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation, or
    /// `RepositoryError` for any other store failure.
    async fn update_product(&self, id: ProductId, product: &Product)
    -> Result<bool, RepositoryError>;

    /// Delete the product matching the keyword. Returns false when nothing
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn delete_product(&self, keyword: &str) -> Result<bool, RepositoryError>;

    /// List products whose status equals the given value exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn products_by_status(&self, status: &str) -> Result<Vec<Product>, RepositoryError>;

    /// List products whose name, status, or category name contains the term
    /// (case-insensitive), or whose barcode equals it exactly. An empty term
    /// matches every product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, RepositoryError>;

    /// Fetch the status/quantity pair for the product matching the keyword.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn status_and_quantity(
        &self,
        keyword: &str,
    ) -> Result<Option<StatusSummary>, RepositoryError>;

    /// Whether a category with this name exists (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn category_exists(&self, name: &str) -> Result<bool, RepositoryError>;

    /// List every category name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError>;

    /// Insert a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation, or
    /// `RepositoryError` for any other store failure.
    async fn insert_category(&self, name: &str) -> Result<(), RepositoryError>;

    /// Delete the category matching the name (case-insensitive). Returns
    /// false when nothing matched. Products keep their stored category name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn delete_category(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Resolve a category name (case-insensitive) to its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn find_category_id(&self, name: &str) -> Result<Option<CategoryId>, RepositoryError>;

    /// Rename the category addressed by id. Returns false when no row has
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation, or
    /// `RepositoryError` for any other store failure.
    async fn rename_category(
        &self,
        id: CategoryId,
        new_name: &str,
    ) -> Result<bool, RepositoryError>;
}

/// Persistence operations for users and roles.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the stored password hash for the username (exact match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn find_password_hash(&self, username: &str)
    -> Result<Option<String>, RepositoryError>;

    /// Fetch the role name for the username, if the user exists and its
    /// role reference resolves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn find_role(&self, username: &str) -> Result<Option<String>, RepositoryError>;

    /// Insert a user referencing the role by name. An unresolved role is
    /// stored as null.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the username is taken, or
    /// `RepositoryError` for any other store failure.
    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<(), RepositoryError>;

    /// Delete the user by username. Returns false when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn delete_user(&self, username: &str) -> Result<bool, RepositoryError>;

    /// List every account with its resolved role name (defaulting to
    /// "user" where the role reference dangles).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn list_users(&self) -> Result<Vec<UserAccount>, RepositoryError>;

    /// List every role name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn list_roles(&self) -> Result<Vec<String>, RepositoryError>;

    /// Whether a role with this name exists (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn role_exists(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Insert a role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation, or
    /// `RepositoryError` for any other store failure.
    async fn insert_role(&self, name: &str) -> Result<(), RepositoryError>;

    /// Delete the role matching the name (case-insensitive). Returns false
    /// when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    async fn delete_role(&self, name: &str) -> Result<bool, RepositoryError>;
}
