//! In-memory store implementations.
//!
//! Intended for tests and local development. Not optimized for performance.
//! Matching semantics mirror the `PostgreSQL` stores: keyword lookups are
//! case-insensitive on name and exact on barcode, category and role name
//! lookups are case-insensitive, and uniqueness is enforced with exact
//! equality the way the unique indexes do.

use std::sync::RwLock;

use uuid::Uuid;

use stockroom_core::{CategoryId, ProductId};

use super::RepositoryError;
use super::store::{InventoryStore, UserStore};
use crate::models::{Product, StatusSummary, UserAccount};

fn lock_poisoned() -> RepositoryError {
    RepositoryError::DataCorruption("lock poisoned".to_owned())
}

fn matches_keyword(product: &Product, keyword: &str) -> bool {
    product.name.eq_ignore_ascii_case(keyword) || product.barcode.as_str() == keyword
}

fn resolve_category(categories: &[(CategoryId, String)], name: Option<&str>) -> Option<String> {
    let name = name?;
    categories
        .iter()
        .find(|(_, stored)| stored == name)
        .map(|(_, stored)| stored.clone())
}

#[derive(Debug, Default)]
struct InventoryData {
    products: Vec<(ProductId, Product)>,
    categories: Vec<(CategoryId, String)>,
}

/// In-memory inventory store.
#[derive(Debug, Default)]
pub struct MemoryInventoryStore {
    data: RwLock<InventoryData>,
}

impl MemoryInventoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn product_exists(&self, keyword: &str) -> Result<bool, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data.products.iter().any(|(_, p)| matches_keyword(p, keyword)))
    }

    async fn find_product(&self, keyword: &str) -> Result<Option<Product>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .products
            .iter()
            .find(|(_, p)| matches_keyword(p, keyword))
            .map(|(_, p)| p.clone()))
    }

    async fn find_product_entry(
        &self,
        keyword: &str,
    ) -> Result<Option<(ProductId, Product)>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .products
            .iter()
            .find(|(_, p)| matches_keyword(p, keyword))
            .map(|(id, p)| (*id, p.clone())))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut products: Vec<Product> = data.products.iter().map(|(_, p)| p.clone()).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;

        let collides = data
            .products
            .iter()
            .any(|(_, p)| p.name == product.name || p.barcode == product.barcode);
        if collides {
            return Err(RepositoryError::Conflict(
                "product name or barcode already exists".to_owned(),
            ));
        }

        let category = resolve_category(&data.categories, product.category.as_deref());
        let stored = Product {
            category,
            ..product.clone()
        };
        data.products.push((ProductId::new(Uuid::new_v4()), stored));
        Ok(())
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;

        let collides = data.products.iter().any(|(other, p)| {
            *other != id && (p.name == product.name || p.barcode == product.barcode)
        });
        if collides {
            return Err(RepositoryError::Conflict(
                "product name or barcode already exists".to_owned(),
            ));
        }

        let category = resolve_category(&data.categories, product.category.as_deref());
        match data.products.iter_mut().find(|(other, _)| *other == id) {
            Some((_, stored)) => {
                *stored = Product {
                    category,
                    ..product.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, keyword: &str) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        let before = data.products.len();
        data.products.retain(|(_, p)| !matches_keyword(p, keyword));
        Ok(data.products.len() < before)
    }

    async fn products_by_status(&self, status: &str) -> Result<Vec<Product>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut products: Vec<Product> = data
            .products
            .iter()
            .filter(|(_, p)| p.status == status)
            .map(|(_, p)| p.clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let term_lower = term.to_lowercase();
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut products: Vec<Product> = data
            .products
            .iter()
            .filter(|(_, p)| {
                p.name.to_lowercase().contains(&term_lower)
                    || p.status.to_lowercase().contains(&term_lower)
                    || p.category
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&term_lower))
                    || p.barcode.as_str() == term
            })
            .map(|(_, p)| p.clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn status_and_quantity(
        &self,
        keyword: &str,
    ) -> Result<Option<StatusSummary>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .products
            .iter()
            .find(|(_, p)| matches_keyword(p, keyword))
            .map(|(_, p)| StatusSummary {
                status: p.status.clone(),
                quantity: p.quantity,
            }))
    }

    async fn category_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .categories
            .iter()
            .any(|(_, stored)| stored.eq_ignore_ascii_case(name)))
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut names: Vec<String> = data.categories.iter().map(|(_, n)| n.clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn insert_category(&self, name: &str) -> Result<(), RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        if data.categories.iter().any(|(_, stored)| stored == name) {
            return Err(RepositoryError::Conflict(
                "category name already exists".to_owned(),
            ));
        }
        data.categories
            .push((CategoryId::new(Uuid::new_v4()), name.to_owned()));
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        let before = data.categories.len();
        data.categories
            .retain(|(_, stored)| !stored.eq_ignore_ascii_case(name));
        Ok(data.categories.len() < before)
    }

    async fn find_category_id(&self, name: &str) -> Result<Option<CategoryId>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .categories
            .iter()
            .find(|(_, stored)| stored.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id))
    }

    async fn rename_category(
        &self,
        id: CategoryId,
        new_name: &str,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        if data
            .categories
            .iter()
            .any(|(other, stored)| *other != id && stored == new_name)
        {
            return Err(RepositoryError::Conflict(
                "category name already exists".to_owned(),
            ));
        }
        match data.categories.iter_mut().find(|(other, _)| *other == id) {
            Some((_, stored)) => {
                *stored = new_name.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredUser {
    username: String,
    password_hash: String,
    role: Option<Uuid>,
}

#[derive(Debug, Default)]
struct AccessData {
    users: Vec<StoredUser>,
    roles: Vec<(Uuid, String)>,
}

impl AccessData {
    /// Role names resolve at read time, like the role id join in the
    /// `PostgreSQL` store. A deleted role leaves user references dangling.
    fn role_name(&self, id: Option<Uuid>) -> Option<String> {
        let id = id?;
        self.roles
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, name)| name.clone())
    }
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    data: RwLock<AccessData>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn find_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<String>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.password_hash.clone()))
    }

    async fn find_role(&self, username: &str) -> Result<Option<String>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data
            .users
            .iter()
            .find(|u| u.username == username)
            .and_then(|u| data.role_name(u.role)))
    }

    async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<(), RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        if data.users.iter().any(|u| u.username == username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        let resolved = data
            .roles
            .iter()
            .find(|(_, stored)| stored == role)
            .map(|(id, _)| *id);
        data.users.push(StoredUser {
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            role: resolved,
        });
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        let before = data.users.len();
        data.users.retain(|u| u.username != username);
        Ok(data.users.len() < before)
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut accounts: Vec<UserAccount> = data
            .users
            .iter()
            .map(|u| UserAccount {
                username: u.username.clone(),
                role: data.role_name(u.role).unwrap_or_else(|| "user".to_owned()),
            })
            .collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }

    async fn list_roles(&self) -> Result<Vec<String>, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        let mut names: Vec<String> = data.roles.iter().map(|(_, n)| n.clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn role_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let data = self.data.read().map_err(|_| lock_poisoned())?;
        Ok(data.roles.iter().any(|(_, r)| r.eq_ignore_ascii_case(name)))
    }

    async fn insert_role(&self, name: &str) -> Result<(), RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        if data.roles.iter().any(|(_, r)| r == name) {
            return Err(RepositoryError::Conflict(
                "role name already exists".to_owned(),
            ));
        }
        data.roles.push((Uuid::new_v4(), name.to_owned()));
        Ok(())
    }

    async fn delete_role(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().map_err(|_| lock_poisoned())?;
        let before = data.roles.len();
        data.roles.retain(|(_, r)| !r.eq_ignore_ascii_case(name));
        Ok(data.roles.len() < before)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stockroom_core::Barcode;

    fn product(name: &str, barcode: &str, category: Option<&str>) -> Product {
        Product {
            name: name.to_owned(),
            barcode: Barcode::parse(barcode).unwrap(),
            price: 100,
            quantity: 5,
            status: "In Stock".to_owned(),
            category: category.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn keyword_matches_name_case_insensitively_and_barcode_exactly() {
        let store = MemoryInventoryStore::new();
        store
            .insert_product(&product("Monitor", "113456789089", None))
            .await
            .unwrap();

        assert!(store.product_exists("monitor").await.unwrap());
        assert!(store.product_exists("MONITOR").await.unwrap());
        assert!(store.product_exists("113456789089").await.unwrap());
        assert!(!store.product_exists("1134567890").await.unwrap());
    }

    #[tokio::test]
    async fn insert_stores_null_for_unknown_category() {
        let store = MemoryInventoryStore::new();
        store.insert_category("Electronics").await.unwrap();
        store
            .insert_product(&product("TV", "123456789012", Some("Appliances")))
            .await
            .unwrap();

        let stored = store.find_product("TV").await.unwrap().unwrap();
        assert_eq!(stored.category, None);
    }

    #[tokio::test]
    async fn insert_keeps_resolved_category() {
        let store = MemoryInventoryStore::new();
        store.insert_category("Electronics").await.unwrap();
        store
            .insert_product(&product("TV", "123456789012", Some("Electronics")))
            .await
            .unwrap();

        let stored = store.find_product("TV").await.unwrap().unwrap();
        assert_eq!(stored.category.as_deref(), Some("Electronics"));
    }

    #[tokio::test]
    async fn list_users_defaults_missing_role() {
        let store = MemoryUserStore::new();
        store.insert_user("alice", "hash", "ghost-role").await.unwrap();

        let accounts = store.list_users().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].role, "user");
    }

    #[tokio::test]
    async fn deleting_a_role_dangles_user_references() {
        let store = MemoryUserStore::new();
        store.insert_role("admin").await.unwrap();
        store.insert_user("alice", "hash", "admin").await.unwrap();
        assert_eq!(
            store.find_role("alice").await.unwrap().as_deref(),
            Some("admin")
        );

        assert!(store.delete_role("admin").await.unwrap());
        assert_eq!(store.find_role("alice").await.unwrap(), None);

        // Re-creating the role mints a fresh id, so the old reference
        // stays dangling.
        store.insert_role("admin").await.unwrap();
        assert_eq!(store.find_role("alice").await.unwrap(), None);
    }
}
