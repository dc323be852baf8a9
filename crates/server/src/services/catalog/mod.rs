//! Product and category management.
//!
//! All product operations address records through a keyword, which matches
//! the product name case-insensitively or the barcode exactly. Validation
//! runs before any store access, and each conflict or not-found outcome is
//! decided by a single existence query. Keyword resolution and the write
//! that follows it are separate store calls with no transaction between
//! them; a concurrent delete in that window surfaces as a false result.

pub mod error;

pub use error::CatalogError;

use tracing::instrument;

use stockroom_core::Barcode;

use crate::db::RepositoryError;
use crate::db::store::InventoryStore;
use crate::models::{NewProduct, Product, ProductPatch, StatusSummary};

/// Product and category operations over an inventory store.
///
/// Holds no state beyond the store handle; handlers construct one per
/// request.
pub struct CatalogService<S> {
    store: S,
}

impl<S: InventoryStore> CatalogService<S> {
    /// Create a new catalog service over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether any product matches the keyword.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn product_exists(&self, keyword: &str) -> Result<bool, CatalogError> {
        Ok(self.store.product_exists(keyword).await?)
    }

    /// Fetch the product matching the keyword.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if nothing matches, or
    /// `CatalogError::Storage` if the store call fails.
    pub async fn get_product(&self, keyword: &str) -> Result<Product, CatalogError> {
        if !self.store.product_exists(keyword).await? {
            return Err(product_not_found(keyword));
        }
        // A concurrent delete between the existence check and the read also
        // surfaces as NotFound.
        self.store
            .find_product(keyword)
            .await?
            .ok_or_else(|| product_not_found(keyword))
    }

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.list_products().await?)
    }

    /// Validate and insert a new product.
    ///
    /// The returned value is the validated input, not a re-read: its
    /// category is the name the caller supplied even when that name did not
    /// resolve at write time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` when a field fails
    /// validation, `CatalogError::Conflict` when the name or barcode is
    /// already taken, or `CatalogError::Storage` if a store call fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let product = validate_new_product(input)?;

        if self.store.product_exists(&product.name).await? {
            return Err(CatalogError::Conflict(format!(
                "a product named '{}' already exists",
                product.name
            )));
        }
        if self.store.product_exists(product.barcode.as_str()).await? {
            return Err(CatalogError::Conflict(format!(
                "a product with barcode '{}' already exists",
                product.barcode
            )));
        }

        self.store
            .insert_product(&product)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(message) => CatalogError::Conflict(message),
                other => CatalogError::Storage(other),
            })?;

        Ok(product)
    }

    /// Apply a partial update to the product matching the keyword.
    ///
    /// The keyword is resolved to a store identifier once; the merged
    /// fields are then written in a single update addressed by that
    /// identifier, since the keyword itself may change as part of the
    /// update. Returns the store's own result: false means the row vanished
    /// between resolution and the write.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the keyword does not resolve,
    /// `CatalogError::InvalidArgument` when a patched value fails
    /// validation, `CatalogError::Conflict` when a patched name or barcode
    /// is already taken, or `CatalogError::Storage` if a store call fails.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        keyword: &str,
        patch: ProductPatch,
    ) -> Result<bool, CatalogError> {
        let Some((id, stored)) = self.store.find_product_entry(keyword).await? else {
            return Err(product_not_found(keyword));
        };

        // An all-unset patch leaves the record untouched.
        if patch.is_empty() {
            return Ok(true);
        }

        let merged = merge_patch(stored, patch)?;
        self.store
            .update_product(id, &merged)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(message) => CatalogError::Conflict(message),
                other => CatalogError::Storage(other),
            })
    }

    /// Delete the product matching the keyword.
    ///
    /// Deletion is unconditional once existence is confirmed; nothing
    /// checks for dependent records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if nothing matches, or
    /// `CatalogError::Storage` if a store call fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, keyword: &str) -> Result<bool, CatalogError> {
        if !self.store.product_exists(keyword).await? {
            return Err(product_not_found(keyword));
        }
        Ok(self.store.delete_product(keyword).await?)
    }

    /// List products whose name, status, or category name contains the
    /// keyword (case-insensitive), or whose barcode equals it exactly.
    ///
    /// An empty keyword returns the full listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.search_products(keyword).await?)
    }

    /// List products whose status equals the given value exactly.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn products_by_status(&self, status: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.products_by_status(status).await?)
    }

    /// Fetch the status/quantity pair for the product matching the keyword,
    /// or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn product_status(
        &self,
        keyword: &str,
    ) -> Result<Option<StatusSummary>, CatalogError> {
        Ok(self.store.status_and_quantity(keyword).await?)
    }

    /// Whether a category with this name exists (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn category_exists(&self, name: &str) -> Result<bool, CatalogError> {
        Ok(self.store.category_exists(name).await?)
    }

    /// List every category name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the store call fails.
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.store.list_categories().await?)
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` when the name is empty,
    /// `CatalogError::Conflict` when the name is already taken
    /// (case-insensitive), or `CatalogError::Storage` if a store call
    /// fails.
    #[instrument(skip(self))]
    pub async fn add_category(&self, name: &str) -> Result<(), CatalogError> {
        require_non_empty(name, "category name")?;

        if self.store.category_exists(name).await? {
            return Err(CatalogError::Conflict(format!(
                "category '{name}' already exists"
            )));
        }

        self.store
            .insert_category(name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(message) => CatalogError::Conflict(message),
                other => CatalogError::Storage(other),
            })
    }

    /// Delete the category matching the name (case-insensitive).
    ///
    /// An empty name is a silent no-op, not an error. Products referencing
    /// the category keep their stored category name; nothing cascades.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if a store call fails.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, name: &str) -> Result<bool, CatalogError> {
        if name.is_empty() {
            return Ok(false);
        }
        if !self.store.category_exists(name).await? {
            return Ok(false);
        }
        Ok(self.store.delete_category(name).await?)
    }

    /// Rename the category matching the name (case-insensitive).
    ///
    /// The name is resolved to a store identifier once; the rename is then
    /// addressed by that identifier. Returns the store's own result: false
    /// means the row vanished between resolution and the write.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidArgument` when either name is empty,
    /// `CatalogError::NotFound` if the category does not exist,
    /// `CatalogError::Conflict` when the new name is already taken, or
    /// `CatalogError::Storage` if a store call fails.
    #[instrument(skip(self))]
    pub async fn update_category(&self, name: &str, new_name: &str) -> Result<bool, CatalogError> {
        require_non_empty(name, "category name")?;
        require_non_empty(new_name, "category name")?;

        let Some(id) = self.store.find_category_id(name).await? else {
            return Err(CatalogError::NotFound(format!(
                "no category named '{name}'"
            )));
        };

        self.store
            .rename_category(id, new_name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(message) => CatalogError::Conflict(message),
                other => CatalogError::Storage(other),
            })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn product_not_found(keyword: &str) -> CatalogError {
    CatalogError::NotFound(format!("no product matches '{keyword}'"))
}

fn require_non_empty(value: &str, label: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{label} cannot be empty"
        )));
    }
    Ok(())
}

fn require_non_negative(value: i32, label: &str) -> Result<(), CatalogError> {
    if value < 0 {
        return Err(CatalogError::InvalidArgument(format!(
            "{label} cannot be negative"
        )));
    }
    Ok(())
}

fn validate_new_product(input: NewProduct) -> Result<Product, CatalogError> {
    require_non_empty(&input.name, "product name")?;
    require_non_empty(&input.status, "product status")?;
    require_non_empty(&input.category, "product category")?;
    require_non_negative(input.price, "product price")?;
    require_non_negative(input.quantity, "product quantity")?;
    let barcode =
        Barcode::parse(&input.barcode).map_err(|e| CatalogError::InvalidArgument(e.to_string()))?;

    Ok(Product {
        name: input.name,
        barcode,
        price: input.price,
        quantity: input.quantity,
        status: input.status,
        category: Some(input.category),
    })
}

fn merge_patch(stored: Product, patch: ProductPatch) -> Result<Product, CatalogError> {
    if let Some(name) = &patch.name {
        require_non_empty(name, "product name")?;
    }
    if let Some(status) = &patch.status {
        require_non_empty(status, "product status")?;
    }
    if let Some(category) = &patch.category {
        require_non_empty(category, "product category")?;
    }
    if let Some(price) = patch.price {
        require_non_negative(price, "product price")?;
    }
    if let Some(quantity) = patch.quantity {
        require_non_negative(quantity, "product quantity")?;
    }
    let barcode = match patch.barcode {
        Some(raw) => {
            Barcode::parse(&raw).map_err(|e| CatalogError::InvalidArgument(e.to_string()))?
        }
        None => stored.barcode,
    };

    Ok(Product {
        name: patch.name.unwrap_or(stored.name),
        barcode,
        price: patch.price.unwrap_or(stored.price),
        quantity: patch.quantity.unwrap_or(stored.quantity),
        status: patch.status.unwrap_or(stored.status),
        category: patch.category.map_or(stored.category, Some),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryInventoryStore;

    fn service() -> CatalogService<MemoryInventoryStore> {
        CatalogService::new(MemoryInventoryStore::new())
    }

    fn input(name: &str, barcode: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            barcode: barcode.to_owned(),
            price: 250,
            quantity: 10,
            status: "In Stock".to_owned(),
            category: "General".to_owned(),
        }
    }

    #[tokio::test]
    async fn get_product_by_name_and_barcode_return_the_same_entity() {
        let catalog = service();
        catalog.add_category("General").await.unwrap();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let by_name = catalog.get_product("monitor").await.unwrap();
        let by_barcode = catalog.get_product("113456789089").await.unwrap();
        assert_eq!(by_name, by_barcode);
        assert_eq!(by_name.name, "Monitor");
        assert_eq!(by_name.category.as_deref(), Some("General"));
    }

    #[tokio::test]
    async fn get_product_fails_not_found_for_an_unknown_keyword() {
        let catalog = service();
        let err = catalog.get_product("ghost").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_product_rejects_each_empty_string_field() {
        let catalog = service();

        let cases = [
            NewProduct {
                name: String::new(),
                ..input("Monitor", "113456789089")
            },
            NewProduct {
                barcode: String::new(),
                ..input("Monitor", "113456789089")
            },
            NewProduct {
                status: String::new(),
                ..input("Monitor", "113456789089")
            },
            NewProduct {
                category: String::new(),
                ..input("Monitor", "113456789089")
            },
        ];
        for case in cases {
            let err = catalog.add_product(case).await.unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(_)));
        }
        assert!(catalog.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_product_rejects_negative_price_and_quantity() {
        let catalog = service();

        let negative_price = NewProduct {
            price: -1,
            ..input("Monitor", "113456789089")
        };
        assert!(matches!(
            catalog.add_product(negative_price).await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));

        let negative_quantity = NewProduct {
            quantity: -1,
            ..input("Monitor", "113456789089")
        };
        assert!(matches!(
            catalog.add_product(negative_quantity).await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));
    }

    #[tokio::test]
    async fn add_product_accepts_zero_price_and_quantity() {
        let catalog = service();

        let free = NewProduct {
            price: 0,
            quantity: 0,
            ..input("Sample", "909090909091")
        };
        let added = catalog.add_product(free).await.unwrap();
        assert_eq!(added.price, 0);
        assert_eq!(added.quantity, 0);
    }

    #[tokio::test]
    async fn add_product_rejects_malformed_barcodes() {
        let catalog = service();

        for barcode in ["12345678901", "1234567890123", "12345678901a"] {
            let err = catalog.add_product(input("Monitor", barcode)).await.unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn add_product_fails_conflict_on_a_duplicate_name() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let err = catalog
            .add_product(input("MONITOR", "909090909091"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn add_product_fails_conflict_on_a_duplicate_barcode() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let err = catalog
            .add_product(input("Keyboard", "113456789089"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn add_product_returns_the_given_category_without_a_re_read() {
        let catalog = service();

        let added = catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();
        assert_eq!(added.category.as_deref(), Some("General"));

        // "General" was never created, so the stored reference is null.
        let stored = catalog.get_product("Monitor").await.unwrap();
        assert_eq!(stored.category, None);
    }

    #[tokio::test]
    async fn an_empty_patch_is_a_no_op_that_still_succeeds() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();
        let before = catalog.get_product("Monitor").await.unwrap();

        let updated = catalog
            .update_product("Monitor", ProductPatch::default())
            .await
            .unwrap();
        assert!(updated);
        assert_eq!(catalog.get_product("Monitor").await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_product_fails_not_found_without_mutating_anything() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let patch = ProductPatch {
            quantity: Some(1),
            ..ProductPatch::default()
        };
        let err = catalog.update_product("ghost", patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));

        let listing = catalog.list_products().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].quantity, 10);
    }

    #[tokio::test]
    async fn update_product_patches_only_the_given_fields() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let patch = ProductPatch {
            quantity: Some(3),
            ..ProductPatch::default()
        };
        assert!(catalog.update_product("Monitor", patch).await.unwrap());

        let stored = catalog.get_product("Monitor").await.unwrap();
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.price, 250);
        assert_eq!(stored.status, "In Stock");
        assert_eq!(stored.name, "Monitor");
    }

    #[tokio::test]
    async fn update_product_can_set_numeric_fields_to_zero() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let patch = ProductPatch {
            price: Some(0),
            quantity: Some(0),
            ..ProductPatch::default()
        };
        assert!(catalog.update_product("Monitor", patch).await.unwrap());

        let stored = catalog.get_product("Monitor").await.unwrap();
        assert_eq!(stored.price, 0);
        assert_eq!(stored.quantity, 0);
    }

    #[tokio::test]
    async fn update_product_rejects_invalid_patch_values() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let negative_price = ProductPatch {
            price: Some(-5),
            ..ProductPatch::default()
        };
        assert!(matches!(
            catalog.update_product("Monitor", negative_price).await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));

        let empty_name = ProductPatch {
            name: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(matches!(
            catalog.update_product("Monitor", empty_name).await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));

        let bad_barcode = ProductPatch {
            barcode: Some("123".to_owned()),
            ..ProductPatch::default()
        };
        assert!(matches!(
            catalog.update_product("Monitor", bad_barcode).await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));
    }

    #[tokio::test]
    async fn update_product_by_barcode_keyword_can_rename() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let patch = ProductPatch {
            name: Some("Display".to_owned()),
            ..ProductPatch::default()
        };
        assert!(catalog.update_product("113456789089", patch).await.unwrap());

        assert!(catalog.product_exists("Display").await.unwrap());
        assert!(!catalog.product_exists("Monitor").await.unwrap());
    }

    #[tokio::test]
    async fn update_product_fails_conflict_when_renaming_over_another_product() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();
        catalog
            .add_product(input("Keyboard", "909090909091"))
            .await
            .unwrap();

        let patch = ProductPatch {
            name: Some("Monitor".to_owned()),
            ..ProductPatch::default()
        };
        let err = catalog.update_product("Keyboard", patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_product_then_exists_returns_false() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        assert!(catalog.delete_product("Monitor").await.unwrap());
        assert!(!catalog.product_exists("Monitor").await.unwrap());
        assert!(!catalog.product_exists("113456789089").await.unwrap());
    }

    #[tokio::test]
    async fn delete_product_fails_not_found_when_absent() {
        let catalog = service();
        let err = catalog.delete_product("ghost").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_with_an_empty_keyword_returns_the_full_listing() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();
        catalog
            .add_product(input("Keyboard", "909090909091"))
            .await
            .unwrap();

        let results = catalog.search("").await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn search_matches_name_status_and_category_substrings() {
        let catalog = service();
        catalog.add_category("Electronics").await.unwrap();
        catalog
            .add_product(NewProduct {
                status: "Backordered".to_owned(),
                category: "Electronics".to_owned(),
                ..input("Monitor", "113456789089")
            })
            .await
            .unwrap();

        assert_eq!(catalog.search("onit").await.unwrap().len(), 1);
        assert_eq!(catalog.search("backorder").await.unwrap().len(), 1);
        assert_eq!(catalog.search("electro").await.unwrap().len(), 1);
        assert!(catalog.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_matches_barcodes_exactly_not_by_substring() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        assert_eq!(catalog.search("113456789089").await.unwrap().len(), 1);
        assert!(catalog.search("1134567890").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn products_by_status_matches_exactly_not_by_substring() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();
        catalog
            .add_product(NewProduct {
                status: "Out of Stock".to_owned(),
                ..input("Keyboard", "909090909091")
            })
            .await
            .unwrap();

        let in_stock = catalog.products_by_status("In Stock").await.unwrap();
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].name, "Monitor");
        assert!(catalog.products_by_status("Stock").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn product_status_returns_the_pair_or_nothing() {
        let catalog = service();
        catalog
            .add_product(input("Monitor", "113456789089"))
            .await
            .unwrap();

        let summary = catalog.product_status("monitor").await.unwrap().unwrap();
        assert_eq!(summary.status, "In Stock");
        assert_eq!(summary.quantity, 10);
        assert!(catalog.product_status("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_category_rejects_an_empty_name() {
        let catalog = service();
        let err = catalog.add_category("").await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn add_category_fails_conflict_case_insensitively() {
        let catalog = service();
        catalog.add_category("Electronics").await.unwrap();

        let err = catalog.add_category("ELECTRONICS").await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_category_with_an_empty_name_is_a_silent_no_op() {
        let catalog = service();
        assert!(!catalog.delete_category("").await.unwrap());
    }

    #[tokio::test]
    async fn delete_category_reports_whether_anything_was_removed() {
        let catalog = service();
        catalog.add_category("Electronics").await.unwrap();

        assert!(catalog.delete_category("electronics").await.unwrap());
        assert!(!catalog.delete_category("Electronics").await.unwrap());
        assert!(catalog.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_category_renames_through_the_resolved_id() {
        let catalog = service();
        catalog.add_category("Electronics").await.unwrap();

        assert!(
            catalog
                .update_category("electronics", "Appliances")
                .await
                .unwrap()
        );
        assert_eq!(catalog.list_categories().await.unwrap(), vec!["Appliances"]);
    }

    #[tokio::test]
    async fn update_category_validates_names_and_existence() {
        let catalog = service();

        assert!(matches!(
            catalog.update_category("", "Appliances").await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));
        assert!(matches!(
            catalog.update_category("Electronics", "").await.unwrap_err(),
            CatalogError::InvalidArgument(_)
        ));
        assert!(matches!(
            catalog
                .update_category("Electronics", "Appliances")
                .await
                .unwrap_err(),
            CatalogError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn deleting_a_category_leaves_product_references_dangling() {
        let catalog = service();
        catalog.add_category("Electronics").await.unwrap();
        catalog
            .add_product(NewProduct {
                name: "TV".to_owned(),
                barcode: "123456789012".to_owned(),
                price: 100,
                quantity: 5,
                status: "In Stock".to_owned(),
                category: "Electronics".to_owned(),
            })
            .await
            .unwrap();

        let patch = ProductPatch {
            quantity: Some(3),
            ..ProductPatch::default()
        };
        assert!(catalog.update_product("TV", patch).await.unwrap());

        let stored = catalog.get_product("TV").await.unwrap();
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.price, 100);
        assert_eq!(stored.status, "In Stock");

        assert!(catalog.delete_category("Electronics").await.unwrap());
        assert!(!catalog.category_exists("Electronics").await.unwrap());

        // The product keeps the stored category name; nothing cascades.
        let after = catalog.get_product("TV").await.unwrap();
        assert_eq!(after.category.as_deref(), Some("Electronics"));
    }
}
