//! `PostgreSQL` inventory store.
//!
//! Keyword lookups match `product_name` case-insensitively or `bar_code`
//! exactly, in a single predicate shared by every keyword query. Queries use
//! the runtime sqlx API to avoid offline-mode cache requirements.

use sqlx::PgPool;
use tracing::{debug, instrument};

use stockroom_core::{Barcode, CategoryId, ProductId};

use super::RepositoryError;
use super::store::InventoryStore;
use crate::models::{Product, StatusSummary};

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_name: String,
    bar_code: String,
    price: i32,
    quantity: i32,
    status: String,
    category_name: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let barcode = Barcode::parse(&row.bar_code).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid barcode in database: {e}"))
        })?;

        Ok(Self {
            name: row.product_name,
            barcode,
            price: row.price,
            quantity: row.quantity,
            status: row.status,
            category: row.category_name,
        })
    }
}

/// Row type for keyword resolution, carrying the id alongside the fields.
#[derive(Debug, sqlx::FromRow)]
struct ProductEntryRow {
    product_id: ProductId,
    product_name: String,
    bar_code: String,
    price: i32,
    quantity: i32,
    status: String,
    category_name: Option<String>,
}

impl ProductEntryRow {
    fn into_entry(self) -> Result<(ProductId, Product), RepositoryError> {
        let product = Product::try_from(ProductRow {
            product_name: self.product_name,
            bar_code: self.bar_code,
            price: self.price,
            quantity: self.quantity,
            status: self.status,
            category_name: self.category_name,
        })?;
        Ok((self.product_id, product))
    }
}

/// `PostgreSQL`-backed inventory store.
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    /// Create a new inventory store over the given pool.
    ///
    /// The pool is reference-counted, so cloning it per request is cheap.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InventoryStore for PgInventoryStore {
    async fn product_exists(&self, keyword: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM products
                WHERE product_name ILIKE $1 OR bar_code = $1
            )
            ",
        )
        .bind(keyword)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_product(&self, keyword: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r"
            SELECT product_name, bar_code, price, quantity, status, category_name
            FROM products
            WHERE product_name ILIKE $1 OR bar_code = $1
            ",
        )
        .bind(keyword)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_product_entry(
        &self,
        keyword: &str,
    ) -> Result<Option<(ProductId, Product)>, RepositoryError> {
        let row: Option<ProductEntryRow> = sqlx::query_as(
            r"
            SELECT product_id, product_name, bar_code, price, quantity, status, category_name
            FROM products
            WHERE product_name ILIKE $1 OR bar_code = $1
            ",
        )
        .bind(keyword)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductEntryRow::into_entry).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT product_name, bar_code, price, quantity, status, category_name
            FROM products
            ORDER BY product_name
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    #[instrument(skip(self, product), fields(name = %product.name, barcode = %product.barcode))]
    async fn insert_product(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query::<sqlx::Postgres>(
            r"
            INSERT INTO products (product_name, bar_code, price, quantity, status, category_name)
            VALUES ($1, $2, $3, $4, $5, (SELECT name FROM categories WHERE name = $6))
            ",
        )
        .bind(&product.name)
        .bind(product.barcode.as_str())
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.status)
        .bind(product.category.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "product name or barcode already exists".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        debug!("Inserted product");
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %id, name = %product.name))]
    async fn update_product(
        &self,
        id: ProductId,
        product: &Product,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>(
            r"
            UPDATE products
            SET product_name = $2,
                bar_code = $3,
                price = $4,
                quantity = $5,
                status = $6,
                category_name = (SELECT name FROM categories WHERE name = $7)
            WHERE product_id = $1
            ",
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.barcode.as_str())
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.status)
        .bind(product.category.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "product name or barcode already exists".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        debug!(rows = result.rows_affected(), "Updated product");
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, keyword: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>(
            "DELETE FROM products WHERE product_name ILIKE $1 OR bar_code = $1",
        )
        .bind(keyword)
        .execute(&self.pool)
        .await?;

        debug!(rows = result.rows_affected(), "Deleted product");
        Ok(result.rows_affected() > 0)
    }

    async fn products_by_status(&self, status: &str) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT product_name, bar_code, price, quantity, status, category_name
            FROM products
            WHERE status = $1
            ORDER BY product_name
            ",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT product_name, bar_code, price, quantity, status, category_name
            FROM products
            WHERE product_name ILIKE '%' || $1 || '%'
               OR status ILIKE '%' || $1 || '%'
               OR category_name ILIKE '%' || $1 || '%'
               OR bar_code = $1
            ORDER BY product_name
            ",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn status_and_quantity(
        &self,
        keyword: &str,
    ) -> Result<Option<StatusSummary>, RepositoryError> {
        let row: Option<(String, i32)> = sqlx::query_as(
            r"
            SELECT status, quantity FROM products
            WHERE product_name ILIKE $1 OR bar_code = $1
            ",
        )
        .bind(keyword)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(status, quantity)| StatusSummary { status, quantity }))
    }

    async fn category_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE name ILIKE $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    #[instrument(skip(self))]
    async fn insert_category(&self, name: &str) -> Result<(), RepositoryError> {
        sqlx::query::<sqlx::Postgres>("INSERT INTO categories (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("category name already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        debug!("Inserted category");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>("DELETE FROM categories WHERE name ILIKE $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Deleted category");
        Ok(result.rows_affected() > 0)
    }

    async fn find_category_id(&self, name: &str) -> Result<Option<CategoryId>, RepositoryError> {
        let id = sqlx::query_scalar::<_, CategoryId>(
            "SELECT category_id FROM categories WHERE name ILIKE $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn rename_category(
        &self,
        id: CategoryId,
        new_name: &str,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query::<sqlx::Postgres>("UPDATE categories SET name = $2 WHERE category_id = $1")
                .bind(id)
                .bind(new_name)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(ref db_err) = e
                        && db_err.is_unique_violation()
                    {
                        return RepositoryError::Conflict(
                            "category name already exists".to_owned(),
                        );
                    }
                    RepositoryError::Database(e)
                })?;

        debug!(rows = result.rows_affected(), "Renamed category");
        Ok(result.rows_affected() > 0)
    }
}
