//! Product catalog commands.
//!
//! The whole product surface is open to any authenticated account,
//! matching the HTTP API. Listings print one aligned row per product.

use stockroom_server::models::{NewProduct, Product, ProductPatch};
use tracing::{info, warn};

use super::{CliError, Credentials, authenticate, catalog, connect};

/// Field overrides for `update`. Empty strings and zero keep the stored
/// values, mirroring the HTTP update body.
#[derive(Debug, Default)]
pub struct UpdateArgs {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl UpdateArgs {
    fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name.and_then(non_empty),
            barcode: self.barcode.and_then(non_empty),
            price: self.price.and_then(non_zero),
            quantity: self.quantity.and_then(non_zero),
            status: self.status.and_then(non_empty),
            category: self.category.and_then(non_empty),
        }
    }
}

/// List every product in the catalog.
pub async fn list(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let products = catalog(&pool).list_products().await?;
    print_products(&products);
    Ok(())
}

/// Show one product matched by name or barcode.
pub async fn get(credentials: &Credentials, keyword: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let product = catalog(&pool).get_product(keyword).await?;
    print_header();
    print_product(&product);
    Ok(())
}

/// Add a new product to the catalog.
pub async fn add(credentials: &Credentials, input: NewProduct) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let product = catalog(&pool).add_product(input).await?;
    info!("Product added: {} ({})", product.name, product.barcode);
    Ok(())
}

/// Apply the given field overrides to a product.
pub async fn update(
    credentials: &Credentials,
    keyword: &str,
    args: UpdateArgs,
) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let patch = args.into_patch();
    if patch.is_empty() {
        warn!("No fields to change");
        return Ok(());
    }

    if catalog(&pool).update_product(keyword, patch).await? {
        info!("Product updated");
    } else {
        warn!("The store reported no rows changed");
    }
    Ok(())
}

/// Delete a product matched by name or barcode.
pub async fn delete(credentials: &Credentials, keyword: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    if catalog(&pool).delete_product(keyword).await? {
        info!("Product deleted");
    } else {
        warn!("The store reported no rows deleted");
    }
    Ok(())
}

/// Search by name, status, or category substring, or exact barcode.
pub async fn search(credentials: &Credentials, term: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let products = catalog(&pool).search(term).await?;
    print_products(&products);
    Ok(())
}

/// List products whose status matches exactly.
pub async fn by_status(credentials: &Credentials, status: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let products = catalog(&pool).products_by_status(status).await?;
    print_products(&products);
    Ok(())
}

/// Show the status and quantity for one product.
pub async fn status(credentials: &Credentials, keyword: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    match catalog(&pool).product_status(keyword).await? {
        Some(summary) => info!("{} ({} on hand)", summary.status, summary.quantity),
        None => warn!("No product matches '{keyword}'"),
    }
    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

const fn non_zero(value: i32) -> Option<i32> {
    if value == 0 { None } else { Some(value) }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        info!("No products found");
        return;
    }
    print_header();
    for product in products {
        print_product(product);
    }
}

fn print_header() {
    info!(
        "{:<25} {:>12} {:>8} {:>8}  {:<14} {}",
        "Name", "Barcode", "Price", "Qty", "Status", "Category"
    );
}

fn print_product(product: &Product) {
    info!(
        "{:<25} {:>12} {:>8} {:>8}  {:<14} {}",
        product.name,
        product.barcode,
        product.price,
        product.quantity,
        product.status,
        product.category.as_deref().unwrap_or("-"),
    );
}
