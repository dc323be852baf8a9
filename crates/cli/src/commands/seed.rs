//! Seed the database with the built-in roles and optional fixture data.
//!
//! A fresh database has no roles and no accounts, so this command runs
//! without credentials; reaching the database at all is the gate.
//! Existing rows are left alone and counted as skipped. Categories are
//! inserted before products so the product rows can resolve their
//! category names.
//!
//! # Fixture File
//!
//! ```yaml
//! roles:
//!   - manager
//! categories:
//!   - Electronics
//! products:
//!   - name: Samsung TV
//!     barcode: "106001000001"
//!     price: 300
//!     quantity: 8
//!     status: In Stock
//!     category: Electronics
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use stockroom_core::Barcode;
use stockroom_server::models::NewProduct;
use stockroom_server::services::access::{AccessError, DEFAULT_ROLE};
use stockroom_server::services::catalog::CatalogError;

use super::{CliError, access, catalog, connect};

/// Roles every deployment starts with.
const BUILTIN_ROLES: &[&str] = &[DEFAULT_ROLE, "admin"];

/// Fixture data loaded from a YAML file. All sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeedConfig {
    roles: Vec<String>,
    categories: Vec<String>,
    products: Vec<SeedProduct>,
}

/// One product row in the fixture file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    barcode: String,
    price: i32,
    quantity: i32,
    status: String,
    category: String,
}

impl From<SeedProduct> for NewProduct {
    fn from(seed: SeedProduct) -> Self {
        Self {
            name: seed.name,
            barcode: seed.barcode,
            price: seed.price,
            quantity: seed.quantity,
            status: seed.status,
            category: seed.category,
        }
    }
}

/// Insert the built-in roles plus whatever the optional file adds.
///
/// Rows that already exist are skipped; rows the services reject are
/// collected and reported at the end. A failing store call aborts.
pub async fn run(file: Option<&str>) -> Result<(), CliError> {
    let config = match file {
        Some(path) => load_config(path).await?,
        None => SeedConfig::default(),
    };

    // Check the fixture rows before touching the database.
    let issues = validate_config(&config);
    if !issues.is_empty() {
        error!("Fixture validation failed:");
        for issue in &issues {
            error!("  - {issue}");
        }
        return Err(CliError::SeedInvalid(issues.len()));
    }

    let pool = connect().await?;
    let access = access(&pool);
    let catalog = catalog(&pool);

    let mut inserted = 0_u32;
    let mut skipped = 0_u32;
    let mut errors: Vec<(String, String)> = Vec::new();

    for role in BUILTIN_ROLES
        .iter()
        .copied()
        .chain(config.roles.iter().map(String::as_str))
    {
        match access.add_role(role).await {
            Ok(()) => inserted += 1,
            Err(AccessError::Conflict(_)) => skipped += 1,
            Err(e @ AccessError::Storage(_)) => return Err(e.into()),
            Err(e) => errors.push((format!("role '{role}'"), e.to_string())),
        }
    }

    for name in &config.categories {
        match catalog.add_category(name).await {
            Ok(()) => inserted += 1,
            Err(CatalogError::Conflict(_)) => skipped += 1,
            Err(e @ CatalogError::Storage(_)) => return Err(e.into()),
            Err(e) => errors.push((format!("category '{name}'"), e.to_string())),
        }
    }

    for product in config.products {
        let label = format!("product '{}'", product.name);
        match catalog.add_product(product.into()).await {
            Ok(_) => inserted += 1,
            Err(CatalogError::Conflict(_)) => skipped += 1,
            Err(e @ CatalogError::Storage(_)) => return Err(e.into()),
            Err(e) => errors.push((label, e.to_string())),
        }
    }

    info!("Seeding complete!");
    info!("  Inserted: {inserted}");
    info!("  Skipped (already exist): {skipped}");

    if !errors.is_empty() {
        error!("  Errors: {}", errors.len());
        for (item, message) in &errors {
            error!("    - {item}: {message}");
        }
    }

    Ok(())
}

/// Collect problems the services would reject row by row.
fn validate_config(config: &SeedConfig) -> Vec<String> {
    let mut issues = Vec::new();
    for product in &config.products {
        if product.name.is_empty() {
            issues.push("product with an empty name".to_owned());
        }
        if let Err(e) = Barcode::parse(&product.barcode) {
            issues.push(format!("product '{}': {e}", product.name));
        }
    }
    issues
}

/// Read and parse the fixture file.
async fn load_config(file: &str) -> Result<SeedConfig, CliError> {
    let path = Path::new(file);
    if !path.exists() {
        return Err(CliError::SeedFileMissing(file.to_owned()));
    }

    info!(path = %file, "Loading fixture data");
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}
