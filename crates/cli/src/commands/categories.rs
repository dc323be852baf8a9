//! Category commands.
//!
//! Listing is open to any account because the add-product flow needs the
//! names; changing the set requires an administrative role.

use tracing::{info, warn};

use super::{CliError, Credentials, authenticate, catalog, connect, require_admin};

/// List every category name.
pub async fn list(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    authenticate(&pool, credentials).await?;

    let categories = catalog(&pool).list_categories().await?;
    if categories.is_empty() {
        info!("No categories defined");
        return Ok(());
    }
    for name in categories {
        info!("{name}");
    }
    Ok(())
}

/// Add a category.
pub async fn add(credentials: &Credentials, name: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    catalog(&pool).add_category(name).await?;
    info!("Category added: {name}");
    Ok(())
}

/// Rename a category.
pub async fn rename(credentials: &Credentials, name: &str, new_name: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    if catalog(&pool).update_category(name, new_name).await? {
        info!("Category renamed: {name} -> {new_name}");
    } else {
        warn!("The store reported no rows changed");
    }
    Ok(())
}

/// Delete a category. Products keep their stored category name.
pub async fn delete(credentials: &Credentials, name: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    if catalog(&pool).delete_category(name).await? {
        info!("Category deleted: {name}");
    } else {
        warn!("No category named '{name}'");
    }
    Ok(())
}
