//! Role commands. The whole surface requires an administrative role.
//!
//! Deleting a role does not cascade: accounts referencing it keep the
//! reference and resolve to the default role afterwards.

use tracing::{info, warn};

use super::{CliError, Credentials, access, connect, require_admin};

/// List every role name.
pub async fn list(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    let roles = access(&pool).list_roles().await?;
    if roles.is_empty() {
        info!("No roles defined");
        return Ok(());
    }
    for name in roles {
        info!("{name}");
    }
    Ok(())
}

/// Add a role.
pub async fn add(credentials: &Credentials, name: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    access(&pool).add_role(name).await?;
    info!("Role added: {name}");
    Ok(())
}

/// Delete a role.
pub async fn delete(credentials: &Credentials, name: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    if access(&pool).delete_role(name).await? {
        info!("Role deleted: {name}");
    } else {
        warn!("No role named '{name}'");
    }
    Ok(())
}
