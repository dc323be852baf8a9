//! Account commands.
//!
//! `register` always assigns the default role; `create` takes an explicit
//! role and exists so an operator with database access can bootstrap the
//! first administrative account, which is why it skips the role gate.
//! Deletion only ever removes the account named in the credentials, and
//! the service re-checks the password before deleting.

use tracing::{info, warn};

use stockroom_server::services::access::DEFAULT_ROLE;

use super::{CliError, Credentials, access, authenticate, connect, require_admin};

/// Verify the credentials and show the account's role.
pub async fn login(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    let (username, role) = authenticate(&pool, credentials).await?;
    info!("Logged in as {username} ({role})");
    Ok(())
}

/// Create an account with the default "user" role.
pub async fn register(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    let (username, password) = credentials.resolve()?;

    access(&pool)
        .register_user(&username, &password, DEFAULT_ROLE)
        .await?;
    info!("Account registered: {username}");
    Ok(())
}

/// Create an account with an explicit role.
pub async fn create(credentials: &Credentials, role: &str) -> Result<(), CliError> {
    let pool = connect().await?;
    let (username, password) = credentials.resolve()?;

    let service = access(&pool);
    if !service.role_exists(role).await? {
        warn!("Role '{role}' does not exist; the account will fall back to the default role");
    }
    service.register_user(&username, &password, role).await?;
    info!("Account created: {username} ({role})");
    Ok(())
}

/// List every account with its role.
pub async fn list(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    require_admin(&pool, credentials).await?;

    let accounts = access(&pool).list_users().await?;
    if accounts.is_empty() {
        info!("No accounts found");
        return Ok(());
    }
    info!("{:<25} {}", "Username", "Role");
    for account in accounts {
        info!("{:<25} {}", account.username, account.role);
    }
    Ok(())
}

/// Delete the account named in the credentials.
pub async fn delete(credentials: &Credentials) -> Result<(), CliError> {
    let pool = connect().await?;
    let (username, password) = credentials.resolve()?;

    if access(&pool).delete_user(&username, &password).await? {
        info!("Account deleted: {username}");
    } else {
        warn!("The store reported no rows deleted");
    }
    Ok(())
}
