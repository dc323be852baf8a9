//! Command implementations.
//!
//! Each command opens its own connection pool, authenticates the
//! credential pair where the command calls for it, and drives the same
//! services the HTTP API uses. The process exits after one command, so
//! nothing is cached between invocations.
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - `PostgreSQL` connection string
//!   (`DATABASE_URL` works as a fallback)
//! - `STOCKROOM_USERNAME` / `STOCKROOM_PASSWORD` - Credentials used when
//!   the `--username` / `--password` flags are omitted

pub mod categories;
pub mod products;
pub mod roles;
pub mod seed;
pub mod users;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use stockroom_server::db::{self, PgInventoryStore, PgUserStore};
use stockroom_server::services::access::{AccessError, AccessService, DEFAULT_ROLE, Sha256Hasher};
use stockroom_server::services::catalog::{CatalogError, CatalogService};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// No username or password was supplied.
    #[error(
        "Missing credentials: pass --username/--password or set STOCKROOM_USERNAME/STOCKROOM_PASSWORD"
    )]
    MissingCredentials,

    /// The pair did not match an account.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The account holds the default role.
    #[error("This command requires an administrative role")]
    AdminRequired,

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Access operation failed.
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// The seed file does not exist.
    #[error("Seed file not found: {0}")]
    SeedFileMissing(String),

    /// The seed file could not be read.
    #[error("Seed file read error: {0}")]
    SeedRead(#[from] std::io::Error),

    /// The seed file is not valid YAML.
    #[error("Seed file parse error: {0}")]
    SeedParse(#[from] serde_yaml::Error),

    /// The seed file parsed but holds rows the services would reject.
    #[error("{0} validation errors found in the seed file")]
    SeedInvalid(usize),
}

/// Credential pair taken from the global flags, with environment
/// fallbacks resolved lazily so commands that need no credentials never
/// touch them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Resolve the pair from flags, falling back to the environment.
    pub(crate) fn resolve(&self) -> Result<(String, String), CliError> {
        let username = self
            .username
            .clone()
            .or_else(|| std::env::var("STOCKROOM_USERNAME").ok())
            .ok_or(CliError::MissingCredentials)?;
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("STOCKROOM_PASSWORD").ok())
            .ok_or(CliError::MissingCredentials)?;
        Ok((username, password))
    }
}

/// Connect to the database named by the environment.
pub(crate) async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKROOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    tracing::debug!("Connecting to database");
    Ok(db::create_pool(&database_url).await?)
}

/// Verify the credential pair and return the username and resolved role.
pub(crate) async fn authenticate(
    pool: &PgPool,
    credentials: &Credentials,
) -> Result<(String, String), CliError> {
    let (username, password) = credentials.resolve()?;
    let service = access(pool);
    if !service.check_user_credentials(&username, &password).await? {
        return Err(CliError::InvalidCredentials);
    }
    let role = service.user_role(&username).await?;
    Ok((username, role))
}

/// Authenticate and reject accounts holding the default role.
pub(crate) async fn require_admin(
    pool: &PgPool,
    credentials: &Credentials,
) -> Result<String, CliError> {
    let (username, role) = authenticate(pool, credentials).await?;
    if role == DEFAULT_ROLE {
        return Err(CliError::AdminRequired);
    }
    Ok(username)
}

pub(crate) fn catalog(pool: &PgPool) -> CatalogService<PgInventoryStore> {
    CatalogService::new(PgInventoryStore::new(pool.clone()))
}

pub(crate) fn access(pool: &PgPool) -> AccessService<PgUserStore, Sha256Hasher> {
    AccessService::new(PgUserStore::new(pool.clone()), Sha256Hasher)
}
