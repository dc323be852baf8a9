//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Products (Basic auth)
//! GET    /api/products                  - List products (?search= / ?status=)
//! POST   /api/products                  - Create product
//! GET    /api/products/{keyword}        - Fetch one product by name or barcode
//! PUT    /api/products/{keyword}        - Partially update a product
//! DELETE /api/products/{keyword}        - Delete a product
//! GET    /api/products/{keyword}/status - Status/quantity for one product
//!
//! # Categories (Basic auth)
//! GET    /api/categories                - List category names
//! POST   /api/categories                - Create category
//! PUT    /api/categories/{name}         - Rename category
//! DELETE /api/categories/{name}         - Delete category
//!
//! # Users
//! POST   /api/users                     - Register (no auth; role is always "user")
//! GET    /api/users                     - List accounts (admin)
//! DELETE /api/users/me                  - Delete own account (Basic auth)
//!
//! # Roles (admin)
//! GET    /api/roles                     - List role names
//! POST   /api/roles                     - Create role
//! DELETE /api/roles/{name}              - Delete role
//! ```
//!
//! The liveness and readiness endpoints live in `main.rs`, outside the
//! authenticated API surface.

pub mod categories;
pub mod products;
pub mod roles;
pub mod users;

use axum::Router;

use crate::db::{PgInventoryStore, PgUserStore};
use crate::services::access::{AccessService, Sha256Hasher};
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(categories::router())
        .merge(users::router())
        .merge(roles::router())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a catalog service for one request.
pub(crate) fn catalog(state: &AppState) -> CatalogService<PgInventoryStore> {
    CatalogService::new(PgInventoryStore::new(state.pool().clone()))
}

/// Build an access service for one request.
pub(crate) fn access(state: &AppState) -> AccessService<PgUserStore, Sha256Hasher> {
    AccessService::new(PgUserStore::new(state.pool().clone()), Sha256Hasher)
}
