//! Integration tests for Stockroom.
//!
//! Every test drives a running server over HTTP, so the whole suite is
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply the schema and start the server
//! psql "$STOCKROOM_DATABASE_URL" -f schema.sql
//! cargo run -p stockroom-server
//!
//! # Run the suite against it
//! cargo test -p stockroom-integration-tests -- --ignored
//! ```
//!
//! `STOCKROOM_BASE_URL` overrides the default `http://localhost:8080`.
//!
//! # Test Categories
//!
//! - `products` - Product CRUD, search, and status filters
//! - `categories` - Category management and dangling references
//! - `access` - Registration, credentials, and role gates
//!
//! Tests provision their own accounts through open registration and use
//! UUID-suffixed names, so they can run against a shared database without
//! cleanup. Admin-gated endpoints are only exercised for the rejection
//! path because granting a privileged role needs operator access.
