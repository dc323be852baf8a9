//! Business logic, separated from HTTP handlers and storage.
//!
//! - `catalog` - Product and category management
//! - `access` - User credentials, registration, and roles

pub mod access;
pub mod catalog;
