//! Domain models for the catalog and access services.
//!
//! These types represent validated domain objects separate from database
//! row types.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductPatch, StatusSummary};
pub use user::{CurrentUser, UserAccount};
