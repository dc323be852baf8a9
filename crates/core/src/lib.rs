//! Stockroom Core - Shared types library.
//!
//! This crate provides common types used across all Stockroom components:
//! - `server` - HTTP API over the catalog and access services
//! - `cli` - Command-line client for catalog and account management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and barcodes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
