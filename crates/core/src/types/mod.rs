//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod barcode;
pub mod id;

pub use barcode::{Barcode, BarcodeError};
pub use id::*;
