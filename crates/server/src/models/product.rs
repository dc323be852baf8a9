//! Product domain types.

use serde::{Deserialize, Serialize};

use stockroom_core::Barcode;

/// A catalog product (domain type).
///
/// Identity lives at the store layer; the services always address a product
/// through a keyword (name or barcode), never through its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product name.
    pub name: String,
    /// Unique 12-digit barcode.
    pub barcode: Barcode,
    /// Price in minor currency units. Never negative.
    pub price: i32,
    /// Units on hand. Never negative.
    pub quantity: i32,
    /// Free-text status label (e.g., "In Stock").
    pub status: String,
    /// Referenced category name. `None` when the reference did not resolve
    /// at write time or the category was stored as null.
    pub category: Option<String>,
}

/// Unvalidated input for creating a product.
///
/// Field-level validation (non-empty strings, barcode format, non-negative
/// numbers) happens in the catalog service, before any store access.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub barcode: String,
    pub price: i32,
    pub quantity: i32,
    pub status: String,
    pub category: String,
}

/// A partial product update.
///
/// `None` means "keep the stored value". Direct callers may set any valid
/// value, including zero for the numeric fields. The HTTP and CLI edges
/// translate their wire conventions (empty string and zero meaning
/// unchanged) into `None` before building a patch, so those surfaces
/// cannot reset a field to empty or zero.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ProductPatch {
    /// Whether every field is unset (a no-op patch).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.barcode.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
            && self.category.is_none()
    }
}

/// Status and quantity for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Current status label.
    pub status: String,
    /// Units on hand.
    pub quantity: i32,
}
