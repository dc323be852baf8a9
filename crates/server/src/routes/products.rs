//! Product API routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{NewProduct, Product, ProductPatch, StatusSummary};
use crate::routes::catalog;
use crate::services::catalog::CatalogError;
use crate::state::AppState;

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{keyword}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/products/{keyword}/status", get(product_status))
}

/// Query parameters for the product listing.
///
/// `search` wins when both filters are present.
#[derive(Debug, Deserialize)]
struct ProductsQuery {
    /// Substring match over name, status, and category; exact on barcode.
    search: Option<String>,
    /// Exact status filter.
    status: Option<String>,
}

/// Update request body.
///
/// Empty strings and zero values mean "keep the stored value"; they are
/// translated to unset patch fields before the service runs, so this
/// surface cannot reset a field to empty or zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateProductRequest {
    name: String,
    barcode: String,
    price: i32,
    quantity: i32,
    status: String,
    category: String,
}

impl UpdateProductRequest {
    fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: non_empty(self.name),
            barcode: non_empty(self.barcode),
            price: non_zero(self.price),
            quantity: non_zero(self.quantity),
            status: non_empty(self.status),
            category: non_empty(self.category),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateProductResponse {
    updated: bool,
}

#[derive(Debug, Serialize)]
struct DeleteProductResponse {
    deleted: bool,
}

async fn list_products(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let catalog = catalog(&state);
    let products = match (query.search, query.status) {
        (Some(term), _) => catalog.search(&term).await?,
        (None, Some(status)) => catalog.products_by_status(&status).await?,
        (None, None) => catalog.list_products().await?,
    };
    Ok(Json(products))
}

async fn create_product(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = catalog(&state).add_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<Product>> {
    Ok(Json(catalog(&state).get_product(&keyword).await?))
}

async fn update_product(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<UpdateProductResponse>> {
    let updated = catalog(&state)
        .update_product(&keyword, request.into_patch())
        .await?;
    Ok(Json(UpdateProductResponse { updated }))
}

async fn delete_product(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<DeleteProductResponse>> {
    let deleted = catalog(&state).delete_product(&keyword).await?;
    Ok(Json(DeleteProductResponse { deleted }))
}

async fn product_status(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<StatusSummary>> {
    let summary = catalog(&state)
        .product_status(&keyword)
        .await?
        .ok_or_else(|| {
            AppError::Catalog(CatalogError::NotFound(format!(
                "no product matches '{keyword}'"
            )))
        })?;
    Ok(Json(summary))
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

const fn non_zero(value: i32) -> Option<i32> {
    if value == 0 { None } else { Some(value) }
}
