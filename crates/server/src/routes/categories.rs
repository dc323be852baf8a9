//! Category API routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::routes::catalog;
use crate::state::AppState;

/// Build the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/categories/{name}",
            axum::routing::put(rename_category).delete(delete_category),
        )
}

#[derive(Debug, Deserialize)]
struct CreateCategoryRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RenameCategoryRequest {
    new_name: String,
}

#[derive(Debug, Serialize)]
struct RenameCategoryResponse {
    updated: bool,
}

#[derive(Debug, Serialize)]
struct DeleteCategoryResponse {
    deleted: bool,
}

async fn list_categories(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(catalog(&state).list_categories().await?))
}

async fn create_category(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<StatusCode> {
    catalog(&state).add_category(&request.name).await?;
    Ok(StatusCode::CREATED)
}

async fn rename_category(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<RenameCategoryRequest>,
) -> Result<Json<RenameCategoryResponse>> {
    let updated = catalog(&state)
        .update_category(&name, &request.new_name)
        .await?;
    Ok(Json(RenameCategoryResponse { updated }))
}

async fn delete_category(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteCategoryResponse>> {
    let deleted = catalog(&state).delete_category(&name).await?;
    Ok(Json(DeleteCategoryResponse { deleted }))
}
