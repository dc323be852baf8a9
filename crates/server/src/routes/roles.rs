//! Role API routes.
//!
//! The whole surface requires an administrative caller. Deleting a role
//! does not touch the users referencing it; their role resolution falls
//! back to the default at read time.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::routes::access;
use crate::state::AppState;

/// Build the role router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/roles", get(list_roles).post(create_role))
        .route("/api/roles/{name}", axum::routing::delete(delete_role))
}

#[derive(Debug, Deserialize)]
struct CreateRoleRequest {
    name: String,
}

#[derive(Debug, Serialize)]
struct DeleteRoleResponse {
    deleted: bool,
}

async fn list_roles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(access(&state).list_roles().await?))
}

async fn create_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<CreateRoleRequest>,
) -> Result<StatusCode> {
    access(&state).add_role(&request.name).await?;
    Ok(StatusCode::CREATED)
}

async fn delete_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteRoleResponse>> {
    let deleted = access(&state).delete_role(&name).await?;
    Ok(Json(DeleteRoleResponse { deleted }))
}
