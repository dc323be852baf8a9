//! User API routes.
//!
//! Registration is open and always assigns the default role; privileged
//! roles are granted by an administrator through the roles surface and
//! direct database access, never by self-service.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::{RequireAdmin, auth::decode_basic};
use crate::models::UserAccount;
use crate::routes::access;
use crate::services::access::{AccessError, DEFAULT_ROLE};
use crate::state::AppState;

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(register))
        .route("/api/users/me", axum::routing::delete(delete_own_account))
}

/// Registration request body.
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct DeleteUserResponse {
    deleted: bool,
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<StatusCode> {
    access(&state)
        .register_user(&request.username, &request.password, DEFAULT_ROLE)
        .await?;
    Ok(StatusCode::CREATED)
}

async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserAccount>>> {
    Ok(Json(access(&state).list_users().await?))
}

/// Delete the account named by the request's own Basic credentials.
///
/// The service re-authenticates the pair before deleting, so a stolen
/// username alone cannot remove an account.
async fn delete_own_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DeleteUserResponse>> {
    let (username, password) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
        .ok_or(AccessError::InvalidCredentials)?;

    let deleted = access(&state).delete_user(&username, &password).await?;
    Ok(Json(DeleteUserResponse { deleted }))
}
