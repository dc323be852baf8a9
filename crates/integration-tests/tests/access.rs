//! Integration tests for registration, credentials, and role gates.
//!
//! These tests require:
//! - A running `PostgreSQL` database with `schema.sql` applied
//! - The server running (cargo run -p stockroom-server)
//!
//! Run with: cargo test -p stockroom-integration-tests -- --ignored
//!
//! Accounts created through open registration always hold the default
//! role, so the admin-gated endpoints are only checked for rejection.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("STOCKROOM_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Register a fresh account and return its credential pair.
async fn register_account(client: &Client) -> (String, String) {
    let username = format!("it-{}", Uuid::new_v4());
    let password = "integration-secret".to_string();

    let resp = client
        .post(format!("{}/api/users", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to register account");
    assert_eq!(resp.status(), StatusCode::CREATED);

    (username, password)
}

// ============================================================================
// Registration & Credential Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_registered_credentials_authenticate() {
    let client = Client::new();
    let (username, password) = register_account(&client).await;

    let resp = client
        .get(format!("{}/api/products", base_url()))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_wrong_password_rejected() {
    let client = Client::new();
    let (username, _) = register_account(&client).await;

    let resp = client
        .get(format!("{}/api/products", base_url()))
        .basic_auth(&username, Some("not-the-password"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_duplicate_username_conflict() {
    let client = Client::new();
    let (username, _) = register_account(&client).await;

    let resp = client
        .post(format!("{}/api/users", base_url()))
        .json(&json!({ "username": username, "password": "another-secret" }))
        .send()
        .await
        .expect("Failed to send duplicate registration");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_empty_username_rejected() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/api/users", base_url()))
        .json(&json!({ "username": "", "password": "secret" }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Role Gate Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_user_listing_needs_admin_role() {
    let client = Client::new();
    let (username, password) = register_account(&client).await;

    let resp = client
        .get(format!("{}/api/users", base_url()))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to request user listing");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_role_surface_needs_admin_role() {
    let client = Client::new();
    let (username, password) = register_account(&client).await;
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/roles"))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to request role listing");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .post(format!("{base_url}/api/roles"))
        .basic_auth(&username, Some(&password))
        .json(&json!({ "name": format!("it-role-{}", Uuid::new_v4()) }))
        .send()
        .await
        .expect("Failed to send role create");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Account Deletion Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_delete_own_account() {
    let client = Client::new();
    let (username, password) = register_account(&client).await;
    let base_url = base_url();

    let body: Value = client
        .delete(format!("{base_url}/api/users/me"))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to delete account")
        .json()
        .await
        .expect("Failed to parse delete response");
    assert_eq!(body.get("deleted"), Some(&Value::Bool(true)));

    // The pair no longer authenticates.
    let resp = client
        .get(format!("{base_url}/api/products"))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires a running stockroom server and database"]
async fn test_delete_needs_matching_password() {
    let client = Client::new();
    let (username, password) = register_account(&client).await;
    let base_url = base_url();

    let resp = client
        .delete(format!("{base_url}/api/users/me"))
        .basic_auth(&username, Some("not-the-password"))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The account survives a failed attempt.
    let resp = client
        .get(format!("{base_url}/api/products"))
        .basic_auth(&username, Some(&password))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::OK);
}
