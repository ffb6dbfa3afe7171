//! Router tests covering public endpoints, token handling and role gates.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use tradepost_entity::user::UserRole;

#[tokio::test]
async fn test_version_is_public() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/version", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_search_requires_token() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/listings/search", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/dashboard", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new().await;
    let token = app.refresh_token();
    let response = app
        .request("GET", "/api/messages", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_client_cannot_open_admin_console() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let users = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(users.status, StatusCode::FORBIDDEN);

    let listings = app
        .request("GET", "/api/admin/listings", None, Some(&token))
        .await;
    assert_eq!(listings.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_backoffice_cannot_manage_users() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Backoffice]);
    let path = format!("/api/admin/users/{}/roles/admin", uuid::Uuid::new_v4());

    let response = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let category = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Vehicles" })),
            Some(&token),
        )
        .await;
    assert_eq!(category.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_toggle_rejects_unknown_role() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Admin]);
    let path = format!("/api/admin/users/{}/roles/superuser", uuid::Uuid::new_v4());

    let response = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revoked_admin_is_refused_on_next_request() {
    let app = TestApp::new().await;
    let (admin_id, token) = app.sign_in(&[UserRole::Admin, UserRole::Client]);
    let path = format!("/api/admin/users/{}/roles/superuser", uuid::Uuid::new_v4());

    // Passes the admin gate and fails on the role name.
    let before = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::BAD_REQUEST);

    app.roles.assign(admin_id, &[UserRole::Client]);

    let after = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_roles_are_not_trusted() {
    let app = TestApp::new().await;
    let (user_id, token) = app.sign_in(&[UserRole::Admin]);
    app.roles.assign(user_id, &[]);

    let response = app
        .request("GET", "/api/admin/users", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wizard_blocks_incomplete_first_step() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let response = app
        .request(
            "POST",
            "/api/listings/wizard/validate",
            Some(json!({ "step": 1, "draft": { "title": "   " } })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["can_proceed"], false);
    assert!(data["next_step"].is_null());
    assert_eq!(data["missing_fields"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_wizard_allows_complete_first_step() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let response = app
        .request(
            "POST",
            "/api/listings/wizard/validate",
            Some(json!({
                "step": 1,
                "draft": {
                    "category_id": uuid::Uuid::new_v4(),
                    "title": "CNC lathe"
                }
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["can_proceed"], true);
    assert_eq!(response.body["data"]["next_step"], 2);
}

#[tokio::test]
async fn test_wizard_rejects_unknown_step() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let response = app
        .request(
            "POST",
            "/api/listings/wizard/validate",
            Some(json!({ "step": 9 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_rejects_unknown_sort() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let response = app
        .request(
            "GET",
            "/api/listings/search?sort=cheapest",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "buyer@example.com",
                "password": "correct horse battery staple",
                "confirm_password": "correct horse battery stapler",
                "first_name": "Rui",
                "last_name": "Costa",
                "company_name": "Costa Lda"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Passwords don't match");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "buyer@example..com",
                "password": "correct horse battery staple",
                "confirm_password": "correct horse battery staple",
                "first_name": "Rui",
                "last_name": "Costa",
                "company_name": "Costa Lda"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please enter a valid email address");
}

#[tokio::test]
async fn test_delete_requires_reason() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);
    let path = format!("/api/listings/{}", uuid::Uuid::new_v4());

    let response = app
        .request("DELETE", &path, Some(json!({ "reason": "  " })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Please provide a reason for deletion"
    );
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token(&[UserRole::Client]);

    let response = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "listing_id": uuid::Uuid::new_v4(), "content": "   " })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Please enter a message");
}

#[tokio::test]
async fn test_media_from_unknown_bucket_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/media/other-bucket/a/b.png", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
