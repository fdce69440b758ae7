//! Integration tests for the authentication endpoints.
//!
//! Requires a PostgreSQL database (TEST_DATABASE_URL).

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    assert!(!auth.user_id.is_empty());
    assert_eq!(auth.email, user.email);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    common::create_authenticated_user(&app, &user).await;

    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": user.email,
            "password": user.password,
            "first_name": "Other",
            "last_name": "Person"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    common::create_authenticated_user(&app, &user).await;

    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/login",
        serde_json::json!({
            "email": user.email,
            "password": "wrong-password"
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/me")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    let request = common::get_request_with_auth("/api/v1/auth/me", &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::parse_response_body(response).await;
    assert_eq!(body["email"], user.email);
    assert_eq!(body["first_name"], user.first_name);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_deactivated_login_flow() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    // Deactivate the account
    let request = common::request_with_auth(
        Method::POST,
        "/api/v1/auth/deactivate",
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Login now fails with the deactivated marker
    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/login",
        serde_json::json!({ "email": user.email, "password": user.password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["is_deactivated"], true);

    // Reactivation with the password restores access
    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/reactivate",
        serde_json::json!({ "email": user.email, "password": user.password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/login",
        serde_json::json!({ "email": user.email, "password": user.password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_flow() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    let new_password = "EvenM0reSecure!pw";
    let request = common::json_request_with_auth(
        Method::POST,
        "/api/v1/auth/change-password",
        serde_json::json!({
            "current_password": user.password,
            "new_password": new_password
        }),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works
    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/login",
        serde_json::json!({ "email": user.email, "password": user.password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New password does
    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/login",
        serde_json::json!({ "email": user.email, "password": new_password }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_issues_new_tokens() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": auth.refresh_token }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::parse_response_body(response).await;
    let new_access = body["access_token"].as_str().unwrap();
    assert!(!new_access.is_empty());

    // The refreshed token authenticates
    let request = common::get_request_with_auth("/api/v1/auth/me", new_access);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    let request = common::json_request(
        Method::POST,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": auth.access_token }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_admin_requires_system_owner() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    // A regular user cannot register staff
    let candidate = common::TestUser::new();
    let request = common::json_request_with_auth(
        Method::POST,
        "/api/v1/auth/register-admin",
        serde_json::json!({
            "email": candidate.email,
            "password": candidate.password,
            "first_name": candidate.first_name,
            "last_name": candidate.last_name,
            "organization_name": "Test Org"
        }),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_admin_creates_organizer_profile() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    let owner = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &owner).await;
    let owner_auth =
        common::promote_and_relogin(&app, &pool, &owner, &auth, "system_owner").await;

    let candidate = common::TestUser::new();
    let request = common::json_request_with_auth(
        Method::POST,
        "/api/v1/auth/register-admin",
        serde_json::json!({
            "email": candidate.email,
            "password": candidate.password,
            "first_name": candidate.first_name,
            "last_name": candidate.last_name,
            "organization_name": "Candidate Org"
        }),
        &owner_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::parse_response_body(response).await;
    assert_eq!(body["user"]["role"], "admin");
    let admin_id = body["user"]["id"].as_str().unwrap();
    let admin_token = body["access_token"].as_str().unwrap();

    // The admin received an organizer profile
    let request = common::get_request_with_auth(
        &format!("/api/v1/organizers/by-user/{}", admin_id),
        admin_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let organizer = common::parse_response_body(response).await;
    assert_eq!(organizer["organization_name"], "Candidate Org");
}

#[tokio::test]
async fn test_health_endpoints() {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());

    for uri in ["/api/health", "/api/health/live", "/api/health/ready"] {
        let request = axum::http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {} failed", uri);
    }
}
