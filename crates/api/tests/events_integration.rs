//! Integration tests for event creation, listings, deletion and QR scan
//! check-in.
//!
//! Requires a PostgreSQL database (TEST_DATABASE_URL).

mod common;

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

async fn setup() -> (axum::Router, sqlx::PgPool) {
    let pool = common::create_test_pool().await;
    common::run_migrations(&pool).await;
    let app = common::create_test_app(common::test_config(), pool.clone());
    (app, pool)
}

/// Register a user and promote them to admin so they can own events.
async fn create_admin(app: &axum::Router, pool: &sqlx::PgPool) -> common::AuthenticatedUser {
    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(app, &user).await;
    common::promote_and_relogin(app, pool, &user, &auth, "admin").await
}

#[tokio::test]
async fn test_create_event_requires_organizer_role() {
    let (app, _pool) = setup().await;

    let user = common::TestUser::new();
    let auth = common::create_authenticated_user(&app, &user).await;

    let request = common::json_request_with_auth(
        Method::POST,
        "/api/v1/events",
        common::simple_event_body("Unauthorized Event"),
        &auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_event_issues_qr_code() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    let body = common::create_test_event(&app, &admin, common::simple_event_body("QR Event")).await;
    let qr_code = body["event"]["qr_code"].as_str().unwrap();
    assert!(qr_code.starts_with("EVT-"), "unexpected QR payload: {}", qr_code);
    assert_eq!(body["event"]["name"], "QR Event");
    assert_eq!(body["event"]["status"], "active");
}

#[tokio::test]
async fn test_free_event_price_normalized_to_zero() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    let body = common::create_test_event(
        &app,
        &admin,
        serde_json::json!({
            "name": "Free But Priced",
            "event_date": "2030-06-15",
            "event_time": "10:00:00",
            "is_free": true,
            "price": "25.50"
        }),
    )
    .await;

    assert_eq!(body["event"]["is_free"], true);
    assert_eq!(body["event"]["price"], "0");
}

#[tokio::test]
async fn test_paid_event_keeps_price() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    let body = common::create_test_event(
        &app,
        &admin,
        serde_json::json!({
            "name": "Paid Workshop",
            "event_date": "2030-06-15",
            "event_time": "10:00:00",
            "is_free": false,
            "price": "25.50"
        }),
    )
    .await;

    assert_eq!(body["event"]["is_free"], false);
    assert_eq!(body["event"]["price"], "25.50");

    // And it shows up in the paid listing
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/events/paid")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = common::parse_response_body(response).await;
    let event_id = body["event"]["id"].as_str().unwrap();
    assert!(listing
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"] == event_id));
}

#[tokio::test]
async fn test_recurring_event_materializes_instances() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    let body = common::create_test_event(
        &app,
        &admin,
        serde_json::json!({
            "name": "Weekly Standup",
            "event_date": "2030-06-03",
            "event_time": "09:00:00",
            "recurrence_pattern": "weekly",
            "recurrence_interval": 1,
            "recurrence_count": 3
        }),
    )
    .await;

    let parent_id = body["event"]["id"].as_str().unwrap();
    let instances = body["instances"].as_array().unwrap();
    assert_eq!(instances.len(), 3);

    let parent_qr = body["event"]["qr_code"].as_str().unwrap();
    for instance in instances {
        assert_eq!(instance["is_recurring_instance"], true);
        assert_eq!(instance["original_event_id"], parent_id);
        // Each occurrence carries its own check-in QR payload
        assert_ne!(instance["qr_code"].as_str().unwrap(), parent_qr);
    }
    assert_eq!(instances[0]["event_date"], "2030-06-10");
    assert_eq!(instances[1]["event_date"], "2030-06-17");
    assert_eq!(instances[2]["event_date"], "2030-06-24");
}

#[tokio::test]
async fn test_delete_event_owner_only() {
    let (app, pool) = setup().await;
    let owner = create_admin(&app, &pool).await;
    let other = create_admin(&app, &pool).await;

    let body =
        common::create_test_event(&app, &owner, common::simple_event_body("Owned Event")).await;
    let event_id = body["event"]["id"].as_str().unwrap();

    // Another admin cannot delete it
    let request = common::delete_request_with_auth(
        &format!("/api/v1/events/{}", event_id),
        &other.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner can
    let request = common::delete_request_with_auth(
        &format!("/api/v1/events/{}", event_id),
        &owner.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // And it is gone
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri(format!("/api/v1/events/{}", event_id))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_events_lists_only_own() {
    let (app, pool) = setup().await;
    let owner = create_admin(&app, &pool).await;
    let other = create_admin(&app, &pool).await;

    let body = common::create_test_event(&app, &owner, common::simple_event_body("Mine")).await;
    let event_id = body["event"]["id"].as_str().unwrap();
    common::create_test_event(&app, &other, common::simple_event_body("Theirs")).await;

    let request = common::get_request_with_auth("/api/v1/events/my", &owner.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = common::parse_response_body(response).await;
    let events = listing.as_array().unwrap();
    assert!(events.iter().any(|e| e["id"] == event_id));
    assert!(events.iter().all(|e| e["name"] != "Theirs"));
}

#[tokio::test]
async fn test_scan_rejects_wrong_qr_payload() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    let body = common::create_test_event(&app, &admin, common::simple_event_body("Scan Event")).await;
    let event_id = body["event"]["id"].as_str().unwrap();

    let attendee = common::TestUser::new();
    let attendee_auth = common::create_authenticated_user(&app, &attendee).await;

    let request = common::json_request_with_auth(
        Method::POST,
        &format!("/api/v1/events/{}/scan", event_id),
        serde_json::json!({ "qr_code": "EVT-not-the-right-one" }),
        &attendee_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_checks_in_approved_registration_once() {
    let (app, pool) = setup().await;
    let admin = create_admin(&app, &pool).await;

    // Auto-approved event so the attendee can check in right away
    let body = common::create_test_event(
        &app,
        &admin,
        serde_json::json!({
            "name": "Open Doors",
            "event_date": "2030-06-15",
            "event_time": "18:00:00",
            "requires_approval": false
        }),
    )
    .await;
    let event_id = body["event"]["id"].as_str().unwrap();
    let qr_code = body["event"]["qr_code"].as_str().unwrap();

    let attendee = common::TestUser::new();
    let attendee_auth = common::create_authenticated_user(&app, &attendee).await;

    // Pre-register (auto-approved)
    let request = common::json_request_with_auth(
        Method::POST,
        &format!("/api/v1/events/{}/pre-register", event_id),
        serde_json::json!({}),
        &attendee_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // First scan succeeds
    let request = common::json_request_with_auth(
        Method::POST,
        &format!("/api/v1/events/{}/scan", event_id),
        serde_json::json!({ "qr_code": qr_code }),
        &attendee_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let scan = common::parse_response_body(response).await;
    assert_eq!(scan["status"], "success");

    // Replay is rejected
    let request = common::json_request_with_auth(
        Method::POST,
        &format!("/api/v1/events/{}/scan", event_id),
        serde_json::json!({ "qr_code": qr_code }),
        &attendee_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The event appears in the attendee's attended list
    let request = common::get_request_with_auth(
        "/api/v1/users/me/attended-events",
        &attendee_auth.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let attended = common::parse_response_body(response).await;
    assert!(attended
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["event_id"] == event_id));
}
