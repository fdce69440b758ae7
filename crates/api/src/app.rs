use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_user_auth, security_headers_middleware, trace_id,
};
use crate::routes::{
    admin_reports, auth, events, health, organizers, registrations, support, system_settings,
    users,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Protected routes (require a valid user JWT). The auth middleware
    // validates the token once and stores it in request extensions; handlers
    // then authorize on the role claim.
    let protected_routes = Router::new()
        // Auth routes requiring an existing session
        .route("/api/v1/auth/me", get(users::me))
        .route("/api/v1/auth/register-admin", post(auth::register_admin))
        .route(
            "/api/v1/auth/register-system-owner",
            post(auth::register_system_owner),
        )
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/auth/deactivate", post(auth::deactivate))
        // User routes
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/me", get(users::me).put(users::update_me))
        .route(
            "/api/v1/users/me/attended-events",
            get(users::attended_events),
        )
        .route(
            "/api/v1/users/me/attendance-stats",
            get(users::attendance_stats),
        )
        // Organizer routes
        .route(
            "/api/v1/organizers/by-user/:user_id",
            get(organizers::get_organizer_by_user),
        )
        .route(
            "/api/v1/organizers/:organizer_id",
            put(organizers::update_organizer).delete(organizers::deactivate_organizer),
        )
        .route(
            "/api/v1/organizers/:organizer_id/enroll",
            post(users::enroll).delete(users::unenroll),
        )
        // Event routes
        .route("/api/v1/events", post(events::create_event))
        .route("/api/v1/events/my", get(events::my_events))
        .route("/api/v1/events/:event_id", delete(events::delete_event))
        .route("/api/v1/events/:event_id/scan", post(events::scan_event))
        // Registration routes
        .route(
            "/api/v1/events/:event_id/pre-register",
            post(registrations::pre_register),
        )
        .route(
            "/api/v1/events/:event_id/registration-status",
            get(registrations::registration_status),
        )
        .route(
            "/api/v1/events/:event_id/registration",
            delete(registrations::cancel_registration),
        )
        .route(
            "/api/v1/events/:event_id/registrations",
            get(registrations::list_event_registrations),
        )
        .route(
            "/api/v1/events/:event_id/registrations/pending",
            get(registrations::list_pending_registrations),
        )
        .route(
            "/api/v1/registrations/my",
            get(registrations::my_registrations),
        )
        .route(
            "/api/v1/registrations/verify-code",
            post(registrations::verify_code),
        )
        .route(
            "/api/v1/registrations/:registration_id/approve",
            post(registrations::approve_registration),
        )
        .route(
            "/api/v1/registrations/:registration_id/disapprove",
            post(registrations::disapprove_registration),
        )
        // Admin report routes
        .route(
            "/api/v1/admin/reports/events",
            get(admin_reports::events_report),
        )
        .route(
            "/api/v1/admin/reports/monthly",
            get(admin_reports::monthly_summary),
        )
        .route(
            "/api/v1/admin/reports/events/:event_id/attendance",
            get(admin_reports::attendance_details),
        )
        // System settings (writes only; reads are public)
        .route("/api/v1/settings", put(system_settings::update_settings))
        // Support routes
        .route("/api/v1/support", post(support::create_ticket))
        .route("/api/v1/support/my", get(support::my_tickets))
        // Auth runs before every protected handler
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        // Account entry points
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/reactivate", post(auth::reactivate))
        // Event browsing
        .route("/api/v1/events", get(events::list_events))
        .route("/api/v1/events/free", get(events::list_free_events))
        .route("/api/v1/events/paid", get(events::list_paid_events))
        .route("/api/v1/events/:event_id", get(events::get_event))
        .route(
            "/api/v1/events/:event_id/registrations/approved",
            get(registrations::list_approved_registrations),
        )
        // Organizer browsing
        .route("/api/v1/organizers", get(organizers::list_organizers))
        .route(
            "/api/v1/organizers/:organizer_id",
            get(organizers::get_organizer),
        )
        // Branding for the login screen
        .route("/api/v1/settings", get(system_settings::get_settings));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware)) // Security headers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state)
}
