use axum::{
    middleware,
    routing::{delete, get, patch, post},
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
    metrics_handler, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    trace_id, user_auth::require_user_auth, RateLimiterState,
};
use crate::routes::{checkin, guests, health, invitations, rsvp, weddings};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Rate limiting only guards the public surface; zero disables it.
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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

    // Guest-facing routes: no authentication, rate limited per client IP.
    let guest_routes = Router::new()
        .route("/api/public/v1/rsvp", post(rsvp::submit_rsvp))
        .route(
            "/api/public/v1/weddings/:wedding_id/check-in",
            post(checkin::check_in_guest),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Owner-facing routes: require a valid owner JWT.
    let owner_routes = Router::new()
        .route("/api/v1/weddings", post(weddings::create_wedding))
        .route("/api/v1/weddings", get(weddings::list_weddings))
        .route("/api/v1/weddings/:wedding_id", get(weddings::get_wedding))
        .route(
            "/api/v1/weddings/:wedding_id",
            delete(weddings::delete_wedding),
        )
        .route(
            "/api/v1/weddings/:wedding_id/guests",
            get(guests::list_guests),
        )
        .route(
            "/api/v1/weddings/:wedding_id/guests",
            post(guests::create_guest),
        )
        .route("/api/v1/guests/:guest_id", patch(guests::update_guest))
        .route("/api/v1/guests/:guest_id", delete(guests::delete_guest))
        .route(
            "/api/v1/guests/:guest_id/invitation",
            post(invitations::issue_invitation),
        )
        .route(
            "/api/v1/weddings/:wedding_id/invitations",
            post(invitations::issue_invitations_batch),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Health and metrics: no authentication, no rate limiting.
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(guest_routes)
        .merge(owner_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
