use axum::{
    middleware,
    routing::{get, patch, post},
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
    trace_id, RateLimiterState,
};
use crate::routes::{checkin, churches, districts, health, registrations, reports};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Create rate limiter if rate limiting is enabled (rate_limit_per_minute > 0)
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

    // The public registration form is the only surface open to the whole
    // internet, so it gets its own per-client rate limit.
    let registration_form_routes = Router::new()
        .route(
            "/api/v1/registrations",
            post(registrations::create_registration),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Management and gate routes
    let event_routes = Router::new()
        // District routes (v1)
        .route("/api/v1/districts", get(districts::list_districts))
        .route("/api/v1/districts", post(districts::create_district))
        // Church routes (v1)
        .route("/api/v1/churches", get(churches::list_churches))
        .route("/api/v1/churches", post(churches::create_church))
        // Registration routes (v1)
        .route("/api/v1/registrations", get(registrations::list_registrations))
        .route(
            "/api/v1/registrations/stats",
            get(registrations::registration_stats),
        )
        .route(
            "/api/v1/registrations/:id/payment",
            patch(registrations::update_payment),
        )
        // Check-in routes (v1)
        .route("/api/v1/checkin/:token", get(checkin::lookup_checkin))
        .route(
            "/api/v1/checkin/:token/confirm",
            post(checkin::confirm_checkin),
        )
        // Report routes (v1)
        .route(
            "/api/v1/reports/registrations",
            get(reports::registrations_report),
        )
        .route("/api/v1/reports/checkin", get(reports::checkin_report));

    // Public operational routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(registration_form_routes)
        .merge(event_routes)
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
