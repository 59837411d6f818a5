use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: std::sync::Arc<services::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        // Operational endpoints
        .route("/api/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        // Auth endpoints (mixed: some public, some protected)
        .nest("/api/auth", auth_routes(app_state.clone()))
        .route(
            "/api/me",
            get(handlers::auth::get_current_user).route_layer(middleware::from_fn_with_state(
                app_state.clone(),
                middlewares::auth::auth_middleware,
            )),
        )
        // Community feed
        .nest("/api/posts", post_routes(app_state.clone()))
        // Score ledger
        .route("/api/game/submit", post(handlers::game::submit_score))
        .route("/api/game/leaderboard", get(handlers::game::get_leaderboard))
        // Daily question gate
        .route("/api/questions/today", get(handlers::questions::today))
        .route("/api/questions/answer", post(handlers::questions::submit_answer))
        // Real-time subscribers
        .route("/api/events", get(handlers::events::event_stream))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            middlewares::rate_limit::rate_limit_middleware,
        ))
        .with_state(app_state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn auth_routes(
    app_state: std::sync::Arc<services::AppState>,
) -> Router<std::sync::Arc<services::AppState>> {
    // OTP issuance gets a stricter window than the global limiter
    let request_otp_route = Router::new()
        .route("/request-otp", post(handlers::auth::request_otp))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            middlewares::rate_limit::otp_rate_limit_middleware,
        ));

    let verify_otp_route = Router::new().route("/verify-otp", post(handlers::auth::verify_otp));

    request_otp_route.merge(verify_otp_route)
}

fn post_routes(
    app_state: std::sync::Arc<services::AppState>,
) -> Router<std::sync::Arc<services::AppState>> {
    // Creating a post requires a verified user; reading and commenting don't
    let protected = Router::new()
        .route("/", post(handlers::posts::create_post))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            middlewares::auth::auth_middleware,
        ));

    let public = Router::new()
        .route("/", get(handlers::posts::list_posts))
        .route("/{id}/comments", post(handlers::posts::create_comment))
        .route("/{id}/stream", get(handlers::events::post_stream));

    protected.merge(public)
}
