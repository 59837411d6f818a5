use axum::Router;
use std::sync::Arc;

use commons_api::{
    config::Config,
    create_router,
    middlewares::auth::JwtService,
    models::Document,
    services::{question_seed, AppState},
    storage::MemoryStore,
};

/// Router plus its state, backed by an in-memory store with the question
/// pool pre-seeded. Every test gets an isolated instance.
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let doc = Document {
        questions: question_seed::default_pool(),
        ..Document::default()
    };

    let config = Config::for_tests();
    let storage = Arc::new(MemoryStore::with_document(doc));
    let app_state = Arc::new(AppState::new(config, storage));

    (create_router(app_state.clone()), app_state)
}

/// Bearer token accepted by the test app's auth middleware.
#[allow(dead_code)]
pub fn auth_token_for(state: &AppState, user_id: &str, email: &str) -> String {
    JwtService::new(&state.config.jwt_secret)
        .issue_for(user_id, email)
        .expect("failed to issue test token")
}
