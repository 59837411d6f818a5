use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    errors::AppError,
    extractors::AppJson,
    models::game::{LeaderboardQuery, SubmitScoreRequest},
    services::{score_service::ScoreService, AppState},
};

/// POST /api/game/submit
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SubmitScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = ScoreService::new(state.db.clone(), state.events.clone());
    service.submit(req).await?;
    Ok(Json(json!({ "ok": true })))
}

/// GET /api/game/leaderboard?game=
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = ScoreService::new(state.db.clone(), state.events.clone());
    let entries = service.leaderboard(query.game.as_deref()).await?;
    Ok(Json(entries))
}
