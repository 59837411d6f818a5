use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    errors::AppError,
    extractors::{AppJson, ClientIdentity},
    models::question::{SubmitAnswerRequest, SubmitAnswerResponse},
    services::{question_service::QuestionService, AppState},
};

/// GET /api/questions/today
pub async fn today(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let service = QuestionService::new(state.db.clone());
    let response = service.today().await?;
    Ok(Json(response))
}

/// POST /api/questions/answer
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    ClientIdentity(identity): ClientIdentity,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = QuestionService::new(state.db.clone());
    let correct = service.submit_answer(req, identity).await?;
    Ok(Json(SubmitAnswerResponse { ok: true, correct }))
}
