use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the fixed question pool. Seeded at startup, never mutated at
/// runtime. Field names follow the persisted document (`q`/`a`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "q")]
    pub prompt: String,
    #[serde(rename = "a")]
    pub answer: String,
}

/// A recorded answer for one (day index, identity) pair. At most one exists
/// per pair; never updated or removed once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAttempt {
    pub id: String,
    #[serde(rename = "dayIndex")]
    pub day_index: usize,
    pub answer: String,
    pub ip: String,
    pub correct: bool,
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

/// Created alongside a correct attempt, never alongside an incorrect one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionLeaderboardEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "dayIndex")]
    pub day_index: usize,
    pub ip: String,
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    #[serde(rename = "dayIndex")]
    pub day_index: usize,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(rename = "dayIndex")]
    pub day_index: Option<usize>,
    pub answer: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub ok: bool,
    pub correct: bool,
}
