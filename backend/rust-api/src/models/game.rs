use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single leaderboard entry. Immutable once written; the collection as a
/// whole is re-sorted and truncated on every submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub game: String,
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub name: Option<String>,
    pub score: Option<f64>,
    pub game: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub game: Option<String>,
}
