use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::metrics::record_score_submitted;
use crate::models::game::{ScoreEntry, SubmitScoreRequest};
use crate::services::{AppEvent, EventBus};
use crate::storage::Database;

/// The stored ledger never grows past this many entries.
pub const MAX_STORED_SCORES: usize = 200;
/// How many entries a leaderboard read returns.
pub const LEADERBOARD_SIZE: usize = 20;

pub const DEFAULT_GAME: &str = "number";
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Append/sort/truncate-maintained score ledger. Sorting happens on write so
/// reads are a plain slice of the stored collection.
pub struct ScoreService {
    db: Database,
    events: EventBus,
}

impl ScoreService {
    pub fn new(db: Database, events: EventBus) -> Self {
        Self { db, events }
    }

    pub async fn submit(&self, req: SubmitScoreRequest) -> Result<(), AppError> {
        let score = req
            .score
            .ok_or_else(|| AppError::validation("score required"))?;

        let entry = ScoreEntry {
            id: Uuid::new_v4().to_string(),
            name: req
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
            score,
            game: req
                .game
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| DEFAULT_GAME.to_string()),
            submitted_at: Utc::now(),
        };
        let game = entry.game.clone();

        self.db
            .update::<_, AppError, _>(move |doc| {
                doc.game_scores.push(entry);
                sort_ledger(&mut doc.game_scores);
                doc.game_scores.truncate(MAX_STORED_SCORES);
                Ok(())
            })
            .await?;

        record_score_submitted(&game);
        self.events.emit(AppEvent::LeaderboardUpdate);

        Ok(())
    }

    /// Top entries, optionally restricted to one game tag. Entries stored
    /// with an empty tag count as the default game.
    pub async fn leaderboard(&self, game: Option<&str>) -> Result<Vec<ScoreEntry>, AppError> {
        let doc = self.db.read().await?;

        let entries = doc
            .game_scores
            .into_iter()
            .filter(|entry| match game {
                Some(wanted) => effective_game(entry) == wanted,
                None => true,
            })
            .take(LEADERBOARD_SIZE)
            .collect();

        Ok(entries)
    }
}

fn effective_game(entry: &ScoreEntry) -> &str {
    if entry.game.is_empty() {
        DEFAULT_GAME
    } else {
        &entry.game
    }
}

/// Score descending; equal scores rank the earlier submission first. The sort
/// is stable, so entries submitted within the same millisecond keep their
/// submission order as well.
fn sort_ledger(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
    });
}
