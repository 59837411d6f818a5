use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::metrics::record_answer_submitted;
use crate::models::question::{
    AnswerAttempt, QuestionLeaderboardEntry, SubmitAnswerRequest, TodayResponse,
};
use crate::services::score_service::DEFAULT_PLAYER_NAME;
use crate::storage::Database;
use crate::utils::{text::normalize_answer, time::day_index_for};

/// Daily question gate: one deterministic question per calendar day, at most
/// one answer per identity per day.
pub struct QuestionService {
    db: Database,
}

impl QuestionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Today's question: day-of-year modulo pool size. Returns the prompt
    /// only; the expected answer never leaves the service.
    pub async fn today(&self) -> Result<TodayResponse, AppError> {
        let doc = self.db.read().await?;
        if doc.questions.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "question pool is empty"
            )));
        }

        let idx = day_index_for(Utc::now().date_naive(), doc.questions.len());

        Ok(TodayResponse {
            day_index: idx,
            question: doc.questions[idx].prompt.clone(),
        })
    }

    /// Record the identity's answer for a day. The duplicate check, the
    /// correctness judgement and the appends happen inside one locked
    /// read-modify-write cycle, so two racing submissions for the same
    /// (day, identity) pair cannot both pass the gate.
    pub async fn submit_answer(
        &self,
        req: SubmitAnswerRequest,
        identity: String,
    ) -> Result<bool, AppError> {
        let (day_index, answer) = match (req.day_index, req.answer) {
            (Some(day_index), Some(answer)) => (day_index, answer),
            _ => return Err(AppError::validation("dayIndex and answer required")),
        };
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        let correct = self
            .db
            .update::<_, AppError, _>(move |doc| {
                let already_answered = doc
                    .question_answers
                    .iter()
                    .any(|a| a.day_index == day_index && a.ip == identity);
                if already_answered {
                    return Err(AppError::DuplicateAttempt);
                }

                let question = doc
                    .questions
                    .get(day_index)
                    .ok_or_else(|| AppError::validation("unknown dayIndex"))?;

                let correct = normalize_answer(&answer) == normalize_answer(&question.answer);
                let now = Utc::now();

                doc.question_answers.push(AnswerAttempt {
                    id: Uuid::new_v4().to_string(),
                    day_index,
                    answer,
                    ip: identity.clone(),
                    correct,
                    submitted_at: now,
                });

                if correct {
                    doc.question_leaderboard.push(QuestionLeaderboardEntry {
                        id: Uuid::new_v4().to_string(),
                        name,
                        day_index,
                        ip: identity,
                        submitted_at: now,
                    });
                }

                Ok(correct)
            })
            .await?;

        record_answer_submitted(correct);

        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, QuestionRecord};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn service_with_pool(pool: Vec<(&str, &str)>) -> QuestionService {
        let doc = Document {
            questions: pool
                .into_iter()
                .map(|(q, a)| QuestionRecord {
                    prompt: q.to_string(),
                    answer: a.to_string(),
                })
                .collect(),
            ..Document::default()
        };
        QuestionService::new(Database::new(Arc::new(MemoryStore::with_document(doc))))
    }

    fn answer_req(day_index: usize, answer: &str) -> SubmitAnswerRequest {
        SubmitAnswerRequest {
            day_index: Some(day_index),
            answer: Some(answer.to_string()),
            name: None,
        }
    }

    #[tokio::test]
    async fn today_is_stable_within_a_day() {
        let service = service_with_pool(vec![("q0", "a0"), ("q1", "a1"), ("q2", "a2")]);
        let first = service.today().await.unwrap();
        let second = service.today().await.unwrap();
        assert_eq!(first.day_index, second.day_index);
        assert_eq!(first.question, second.question);
    }

    #[tokio::test]
    async fn correct_answer_lands_on_question_leaderboard() {
        let service = service_with_pool(vec![("capital of Japan?", "tokyo")]);

        let correct = service
            .submit_answer(answer_req(0, "Tokyo "), "1.2.3.4".into())
            .await
            .unwrap();
        assert!(correct);

        let doc = service.db.read().await.unwrap();
        assert_eq!(doc.question_answers.len(), 1);
        assert_eq!(doc.question_leaderboard.len(), 1);
        assert_eq!(doc.question_leaderboard[0].name, "Player");
    }

    #[tokio::test]
    async fn incorrect_answer_is_recorded_without_leaderboard_entry() {
        let service = service_with_pool(vec![("capital of Japan?", "tokyo")]);

        let correct = service
            .submit_answer(answer_req(0, "osaka"), "1.2.3.4".into())
            .await
            .unwrap();
        assert!(!correct);

        let doc = service.db.read().await.unwrap();
        assert_eq!(doc.question_answers.len(), 1);
        assert!(!doc.question_answers[0].correct);
        assert!(doc.question_leaderboard.is_empty());
    }

    #[tokio::test]
    async fn second_attempt_for_same_day_and_identity_is_rejected() {
        let service = service_with_pool(vec![("capital of Japan?", "tokyo")]);

        service
            .submit_answer(answer_req(0, "tokyo"), "1.2.3.4".into())
            .await
            .unwrap();

        let second = service
            .submit_answer(answer_req(0, "tokyo"), "1.2.3.4".into())
            .await;
        assert!(matches!(second, Err(AppError::DuplicateAttempt)));

        // original attempt preserved, still exactly one leaderboard entry
        let doc = service.db.read().await.unwrap();
        assert_eq!(doc.question_answers.len(), 1);
        assert!(doc.question_answers[0].correct);
        assert_eq!(doc.question_leaderboard.len(), 1);
    }

    #[tokio::test]
    async fn distinct_identities_pass_the_gate_independently() {
        let service = service_with_pool(vec![("capital of Japan?", "tokyo")]);

        service
            .submit_answer(answer_req(0, "tokyo"), "1.2.3.4".into())
            .await
            .unwrap();
        let other = service
            .submit_answer(answer_req(0, "tokyo"), "5.6.7.8".into())
            .await
            .unwrap();
        assert!(other);
    }

    #[tokio::test]
    async fn accented_answer_matches_unaccented_expectation() {
        let service = service_with_pool(vec![("apple in Vietnamese?", "táo")]);

        let correct = service
            .submit_answer(answer_req(0, "tao"), "1.2.3.4".into())
            .await
            .unwrap();
        assert!(correct);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_without_side_effects() {
        let service = service_with_pool(vec![("q", "a")]);

        let res = service
            .submit_answer(
                SubmitAnswerRequest {
                    day_index: None,
                    answer: Some("a".into()),
                    name: None,
                },
                "1.2.3.4".into(),
            )
            .await;
        assert!(matches!(res, Err(AppError::Validation(_))));

        let doc = service.db.read().await.unwrap();
        assert!(doc.question_answers.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_day_index_is_rejected() {
        let service = service_with_pool(vec![("q", "a")]);

        let res = service
            .submit_answer(answer_req(7, "a"), "1.2.3.4".into())
            .await;
        assert!(matches!(res, Err(AppError::Validation(_))));
    }
}
