use serde::{Deserialize, Serialize};

pub mod game;
pub mod otp;
pub mod post;
pub mod question;
pub mod user;

pub use game::ScoreEntry;
pub use otp::OtpRecord;
pub use post::{Comment, Post};
pub use question::{AnswerAttempt, QuestionLeaderboardEntry, QuestionRecord};
pub use user::User;

/// The whole persisted state of the service. Read and written wholesale on
/// every operation; collections missing from an on-disk file load as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub otps: Vec<OtpRecord>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub game_scores: Vec<ScoreEntry>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub question_answers: Vec<AnswerAttempt>,
    #[serde(default)]
    pub question_leaderboard: Vec<QuestionLeaderboardEntry>,
}
