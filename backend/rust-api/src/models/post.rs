use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub content: String,
    pub images: Vec<String>,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "postId")]
    pub post_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub text: String,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub ok: bool,
    pub post: Post,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    pub text: Option<String>,
}
