use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::metrics::POSTS_CREATED_TOTAL;
use crate::models::post::{Comment, CreateCommentRequest, CreatePostRequest, Post};
use crate::services::profanity::ProfanityFilter;
use crate::services::{AppEvent, EventBus};
use crate::storage::Database;

/// How many of the newest posts a feed read returns.
pub const FEED_SIZE: usize = 100;

const DEFAULT_COMMENTER: &str = "Guest";

/// Text/image post feed with real-time comment rooms. All user-supplied text
/// passes through the profanity filter before it is stored.
pub struct PostService {
    db: Database,
    events: EventBus,
    filter: ProfanityFilter,
}

impl PostService {
    pub fn new(db: Database, events: EventBus) -> Self {
        Self {
            db,
            events,
            filter: ProfanityFilter::new(),
        }
    }

    pub async fn create_post(
        &self,
        user_id: &str,
        req: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let content = req.content.unwrap_or_default();
        let clean = self.filter.clean(&content);
        let filtered = clean != content;

        let post = Post {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: clean,
            images: req.images.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let stored = post.clone();
        self.db
            .update::<_, AppError, _>(move |doc| {
                doc.posts.push(stored);
                Ok(())
            })
            .await?;

        POSTS_CREATED_TOTAL
            .with_label_values(&[if filtered { "true" } else { "false" }])
            .inc();

        Ok(post)
    }

    /// Newest `FEED_SIZE` posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let doc = self.db.read().await?;
        Ok(doc.posts.into_iter().rev().take(FEED_SIZE).collect())
    }

    /// Store a comment and broadcast it to the post's room.
    pub async fn add_comment(
        &self,
        post_id: &str,
        req: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        let text = req
            .text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("text required"))?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            post_id: post_id.to_string(),
            user_name: req
                .user_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_COMMENTER.to_string()),
            text: self.filter.clean(&text),
            created_at: Utc::now(),
        };

        let stored = comment.clone();
        let wanted_post = post_id.to_string();
        self.db
            .update::<_, AppError, _>(move |doc| {
                if !doc.posts.iter().any(|p| p.id == wanted_post) {
                    return Err(AppError::NotFound("post"));
                }
                doc.comments.push(stored);
                Ok(())
            })
            .await?;

        self.events.emit(AppEvent::Comment {
            comment: comment.clone(),
        });

        Ok(comment)
    }
}
