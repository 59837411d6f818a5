use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::{
    errors::AppError,
    services::{AppEvent, AppState},
};

/// GET /api/events - leaderboard update signals for every subscriber.
pub async fn event_stream(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.events.subscribe();
    Sse::new(subscriber_stream(rx, None)).keep_alive(KeepAlive::default())
}

/// GET /api/posts/{id}/stream - the comment room for one post.
pub async fn post_stream(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = state.db.read().await?;
    if !doc.posts.iter().any(|p| p.id == post_id) {
        return Err(AppError::NotFound("post"));
    }

    tracing::info!("Client joined comment room: post={}", post_id);

    let rx = state.events.subscribe();
    Ok(Sse::new(subscriber_stream(rx, Some(post_id))).keep_alive(KeepAlive::default()))
}

/// Turn a broadcast subscription into an SSE stream. With a room the stream
/// carries only that post's comments; without one it carries only the
/// leaderboard signal.
fn subscriber_stream(
    rx: broadcast::Receiver<AppEvent>,
    room: Option<String>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold((rx, room), |(mut rx, room)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let wanted = match (&event, &room) {
                        (AppEvent::Comment { comment }, Some(id)) => comment.post_id == *id,
                        (AppEvent::LeaderboardUpdate, None) => true,
                        _ => false,
                    };
                    if !wanted {
                        continue;
                    }

                    let sse_event = match &event {
                        // pure signal, consumers re-fetch on receipt
                        AppEvent::LeaderboardUpdate => {
                            Event::default().event(event.event_name()).data("")
                        }
                        AppEvent::Comment { comment } => Event::default()
                            .event(event.event_name())
                            .data(serde_json::to_string(comment).unwrap_or_default()),
                    };

                    return Some((Ok(sse_event), (rx, room)));
                }
                // a slow consumer skips what it missed and keeps listening
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("event subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}
