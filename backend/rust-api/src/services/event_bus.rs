use tokio::sync::broadcast;

use crate::models::Comment;

/// Events pushed to connected real-time subscribers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Pure signal, no payload; consumers re-fetch the leaderboard.
    LeaderboardUpdate,
    /// A new comment for one post's room.
    Comment { comment: Comment },
}

impl AppEvent {
    /// Wire-level event name, kept identical to the original transport.
    pub fn event_name(&self) -> &'static str {
        match self {
            AppEvent::LeaderboardUpdate => "leaderboard:update",
            AppEvent::Comment { .. } => "message",
        }
    }
}

/// Broadcast fan-out to every connected subscriber. Sending never blocks and
/// never fails the mutation that triggered it; with no subscribers the event
/// is simply dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn emit(&self, event: AppEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("no event subscribers connected: {}", e);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
