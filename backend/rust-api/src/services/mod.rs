use std::sync::Arc;

use crate::config::Config;
use crate::middlewares::rate_limit::RateLimiter;
use crate::storage::{Database, Storage};

pub mod auth_service;
pub mod email_service;
pub mod event_bus;
pub mod post_service;
pub mod profanity;
pub mod question_seed;
pub mod question_service;
pub mod score_service;

pub use event_bus::{AppEvent, EventBus};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub events: EventBus,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            config,
            db: Database::new(storage),
            events: EventBus::default(),
            rate_limiter: RateLimiter::new(),
        }
    }
}
