use std::sync::Arc;

use chrono::{DateTime, Utc};

use docsift_core::AppConfig;
use docsift_extraction::ExtractionDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Arc<ExtractionDispatcher>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, dispatcher: ExtractionDispatcher) -> Self {
        Self {
            config,
            dispatcher: Arc::new(dispatcher),
            started_at: Utc::now(),
        }
    }

    /// State wired to the production engines.
    pub fn from_config(config: AppConfig) -> Self {
        let dispatcher = ExtractionDispatcher::from_config(&config);
        Self::new(config, dispatcher)
    }
}
