use std::sync::Arc;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            http: reqwest::Client::new(),
        })
    }
}
