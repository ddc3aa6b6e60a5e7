use crate::config::Config;
use crate::source::ContributionSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn ContributionSource>,
}

impl AppState {
    pub fn new(config: Config, source: impl ContributionSource + 'static) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }
}
