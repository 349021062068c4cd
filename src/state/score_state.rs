use crate::config::app_config::AppConfig;
use crate::repository::Repositories;
use crate::service::score_service::ScoreService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScoreState {
    pub score_service: Arc<ScoreService>,
}

impl ScoreState {
    pub fn new(repos: &Repositories, config: &AppConfig) -> Self {
        Self {
            score_service: Arc::new(ScoreService::new(repos, &config.chart)),
        }
    }
}
