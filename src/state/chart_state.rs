use crate::config::app_config::AppConfig;
use crate::repository::Repositories;
use crate::service::chart_service::ChartService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartState {
    pub chart_service: Arc<ChartService>,
}

impl ChartState {
    pub fn new(repos: &Repositories, config: &AppConfig) -> Self {
        Self {
            chart_service: Arc::new(ChartService::new(repos, &config.chart)),
        }
    }
}
