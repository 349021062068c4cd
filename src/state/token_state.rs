use crate::config::app_config::{AppConfig, CookieConfig};
use crate::repository::Repositories;
use crate::service::token_service::TokenService;
use std::sync::Arc;

#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
    pub cookie: CookieConfig,
}

impl TokenState {
    pub fn new(repos: &Repositories, config: &AppConfig) -> Self {
        Self {
            token_service: Arc::new(TokenService::new(&config.token, &repos.token_blacklist)),
            cookie: config.cookie.clone(),
        }
    }
}
