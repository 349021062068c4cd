use crate::config::app_config::CookieConfig;
use crate::repository::Repositories;
use crate::service::auth_service::AuthService;
use crate::state::token_state::TokenState;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
    pub cookie: CookieConfig,
}

impl AuthState {
    /// 与鉴权中间件共用同一个 TokenService
    pub fn new(repos: &Repositories, token_state: &TokenState) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repos, &token_state.token_service)),
            cookie: token_state.cookie.clone(),
        }
    }
}
