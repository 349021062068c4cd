use crate::config::app_config::AppConfig;
use crate::repository::Repositories;
use crate::service::user_service::UserService;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserState {
    pub user_service: Arc<UserService>,
}

impl UserState {
    pub fn new(repos: &Repositories, config: &AppConfig) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repos, config.password_hash_cost)),
        }
    }
}
