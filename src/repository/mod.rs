pub mod chart_repository;
#[cfg(test)]
pub mod memory_repository;
pub mod score_repository;
pub mod token_blacklist_repository;
pub mod user_repository;

use crate::db::database::Database;
use chart_repository::{ChartRepository, ChartRepositoryTrait};
use deadpool_redis::Pool;
use score_repository::{ScoreRepository, ScoreRepositoryTrait};
use std::sync::Arc;
use token_blacklist_repository::{TokenBlacklistRepository, TokenBlacklistTrait};
use user_repository::{UserRepository, UserRepositoryTrait};

/// 各仓储的共享句柄，按 trait 对象持有便于替换实现
#[derive(Clone)]
pub struct Repositories {
    pub user_repo: Arc<dyn UserRepositoryTrait>,
    pub chart_repo: Arc<dyn ChartRepositoryTrait>,
    pub score_repo: Arc<dyn ScoreRepositoryTrait>,
    pub token_blacklist: Arc<dyn TokenBlacklistTrait>,
}

impl Repositories {
    pub fn new(db_conn: &Arc<Database>, redis_con_pool: &Pool) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db_conn)),
            chart_repo: Arc::new(ChartRepository::new(db_conn)),
            score_repo: Arc::new(ScoreRepository::new(db_conn)),
            token_blacklist: Arc::new(TokenBlacklistRepository::new(redis_con_pool)),
        }
    }
}
