//! 已注销刷新令牌的黑名单，存于 redis，过期时间等于令牌剩余有效期
//!
use crate::error::db_error::DbError;
use async_trait::async_trait;
use deadpool_redis::Pool;

#[cfg(test)]
use mockall::automock;

#[derive(Clone)]
pub struct TokenBlacklistRepository {
    pub(crate) redis_con_pool: Pool,
}

impl TokenBlacklistRepository {
    pub fn new(redis_con_pool: &Pool) -> Self {
        Self {
            redis_con_pool: redis_con_pool.clone(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenBlacklistTrait: Send + Sync {
    /// 加入黑名单，`ttl_secs` 后自动清除
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), DbError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, DbError>;
}

#[async_trait]
impl TokenBlacklistTrait for TokenBlacklistRepository {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<(), DbError> {
        let mut con = self.redis_con_pool.get().await?;
        let _: () = redis::cmd("SET")
            .arg(get_redis_blacklist_key(jti))
            .arg(1)
            .arg("EX")
            .arg(ttl_secs.max(1))
            .query_async(&mut con)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DbError> {
        let mut con = self.redis_con_pool.get().await?;
        let exists: bool = redis::cmd("EXISTS")
            .arg(get_redis_blacklist_key(jti))
            .query_async(&mut con)
            .await?;
        Ok(exists)
    }
}

/// 获取redis 黑名单的key
fn get_redis_blacklist_key(jti: &str) -> String {
    format!("token_blacklist:{jti}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blacklist_key_is_namespaced_by_jti() {
        assert_eq!(
            get_redis_blacklist_key("4f1c"),
            "token_blacklist:4f1c".to_string()
        );
    }
}
