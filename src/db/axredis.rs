use crate::config::parameter;
use deadpool_redis::{Config, CreatePoolError, Pool, Runtime};
use once_cell::sync::OnceCell;

static REDIS_CONNECT_POOL: OnceCell<Pool> = OnceCell::new();

pub async fn init_redis_pool() -> Result<(), CreatePoolError> {
    let redis_url = parameter::get("REDIS_URL");
    let mut cfg = Config::from_url(redis_url);
    if let Some(pool_cfg) = cfg.pool.as_mut() {
        pool_cfg.max_size = 10;
    }
    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    // 创建好连接池进行获取连接测试
    pool.get().await.expect("redis connect failed!!!");
    assert!(REDIS_CONNECT_POOL.set(pool).is_ok());
    Ok(())
}

pub fn get_redis_connect_pool() -> Option<&'static Pool> {
    REDIS_CONNECT_POOL.get()
}
