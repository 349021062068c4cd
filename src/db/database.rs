use crate::config::parameter;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Error, MySql, Pool};

/// 主从分离，写走主库，只读查询走从库
pub struct Database {
    master_pool: Pool<MySql>,
    slave_pool: Pool<MySql>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init() -> Result<Self, Error>
    where
        Self: Sized;
    fn get_master_pool(&self) -> &Pool<MySql>;
    fn get_slave_pool(&self) -> &Pool<MySql>;
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init() -> Result<Self, Error> {
        let database_url = parameter::get("MASTER_DB_URL");
        let master_pool = MySqlPoolOptions::new()
            .max_connections(10)
            .max_lifetime(std::time::Duration::from_secs(6 * 60 * 60))
            .connect(&database_url)
            .await?;
        let slave_database_url = parameter::get("SLAVE_DB_URL");
        let slave_pool = MySqlPoolOptions::new()
            .max_connections(10)
            .max_lifetime(std::time::Duration::from_secs(6 * 60 * 60))
            .connect(&slave_database_url)
            .await?;

        Ok(Self {
            master_pool,
            slave_pool,
        })
    }

    fn get_master_pool(&self) -> &Pool<MySql> {
        &self.master_pool
    }

    fn get_slave_pool(&self) -> &Pool<MySql> {
        &self.slave_pool
    }
}

impl Database {
    /// 启动时执行建表迁移
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations")
            .run(self.get_master_pool())
            .await
    }
}
