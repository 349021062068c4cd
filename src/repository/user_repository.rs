use crate::db::database::{Database, DatabaseTrait};
use crate::error::db_error::DbError;
use crate::model::user::User;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

const USER_COLUMNS: &str = "id, nickname, email, password, high_score, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl UserRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DbError>;

    /// 昵称重复时返回 `UniqueConstraintViolation`
    async fn create_user(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DbError>;

    async fn update_profile(&self, id: i64, nickname: &str, email: &str)
        -> Result<User, DbError>;

    /// 按 high_score 倒序列出所有用户
    async fn list_by_high_score(&self) -> Result<Vec<User>, DbError>;
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.db_conn.get_master_pool())
            .await?;
        Ok(user)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE nickname = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(nickname)
            .fetch_optional(self.db_conn.get_slave_pool())
            .await?;
        Ok(user)
    }

    async fn create_user(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DbError> {
        let sql_ret = sqlx::query(
            "INSERT INTO users (nickname, email, password, high_score, created_at)
            VALUES (?, ?, ?, 0, ?)",
        )
        .bind(nickname)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(self.db_conn.get_master_pool())
        .await?;
        let id = sql_ret.last_insert_id() as i64;
        tracing::debug!("create_user - id:{}", id);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::SomethingWentWrong(format!("user {id} vanished after insert")))
    }

    async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        email: &str,
    ) -> Result<User, DbError> {
        let sql_ret = sqlx::query("UPDATE users SET nickname = ?, email = ? WHERE id = ?")
            .bind(nickname)
            .bind(email)
            .bind(id)
            .execute(self.db_conn.get_master_pool())
            .await?;
        tracing::debug!("update_profile - rows_affected:{}", sql_ret.rows_affected());

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::SomethingWentWrong(format!("user {id} not found")))
    }

    async fn list_by_high_score(&self) -> Result<Vec<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY high_score DESC, id ASC");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(self.db_conn.get_slave_pool())
            .await?;
        Ok(users)
    }
}
