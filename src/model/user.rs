//! 内部用到的数据模型
//!
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    /// bcrypt 哈希
    pub password: String,
    /// 仅用于资料排序，提交成绩不会改写
    pub high_score: i32,
    pub created_at: DateTime<Utc>,
}

/// 用户成绩汇总
#[derive(Clone, Debug, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct UserStats {
    pub perfect_count: i64,
    pub highest_score: i64,
}
