//! 用户相关的请求与响应
//!
use crate::model::user::{User, UserStats};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UserRegisterDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "nickname must be between 1 and 50 characters"
    ))]
    pub nickname: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirm: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UserLoginDto {
    #[serde(alias = "identifier", alias = "username")]
    #[validate(length(min = 1, max = 50, message = "nickname is required"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct UserUpdateDto {
    #[validate(length(
        min = 1,
        max = 50,
        message = "nickname must be between 1 and 50 characters"
    ))]
    pub nickname: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
}

/// 对外唯一的用户资料结构，stats 只在需要时计算
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    pub high_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<UserStatsDto>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDto {
    pub perfect_count: i64,
    pub highest_score: i64,
}

impl From<UserStats> for UserStatsDto {
    fn from(stats: UserStats) -> Self {
        Self {
            perfect_count: stats.perfect_count,
            highest_score: stats.highest_score,
        }
    }
}

impl UserProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            high_score: user.high_score,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: UserStats) -> Self {
        self.stats = Some(stats.into());
        self
    }
}
