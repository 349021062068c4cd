//! 单次请求的鉴权结果
//!
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 载荷
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 用户 id
    pub sub: i64,
    pub nickname: String,
    /// 令牌唯一标识，黑名单以此为键
    pub jti: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 已通过鉴权的调用者
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub nickname: String,
}

impl From<&TokenClaims> for AuthUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.sub,
            nickname: claims.nickname.clone(),
        }
    }
}

/// 中间件写入请求扩展；`user` 为 None 表示匿名
#[derive(Clone, Debug, Default)]
pub struct AuthSession {
    pub user: Option<AuthUser>,
    /// 通过刷新令牌临时签发的访问令牌，响应时写回 cookie
    pub refreshed_access_token: Option<String>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            refreshed_access_token: None,
        }
    }
}
