//! 令牌签发、校验与刷新
//!
//! 访问令牌只校验签名与过期时间；刷新令牌额外检查黑名单。
//! 刷新时不轮换刷新令牌，原令牌在过期或注销前一直有效。
use crate::config::app_config::TokenConfig;
use crate::error::db_error::DbError;
use crate::error::token_error::TokenError;
use crate::model::session::{AuthSession, AuthUser, TokenClaims, TokenPair, TokenType};
use crate::repository::token_blacklist_repository::TokenBlacklistTrait;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    blacklist: Arc<dyn TokenBlacklistTrait>,
}

impl TokenService {
    pub fn new(config: &TokenConfig, blacklist: &Arc<dyn TokenBlacklistTrait>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 过期即失效，不留余量
        validation.leeway = 0;
        Self {
            config: config.clone(),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            blacklist: Arc::clone(blacklist),
        }
    }

    /// 登录时签发访问/刷新令牌
    pub fn issue_pair(&self, user_id: i64, nickname: &str) -> Result<TokenPair, TokenError> {
        let now = Utc::now().timestamp();
        Ok(TokenPair {
            access_token: self.issue_token(user_id, nickname, TokenType::Access, now)?,
            refresh_token: self.issue_token(user_id, nickname, TokenType::Refresh, now)?,
        })
    }

    pub(crate) fn issue_token(
        &self,
        user_id: i64,
        nickname: &str,
        token_type: TokenType,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let ttl = match token_type {
            TokenType::Access => self.config.access_token_ttl_secs,
            TokenType::Refresh => self.config.refresh_token_ttl_secs,
        };
        let claims = TokenClaims {
            sub: user_id,
            nickname: nickname.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
            iat: issued_at,
            exp: issued_at + ttl,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::TokenCreationError(err.to_string()))
    }

    fn decode_token(&self, token: &str, expected: TokenType) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken(err.to_string()),
            },
        )?;
        if data.claims.token_type != expected {
            return Err(TokenError::InvalidToken(format!(
                "expected {:?} token",
                expected
            )));
        }
        Ok(data.claims)
    }

    pub fn validate_access(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.decode_token(token, TokenType::Access)
    }

    /// 黑名单不可用时按校验失败处理
    pub async fn validate_refresh(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = self.decode_token(token, TokenType::Refresh)?;
        match self.blacklist.is_revoked(&claims.jti).await {
            Ok(false) => Ok(claims),
            Ok(true) => Err(TokenError::TokenRevoked),
            Err(err) => {
                tracing::error!(
                    "validate_refresh - blacklist lookup failed, jti:{} | err:{}",
                    claims.jti,
                    err.to_string()
                );
                Err(TokenError::InvalidToken(err.to_string()))
            }
        }
    }

    /// 用有效的刷新令牌为同一用户签发新的访问令牌
    pub async fn refresh_access(&self, refresh_token: &str) -> Result<(String, TokenClaims), TokenError> {
        let refresh_claims = self.validate_refresh(refresh_token).await?;
        let access_token = self.issue_token(
            refresh_claims.sub,
            &refresh_claims.nickname,
            TokenType::Access,
            Utc::now().timestamp(),
        )?;
        let access_claims = self.validate_access(&access_token)?;
        Ok((access_token, access_claims))
    }

    /// 注销刷新令牌；令牌本身无效时无需处理
    pub async fn revoke_refresh(&self, refresh_token: &str) -> Result<(), DbError> {
        let claims = match self.decode_token(refresh_token, TokenType::Refresh) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!("revoke_refresh - token already unusable: {}", err);
                return Ok(());
            }
        };
        let remaining = (claims.exp - Utc::now().timestamp()).max(1) as u64;
        self.blacklist.revoke(&claims.jti, remaining).await?;
        tracing::info!("revoke_refresh - user:{} | jti:{}", claims.sub, claims.jti);
        Ok(())
    }

    /// 解析一次请求的身份
    ///
    /// 1. 有 access cookie 时校验它，否则退回 `Authorization: Bearer`
    /// 2. 两者都没有时为匿名
    /// 3. cookie 中的访问令牌校验失败且带有 refresh cookie 时，尝试用刷新令牌换取新的访问令牌；
    ///    Bearer 令牌失败直接视为匿名
    pub async fn resolve_session(
        &self,
        access_cookie: Option<&str>,
        bearer: Option<&str>,
        refresh_cookie: Option<&str>,
    ) -> AuthSession {
        let (access_token, from_cookie) = match (access_cookie, bearer) {
            (Some(token), _) => (token, true),
            (None, Some(token)) => (token, false),
            (None, None) => return AuthSession::anonymous(),
        };

        let err = match self.validate_access(access_token) {
            Ok(claims) => return AuthSession::authenticated(AuthUser::from(&claims)),
            Err(err) => err,
        };
        tracing::debug!("resolve_session - access token rejected: {}", err);

        let refresh_token = match refresh_cookie {
            Some(token) if from_cookie => token,
            _ => return AuthSession::anonymous(),
        };
        match self.refresh_access(refresh_token).await {
            Ok((new_access_token, claims)) => {
                tracing::debug!("resolve_session - access token refreshed for user:{}", claims.sub);
                AuthSession {
                    user: Some(AuthUser::from(&claims)),
                    refreshed_access_token: Some(new_access_token),
                }
            }
            Err(err) => {
                tracing::debug!("resolve_session - refresh token rejected: {}", err);
                AuthSession::anonymous()
            }
        }
    }
}
