use super::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 对外统一的鉴权失败提示，不区分具体原因
pub const ACCESS_DENIED_MSG: &str = "Authentication credentials were not provided or are invalid";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token has been revoked")]
    TokenRevoked,
    #[error("Missing token")]
    MissingToken,
    #[error("Token error: {0}")]
    TokenCreationError(String),
}

impl TokenError {
    fn get_code(&self) -> u32 {
        match self {
            TokenError::InvalidToken(_) => error_code::INVALID_TOKEN,
            TokenError::TokenExpired => error_code::TOKEN_EXPIRED,
            TokenError::TokenRevoked => error_code::TOKEN_REVOKED,
            TokenError::MissingToken => error_code::MISSING_TOKEN,
            TokenError::TokenCreationError(_) => error_code::TOKEN_CREATION_ERROR,
        }
    }
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        match self {
            TokenError::TokenCreationError(_) => ApiErrorResponse::send(
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                self.get_code(),
                Some(self.to_string()),
            ),
            // 鉴权失败统一返回 401，不泄露失败原因
            _ => ApiErrorResponse::send(
                StatusCode::UNAUTHORIZED.as_u16(),
                error_code::MISSING_TOKEN,
                Some(ACCESS_DENIED_MSG.to_string()),
            ),
        }
    }
}
