use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{0}")]
    SomethingWentWrong(String),
    #[error("Duplicate entry exists")]
    UniqueConstraintViolation(String),
}

impl DbError {
    fn get_code(&self) -> u32 {
        match self {
            DbError::SomethingWentWrong(_) => error_code::SOMETHING_WENT_WRONG,
            DbError::UniqueConstraintViolation(_) => error_code::UNIQUE_CONSTRAINT_VIOLATION,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueConstraintViolation(db_err.message().to_string())
            }
            _ => {
                tracing::error!("mysql error: {}", err.to_string());
                DbError::SomethingWentWrong(err.to_string())
            }
        }
    }
}

impl From<deadpool_redis::PoolError> for DbError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        tracing::error!("redis pool error: {}", err.to_string());
        DbError::SomethingWentWrong(err.to_string())
    }
}

impl From<redis::RedisError> for DbError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!("redis error: {}", err.to_string());
        DbError::SomethingWentWrong(err.to_string())
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        let status_code = match self {
            DbError::SomethingWentWrong(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DbError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
        };
        // 内部错误细节只写日志
        let msg = match self {
            DbError::SomethingWentWrong(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        ApiErrorResponse::send(status_code.as_u16(), self.get_code(), Some(msg))
    }
}
