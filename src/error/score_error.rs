use crate::error::error_code;
use crate::model::score::LetterRank;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Result not found")]
    ResultNotFound,
    #[error("rank: submitted `{submitted}` but score {score} is rank `{expected}`")]
    LetterRankMismatch {
        submitted: LetterRank,
        expected: LetterRank,
        score: i32,
    },
}

impl ScoreError {
    fn get_code(&self) -> u32 {
        match self {
            ScoreError::ResultNotFound => error_code::RESULT_NOT_FOUND,
            ScoreError::LetterRankMismatch { .. } => error_code::LETTER_RANK_MISMATCH,
        }
    }
}

impl IntoResponse for ScoreError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ScoreError::ResultNotFound => StatusCode::NOT_FOUND,
            ScoreError::LetterRankMismatch { .. } => StatusCode::BAD_REQUEST,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
