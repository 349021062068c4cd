use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart not found")]
    ChartNotFound,
    #[error("Chart with musicId `{0}` already exists")]
    MusicIdTaken(String),
    #[error("Invalid note #{index}: {reason}")]
    InvalidNote { index: usize, reason: String },
    #[error("Only the chart creator may modify this chart")]
    NotChartCreator,
}

impl ChartError {
    fn get_code(&self) -> u32 {
        match self {
            ChartError::ChartNotFound => error_code::CHART_NOT_FOUND,
            ChartError::MusicIdTaken(_) => error_code::MUSIC_ID_TAKEN,
            ChartError::InvalidNote { .. } => error_code::INVALID_NOTE,
            ChartError::NotChartCreator => error_code::NOT_CHART_CREATOR,
        }
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ChartError::ChartNotFound => StatusCode::NOT_FOUND,
            ChartError::MusicIdTaken(_) => StatusCode::CONFLICT,
            ChartError::InvalidNote { .. } => StatusCode::BAD_REQUEST,
            ChartError::NotChartCreator => StatusCode::FORBIDDEN,
        };

        ApiErrorResponse::send(
            status_code.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
