use crate::dto::chart_dto::RankEntryRes;
use crate::error::api_error::ApiError;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::score_state::ScoreState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn leaderboard(
    State(state): State<ScoreState>,
    Path(music_id): Path<String>,
) -> Result<Json<ApiSuccessResponse<Vec<RankEntryRes>>>, ApiError> {
    let ranks = state.score_service.leaderboard(&music_id).await?;
    Ok(Json(ApiSuccessResponse::send(ranks)))
}
