use crate::dto::score_dto::{ResultRes, SubmitResultReq};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::model::session::AuthUser;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::score_state::ScoreState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_macros::debug_handler;

// 提交一次游玩
#[debug_handler]
pub async fn submit_result(
    State(state): State<ScoreState>,
    user: AuthUser,
    ValidatedRequest(payload): ValidatedRequest<SubmitResultReq>,
) -> Result<(StatusCode, Json<ApiSuccessResponse<ResultRes>>), ApiError> {
    let result = state.score_service.submit_result(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccessResponse::send(result))))
}

pub async fn my_results(
    State(state): State<ScoreState>,
    user: AuthUser,
) -> Result<Json<ApiSuccessResponse<Vec<ResultRes>>>, ApiError> {
    let results = state.score_service.my_results(&user).await?;
    Ok(Json(ApiSuccessResponse::send(results)))
}

pub async fn my_result(
    State(state): State<ScoreState>,
    user: AuthUser,
    Path(result_id): Path<i64>,
) -> Result<Json<ApiSuccessResponse<ResultRes>>, ApiError> {
    let result = state.score_service.my_result(&user, result_id).await?;
    Ok(Json(ApiSuccessResponse::send(result)))
}
