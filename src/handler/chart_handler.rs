use crate::dto::chart_dto::{ChartDetailRes, ChartRes, CreateChartReq, UpdateChartReq};
use crate::dto::score_dto::ResultRes;
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::model::session::AuthUser;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::chart_state::ChartState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_macros::debug_handler;

pub async fn list_charts(
    State(state): State<ChartState>,
) -> Result<Json<ApiSuccessResponse<Vec<ChartRes>>>, ApiError> {
    let charts = state.chart_service.list_charts().await?;
    Ok(Json(ApiSuccessResponse::send(charts)))
}

// 登录用户额外返回自己的最佳成绩
#[debug_handler]
pub async fn chart_detail(
    State(state): State<ChartState>,
    user: Option<AuthUser>,
    Path(music_id): Path<String>,
) -> Result<Json<ApiSuccessResponse<ChartDetailRes>>, ApiError> {
    let detail = state
        .chart_service
        .get_chart_detail(&music_id, user.as_ref())
        .await?;
    Ok(Json(ApiSuccessResponse::send(detail)))
}

#[debug_handler]
pub async fn create_chart(
    State(state): State<ChartState>,
    user: AuthUser,
    ValidatedRequest(payload): ValidatedRequest<CreateChartReq>,
) -> Result<(StatusCode, Json<ApiSuccessResponse<ChartDetailRes>>), ApiError> {
    let chart = state.chart_service.create_chart(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccessResponse::send(chart))))
}

pub async fn update_chart(
    State(state): State<ChartState>,
    user: AuthUser,
    Path(music_id): Path<String>,
    ValidatedRequest(payload): ValidatedRequest<UpdateChartReq>,
) -> Result<Json<ApiSuccessResponse<ChartDetailRes>>, ApiError> {
    let chart = state
        .chart_service
        .update_chart(&user, &music_id, payload)
        .await?;
    Ok(Json(ApiSuccessResponse::send(chart)))
}

pub async fn delete_chart(
    State(state): State<ChartState>,
    user: AuthUser,
    Path(music_id): Path<String>,
) -> Result<Json<ApiSuccessResponse<()>>, ApiError> {
    state.chart_service.delete_chart(&user, &music_id).await?;
    Ok(Json(ApiSuccessResponse::from_with_nodata()))
}

pub async fn chart_results(
    State(state): State<ChartState>,
    Path(music_id): Path<String>,
) -> Result<Json<ApiSuccessResponse<Vec<ResultRes>>>, ApiError> {
    let results = state.chart_service.chart_results(&music_id).await?;
    Ok(Json(ApiSuccessResponse::send(results)))
}
