use crate::dto::user_dto::{UserProfile, UserUpdateDto};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::model::session::AuthUser;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::user_state::UserState;
use axum::{extract::State, Json};

pub async fn profile(
    State(state): State<UserState>,
    user: AuthUser,
) -> Result<Json<ApiSuccessResponse<UserProfile>>, ApiError> {
    let profile = state.user_service.get_profile(user.id).await?;
    Ok(Json(ApiSuccessResponse::send(profile)))
}

pub async fn update_profile(
    State(state): State<UserState>,
    user: AuthUser,
    ValidatedRequest(payload): ValidatedRequest<UserUpdateDto>,
) -> Result<Json<ApiSuccessResponse<UserProfile>>, ApiError> {
    let profile = state.user_service.update_profile(user.id, payload).await?;
    Ok(Json(ApiSuccessResponse::send(profile)))
}

pub async fn list_profiles(
    State(state): State<UserState>,
) -> Result<Json<ApiSuccessResponse<Vec<UserProfile>>>, ApiError> {
    let profiles = state.user_service.list_profiles().await?;
    Ok(Json(ApiSuccessResponse::send(profiles)))
}
