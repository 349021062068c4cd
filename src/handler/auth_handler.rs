use crate::dto::user_dto::{UserLoginDto, UserProfile};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::response::api_response::ApiSuccessResponse;
use crate::state::auth_state::AuthState;
use crate::utils::cookie::{self, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    ValidatedRequest(payload): ValidatedRequest<UserLoginDto>,
) -> Result<(CookieJar, Json<ApiSuccessResponse<UserProfile>>), ApiError> {
    let (profile, tokens) = state.auth_service.login(payload).await?;
    let jar = jar
        .add(cookie::access_cookie(tokens.access_token, &state.cookie))
        .add(cookie::refresh_cookie(tokens.refresh_token, &state.cookie));
    Ok((jar, Json(ApiSuccessResponse::send(profile))))
}

// 匿名也可调用，只清理 cookie
pub async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiSuccessResponse<()>>), ApiError> {
    let refresh_token = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_owned());
    state.auth_service.logout(refresh_token.as_deref()).await?;
    let jar = jar
        .remove(cookie::removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(cookie::removal_cookie(REFRESH_TOKEN_COOKIE));
    Ok((jar, Json(ApiSuccessResponse::from_with_nodata())))
}
