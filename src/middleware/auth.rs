use crate::error::token_error::TokenError;
use crate::model::session::{AuthSession, AuthUser};
use crate::state::token_state::TokenState;
use crate::utils::cookie::{self, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::{Authorization, Bearer};
use axum_extra::TypedHeader;

// middleware
/// 解析身份写入请求扩展，本身不拒绝请求；需要登录的接口通过 `AuthUser` 提取器拦截
pub async fn auth(
    State(state): State<TokenState>,
    jar: CookieJar,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let access_token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_owned());
    let refresh_token = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_owned());
    let bearer_token = bearer.as_ref().map(|TypedHeader(auth)| auth.token());

    let session = state
        .token_service
        .resolve_session(
            access_token.as_deref(),
            bearer_token,
            refresh_token.as_deref(),
        )
        .await;
    let refreshed = session.refreshed_access_token.clone();
    request.extensions_mut().insert(session);

    let response = next.run(request).await;
    match refreshed {
        // handler 自己写了 access cookie（登录、注销）时以 handler 为准
        Some(token) if !sets_cookie(response.headers(), ACCESS_TOKEN_COOKIE) => {
            let jar = CookieJar::new().add(cookie::access_cookie(token, &state.cookie));
            (jar, response).into_response()
        }
        _ => response,
    }
}

fn sets_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| {
            value
                .split_once('=')
                .is_some_and(|(cookie_name, _)| cookie_name.trim() == name)
        })
}

/// 需要登录的接口使用；匿名请求返回 401
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = TokenError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .and_then(|session| session.user.clone())
            .ok_or(TokenError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn detects_cookie_by_name() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("refresh_token=abc; Path=/"),
        );
        assert!(!sets_cookie(&headers, ACCESS_TOKEN_COOKIE));
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("access_token=; Path=/; Max-Age=0"),
        );
        assert!(sets_cookie(&headers, ACCESS_TOKEN_COOKIE));
    }

    #[tokio::test]
    async fn anonymous_session_is_rejected_by_extractor() {
        let request = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        parts.extensions.insert(AuthSession::anonymous());
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err, TokenError::MissingToken);
    }

    #[tokio::test]
    async fn authenticated_session_yields_user() {
        let request = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let user = AuthUser {
            id: 3,
            nickname: "alice".to_string(),
        };
        parts
            .extensions
            .insert(AuthSession::authenticated(user.clone()));
        assert_eq!(AuthUser::from_request_parts(&mut parts, &()).await.unwrap(), user);
    }
}
