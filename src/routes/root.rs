use super::{auth, chart, profile, rank, register, result};
use crate::config::app_config::AppConfig;
use crate::middleware::auth as auth_middleware;
use crate::repository::Repositories;
use crate::state::auth_state::AuthState;
use crate::state::chart_state::ChartState;
use crate::state::score_state::ScoreState;
use crate::state::token_state::TokenState;
use crate::state::user_state::UserState;
use axum::routing::{get, IntoMakeService};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub fn routes(repos: Repositories, config: &AppConfig) -> IntoMakeService<Router> {
    app(repos, config).into_make_service()
}

pub fn app(repos: Repositories, config: &AppConfig) -> Router {
    let merged_router = {
        let token_state = TokenState::new(&repos, config);
        let auth_state = AuthState::new(&repos, &token_state);
        let user_state = UserState::new(&repos, config);
        let chart_state = ChartState::new(&repos, config);
        let score_state = ScoreState::new(&repos, config);

        Router::new()
            .nest(
                "/user",
                auth::routes()
                    .with_state(auth_state)
                    .merge(register::routes().with_state(user_state.clone()))
                    .merge(profile::routes().with_state(user_state)),
            )
            .merge(chart::routes().with_state(chart_state))
            .merge(rank::routes().with_state(score_state.clone()))
            .merge(result::routes().with_state(score_state))
            .route("/health", get(|| async move { "Healthy..." }))
            // 所有接口都先解析身份，是否必须登录由 handler 的提取器决定
            .layer(middleware::from_fn_with_state(
                token_state,
                auth_middleware::auth,
            ))
    };

    Router::new()
        .nest("/api", merged_router)
        .layer(TraceLayer::new_for_http())
}
