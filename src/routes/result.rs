use crate::{handler::result_handler, state::score_state::ScoreState};
use axum::{routing::get, Router};

pub fn routes() -> Router<ScoreState> {
    Router::new().nest(
        "/results",
        Router::new()
            .route(
                "/",
                get(result_handler::my_results).post(result_handler::submit_result),
            )
            .route("/:id", get(result_handler::my_result)),
    )
}
