use crate::{handler::rank_handler, state::score_state::ScoreState};
use axum::{routing::get, Router};

pub fn routes() -> Router<ScoreState> {
    Router::new().route("/charts/:music_id/ranks", get(rank_handler::leaderboard))
}
