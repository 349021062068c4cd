use crate::{handler::profile_handler, state::user_state::UserState};
use axum::{routing::get, Router};

pub fn routes() -> Router<UserState> {
    Router::new()
        .route(
            "/profile",
            get(profile_handler::profile).patch(profile_handler::update_profile),
        )
        .route("/profiles", get(profile_handler::list_profiles))
}
