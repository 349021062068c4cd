use crate::{handler::auth_handler, state::auth_state::AuthState};
use axum::{routing::post, Router};

pub fn routes() -> Router<AuthState> {
    Router::new()
        .route("/login", post(auth_handler::login))
        .route("/logout", post(auth_handler::logout))
}
