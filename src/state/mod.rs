pub mod auth_state;
pub mod chart_state;
pub mod score_state;
pub mod token_state;
pub mod user_state;
