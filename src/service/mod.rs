pub mod auth_service;
pub mod chart_service;
pub mod score_service;
pub mod token_service;
pub mod user_service;
