pub mod auth_handler;
pub mod chart_handler;
pub mod profile_handler;
pub mod rank_handler;
pub mod register_handler;
pub mod result_handler;
