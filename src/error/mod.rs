pub mod api_error;
pub mod chart_error;
pub mod db_error;
pub mod error_code;
pub mod request_error;
pub mod score_error;
pub mod token_error;
pub mod user_error;
