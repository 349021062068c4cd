pub mod chart_dto;
pub mod score_dto;
pub mod user_dto;
