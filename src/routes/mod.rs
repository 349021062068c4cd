pub mod auth;
pub mod chart;
pub mod profile;
pub mod rank;
pub mod register;
pub mod result;
pub mod root;
