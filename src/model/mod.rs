pub mod chart;
pub mod score;
pub mod session;
pub mod user;

use thiserror::Error;

/// 数据库中字符串枚举列无法识别
#[derive(Error, Debug)]
#[error("unknown {kind} value `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
