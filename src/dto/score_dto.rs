//! 成绩提交与查询
//!
use crate::model::score::{LetterRank, PlayResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultReq {
    #[validate(length(min = 1, max = 100, message = "musicId must be between 1 and 100 characters"))]
    pub music_id: String,
    #[validate(range(min = 0, message = "score must be non-negative"))]
    pub score: i32,
    #[validate(range(min = 0.0, max = 100.0, message = "accuracy must be between 0 and 100"))]
    pub accuracy: f64,
    /// 可选，若提供必须与分数对应的评级一致
    #[serde(default)]
    pub rank: Option<LetterRank>,
    #[serde(default)]
    #[validate(length(max = 500, message = "combo must be at most 500 characters"))]
    pub combo: String,
    #[serde(default)]
    pub is_full_combo: bool,
    #[serde(default)]
    pub is_all_perfect: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "earlyCount must be non-negative"))]
    pub early_count: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "lateCount must be non-negative"))]
    pub late_count: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "perfect must be non-negative"))]
    pub perfect: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "great must be non-negative"))]
    pub great: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "good must be non-negative"))]
    pub good: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "miss must be non-negative"))]
    pub miss: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "bad must be non-negative"))]
    pub bad: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRes {
    pub id: i64,
    pub music_id: String,
    pub user: i64,
    pub chart: i64,
    pub difficulty: i32,
    pub score: i32,
    pub accuracy: f64,
    pub rank: LetterRank,
    pub combo: String,
    pub is_full_combo: bool,
    pub is_all_perfect: bool,
    pub early_count: i32,
    pub late_count: i32,
    pub perfect: i32,
    pub great: i32,
    pub good: i32,
    pub miss: i32,
    pub bad: i32,
    pub played_at: DateTime<Utc>,
}

impl From<PlayResult> for ResultRes {
    fn from(result: PlayResult) -> Self {
        Self {
            id: result.id,
            music_id: result.music_id,
            user: result.user_id,
            chart: result.chart_id,
            difficulty: result.difficulty,
            score: result.score,
            accuracy: result.accuracy,
            rank: result.letter_rank,
            combo: result.combo,
            is_full_combo: result.is_full_combo,
            is_all_perfect: result.is_all_perfect,
            early_count: result.early_count,
            late_count: result.late_count,
            perfect: result.perfect,
            great: result.great,
            good: result.good,
            miss: result.miss,
            bad: result.bad,
            played_at: result.played_at,
        }
    }
}
