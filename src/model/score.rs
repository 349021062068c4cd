//! 成绩与排行榜
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::UnknownVariant;

/// 按分数划分的评级，每档包含下界
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterRank {
    F,
    D,
    C,
    B,
    A,
    S,
    SS,
}

/// (下界, 评级)，从高到低
const LETTER_RANK_THRESHOLDS: [(i32, LetterRank); 6] = [
    (990_000, LetterRank::SS),
    (950_000, LetterRank::S),
    (900_000, LetterRank::A),
    (850_000, LetterRank::B),
    (800_000, LetterRank::C),
    (750_000, LetterRank::D),
];

impl LetterRank {
    pub fn from_score(score: i32) -> Self {
        LETTER_RANK_THRESHOLDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, rank)| *rank)
            .unwrap_or(LetterRank::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterRank::F => "F",
            LetterRank::D => "D",
            LetterRank::C => "C",
            LetterRank::B => "B",
            LetterRank::A => "A",
            LetterRank::S => "S",
            LetterRank::SS => "SS",
        }
    }
}

impl fmt::Display for LetterRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for LetterRank {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "F" => Ok(LetterRank::F),
            "D" => Ok(LetterRank::D),
            "C" => Ok(LetterRank::C),
            "B" => Ok(LetterRank::B),
            "A" => Ok(LetterRank::A),
            "S" => Ok(LetterRank::S),
            "SS" => Ok(LetterRank::SS),
            _ => Err(UnknownVariant {
                kind: "letter rank",
                value,
            }),
        }
    }
}

/// 一次游玩的记录，写入后不再修改
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct PlayResult {
    pub id: i64,
    pub music_id: String,
    pub user_id: i64,
    pub chart_id: i64,
    pub difficulty: i32,
    pub score: i32,
    pub accuracy: f64,
    #[sqlx(try_from = "String")]
    pub letter_rank: LetterRank,
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

/// 待写入的游玩记录
#[derive(Clone, Debug, PartialEq)]
pub struct NewPlayResult {
    pub music_id: String,
    pub user_id: i64,
    pub chart_id: i64,
    pub difficulty: i32,
    pub score: i32,
    pub accuracy: f64,
    pub letter_rank: LetterRank,
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

/// 排行榜的一行，(chart, user) 的最高分
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct RankEntry {
    pub user_id: i64,
    pub nickname: String,
    pub score: i32,
    pub achieved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_rank_band_boundaries() {
        let cases = [
            (i32::MAX, LetterRank::SS),
            (1_000_000, LetterRank::SS),
            (990_000, LetterRank::SS),
            (989_999, LetterRank::S),
            (950_000, LetterRank::S),
            (949_999, LetterRank::A),
            (900_000, LetterRank::A),
            (899_999, LetterRank::B),
            (850_000, LetterRank::B),
            (849_999, LetterRank::C),
            (800_000, LetterRank::C),
            (799_999, LetterRank::D),
            (750_000, LetterRank::D),
            (749_999, LetterRank::F),
            (0, LetterRank::F),
        ];
        for (score, expected) in cases {
            assert_eq!(LetterRank::from_score(score), expected, "score {score}");
        }
    }

    #[test]
    fn letter_rank_is_monotonic_in_score() {
        let mut previous = LetterRank::from_score(0);
        for score in (0..=1_000_000).step_by(1_000) {
            let current = LetterRank::from_score(score);
            assert!(current >= previous, "rank dropped at {score}");
            previous = current;
        }
    }

    #[test]
    fn letter_rank_parses_stored_text() {
        assert_eq!(LetterRank::try_from("SS".to_string()).unwrap(), LetterRank::SS);
        assert!(LetterRank::try_from("E".to_string()).is_err());
        assert_eq!(LetterRank::S.to_string(), "S");
    }
}
