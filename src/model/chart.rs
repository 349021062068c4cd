use serde::{Deserialize, Serialize};
use std::fmt;

use super::UnknownVariant;

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Chart {
    pub id: i64,
    pub music_id: String,
    pub title: String,
    pub artist: String,
    pub song: String,
    pub background_video: String,
    pub cover_url: String,
    pub bpm: i32,
    pub difficulty: i32,
    pub is_community_song: bool,
    pub creator_id: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Tap,
    Hold,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Tap => "tap",
            NoteType::Hold => "hold",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NoteType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "tap" => Ok(NoteType::Tap),
            "hold" => Ok(NoteType::Hold),
            _ => Err(UnknownVariant {
                kind: "note type",
                value,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub chart_id: i64,
    /// 毫秒偏移
    pub time: i32,
    pub lane: i32,
    #[sqlx(try_from = "String")]
    pub note_type: NoteType,
    /// 仅 hold 音符有值
    pub duration: Option<i32>,
}

/// 待写入的音符，尚未分配 id
#[derive(Clone, Debug, PartialEq)]
pub struct NewNote {
    pub time: i32,
    pub lane: i32,
    pub note_type: NoteType,
    pub duration: Option<i32>,
}

/// 待写入的谱面元数据
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFields {
    pub title: String,
    pub artist: String,
    pub song: String,
    pub background_video: String,
    pub cover_url: String,
    pub bpm: i32,
    pub difficulty: i32,
    pub is_community_song: bool,
}
