//! 谱面传输用到的数据结构
//!
use crate::model::chart::{Chart, ChartFields, Note, NoteType};
use crate::model::score::{LetterRank, PlayResult, RankEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteDto {
    pub time: i32,
    pub lane: i32,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

/// 单个谱面允许的音符上限，与下方 `length(max = 20000)` 保持一致
pub const MAX_CHART_NOTES: usize = 20_000;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChartReq {
    #[validate(length(min = 1, max = 100, message = "musicId must be between 1 and 100 characters"))]
    pub music_id: String,
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "artist must be between 1 and 200 characters"))]
    pub artist: String,
    #[validate(length(max = 500, message = "song path must be at most 500 characters"))]
    pub song: String,
    #[validate(length(max = 500, message = "backgroundVideo must be at most 500 characters"))]
    pub background_video: String,
    #[validate(length(max = 500, message = "coverUrl must be at most 500 characters"))]
    pub cover_url: String,
    #[validate(range(min = 1, message = "bpm must be positive"))]
    pub bpm: i32,
    #[validate(range(min = 1, max = 15, message = "difficulty must be between 1 and 15"))]
    pub difficulty: i32,
    #[serde(default)]
    pub is_community_song: bool,
    #[serde(default)]
    #[validate(length(max = 20000, message = "a chart may have at most 20000 notes"))]
    pub notes: Vec<NoteDto>,
}

impl CreateChartReq {
    pub fn fields(&self) -> ChartFields {
        ChartFields {
            title: self.title.clone(),
            artist: self.artist.clone(),
            song: self.song.clone(),
            background_video: self.background_video.clone(),
            cover_url: self.cover_url.clone(),
            bpm: self.bpm,
            difficulty: self.difficulty,
            is_community_song: self.is_community_song,
        }
    }
}

/// 更新谱面；notes 缺省时保留原有音符
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChartReq {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "artist must be between 1 and 200 characters"))]
    pub artist: String,
    #[validate(length(max = 500, message = "song path must be at most 500 characters"))]
    pub song: String,
    #[validate(length(max = 500, message = "backgroundVideo must be at most 500 characters"))]
    pub background_video: String,
    #[validate(length(max = 500, message = "coverUrl must be at most 500 characters"))]
    pub cover_url: String,
    #[validate(range(min = 1, message = "bpm must be positive"))]
    pub bpm: i32,
    #[validate(range(min = 1, max = 15, message = "difficulty must be between 1 and 15"))]
    pub difficulty: i32,
    #[serde(default)]
    pub is_community_song: bool,
    #[validate(length(max = 20000, message = "a chart may have at most 20000 notes"))]
    pub notes: Option<Vec<NoteDto>>,
}

impl UpdateChartReq {
    pub fn fields(&self) -> ChartFields {
        ChartFields {
            title: self.title.clone(),
            artist: self.artist.clone(),
            song: self.song.clone(),
            background_video: self.background_video.clone(),
            cover_url: self.cover_url.clone(),
            bpm: self.bpm,
            difficulty: self.difficulty,
            is_community_song: self.is_community_song,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRes {
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
    pub creator: i64,
}

impl From<Chart> for ChartRes {
    fn from(chart: Chart) -> Self {
        Self {
            id: chart.id,
            music_id: chart.music_id,
            title: chart.title,
            artist: chart.artist,
            song: chart.song,
            background_video: chart.background_video,
            cover_url: chart.cover_url,
            bpm: chart.bpm,
            difficulty: chart.difficulty,
            is_community_song: chart.is_community_song,
            creator: chart.creator_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteRes {
    pub id: i64,
    pub time: i32,
    pub lane: i32,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

impl From<Note> for NoteRes {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            time: note.time,
            lane: note.lane,
            note_type: note.note_type,
            duration: note.duration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankUserRes {
    pub id: i64,
    pub nickname: String,
}

/// 排行榜的一行
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntryRes {
    pub ranking: i32,
    pub user: RankUserRes,
    pub score: i32,
    pub letter_rank: LetterRank,
}

impl RankEntryRes {
    /// `ranking` 从 1 开始
    pub fn from_entries(entries: Vec<RankEntry>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Self {
                ranking: index as i32 + 1,
                letter_rank: LetterRank::from_score(entry.score),
                user: RankUserRes {
                    id: entry.user_id,
                    nickname: entry.nickname,
                },
                score: entry.score,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRecordRes {
    pub score: i32,
    pub accuracy: f64,
    pub combo: String,
    pub rank: LetterRank,
    pub is_full_combo: bool,
    pub is_all_perfect: bool,
    pub played_at: DateTime<Utc>,
}

impl From<PlayResult> for BestRecordRes {
    fn from(result: PlayResult) -> Self {
        Self {
            score: result.score,
            accuracy: result.accuracy,
            combo: result.combo,
            rank: result.letter_rank,
            is_full_combo: result.is_full_combo,
            is_all_perfect: result.is_all_perfect,
            played_at: result.played_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDetailRes {
    #[serde(flatten)]
    pub chart: ChartRes,
    pub notes: Vec<NoteRes>,
    pub ranks: Vec<RankEntryRes>,
    pub user_best_record: Option<BestRecordRes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_notes(count: usize) -> Vec<NoteDto> {
        (0..count)
            .map(|i| NoteDto {
                time: i as i32 * 10,
                lane: (i % 4) as i32,
                note_type: NoteType::Tap,
                duration: None,
            })
            .collect()
    }

    fn create_req(notes: Vec<NoteDto>) -> CreateChartReq {
        CreateChartReq {
            music_id: "LONG001".to_string(),
            title: "Marathon".to_string(),
            artist: "Warak".to_string(),
            song: "/media/songs/long001.mp3".to_string(),
            background_video: String::new(),
            cover_url: String::new(),
            bpm: 180,
            difficulty: 15,
            is_community_song: true,
            notes,
        }
    }

    #[test]
    fn note_count_is_capped_on_create() {
        assert!(create_req(tap_notes(MAX_CHART_NOTES)).validate().is_ok());
        let err = create_req(tap_notes(MAX_CHART_NOTES + 1))
            .validate()
            .unwrap_err();
        assert!(err.field_errors().contains_key("notes"));
    }

    #[test]
    fn note_count_is_capped_on_update() {
        let mut req = UpdateChartReq {
            title: "Marathon".to_string(),
            artist: "Warak".to_string(),
            song: String::new(),
            background_video: String::new(),
            cover_url: String::new(),
            bpm: 180,
            difficulty: 15,
            is_community_song: true,
            notes: None,
        };
        assert!(req.validate().is_ok());
        req.notes = Some(tap_notes(MAX_CHART_NOTES + 1));
        assert!(req.validate().is_err());
    }
}
