//! 内存实现，测试中代替 MySQL 与 redis
//!
use super::chart_repository::ChartRepositoryTrait;
use super::score_repository::ScoreRepositoryTrait;
use super::token_blacklist_repository::TokenBlacklistTrait;
use super::user_repository::UserRepositoryTrait;
use super::Repositories;
use crate::error::db_error::DbError;
use crate::model::chart::{Chart, ChartFields, NewNote, Note};
use crate::model::score::{NewPlayResult, PlayResult, RankEntry};
use crate::model::user::{User, UserStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
struct RankRow {
    id: i64,
    chart_id: i64,
    user_id: i64,
    score: i32,
    achieved_at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    users: Vec<User>,
    charts: Vec<Chart>,
    notes: Vec<Note>,
    ranks: Vec<RankRow>,
    results: Vec<PlayResult>,
    revoked: HashSet<String>,
}

impl StoreInner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn push_notes(&mut self, chart_id: i64, notes: Vec<NewNote>) {
        for note in notes {
            let id = self.next_id();
            self.notes.push(Note {
                id,
                chart_id,
                time: note.time,
                lane: note.lane,
                note_type: note.note_type,
                duration: note.duration,
            });
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            user_repo: Arc::new(self.clone()),
            chart_repo: Arc::new(self.clone()),
            score_repo: Arc::new(self.clone()),
            token_blacklist: Arc::new(self.clone()),
        }
    }

    pub fn result_count(&self, user_id: i64, chart_id: i64) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .results
            .iter()
            .filter(|r| r.user_id == user_id && r.chart_id == chart_id)
            .count()
    }

    /// (user, chart) 当前最高分，未上榜为 None
    pub fn rank_score(&self, user_id: i64, chart_id: i64) -> Option<i32> {
        let inner = self.inner.lock().unwrap();
        inner
            .ranks
            .iter()
            .find(|r| r.user_id == user_id && r.chart_id == chart_id)
            .map(|r| r.score)
    }

    pub fn note_count(&self, chart_id: i64) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.notes.iter().filter(|n| n.chart_id == chart_id).count()
    }

    /// 直接写入用户，跳过密码哈希
    pub fn seed_user(&self, nickname: &str, high_score: i32) -> User {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let user = User {
            id,
            nickname: nickname.to_string(),
            email: format!("{nickname}@example.com"),
            password: String::new(),
            high_score,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        user
    }

    pub fn seed_chart(&self, music_id: &str, creator_id: i64, difficulty: i32) -> Chart {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let chart = Chart {
            id,
            music_id: music_id.to_string(),
            title: format!("{music_id} title"),
            artist: "Warak".to_string(),
            song: format!("/media/songs/{music_id}.mp3"),
            background_video: format!("/media/video/{music_id}.mp4"),
            cover_url: format!("/media/covers/{music_id}.jpg"),
            bpm: 146,
            difficulty,
            is_community_song: false,
            creator_id,
        };
        inner.charts.push(chart.clone());
        chart
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.nickname == nickname).cloned())
    }

    async fn create_user(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DbError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.nickname == nickname) {
            return Err(DbError::UniqueConstraintViolation(format!(
                "Duplicate entry '{nickname}' for key 'uk_users_nickname'"
            )));
        }
        let id = inner.next_id();
        let user = User {
            id,
            nickname: nickname.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            high_score: 0,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i64,
        nickname: &str,
        email: &str,
    ) -> Result<User, DbError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .iter()
            .any(|u| u.nickname == nickname && u.id != id)
        {
            return Err(DbError::UniqueConstraintViolation(format!(
                "Duplicate entry '{nickname}' for key 'uk_users_nickname'"
            )));
        }
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DbError::SomethingWentWrong(format!("user {id} not found")))?;
        user.nickname = nickname.to_string();
        user.email = email.to_string();
        Ok(user.clone())
    }

    async fn list_by_high_score(&self) -> Result<Vec<User>, DbError> {
        let inner = self.inner.lock().unwrap();
        let mut users = inner.users.clone();
        users.sort_by(|a, b| b.high_score.cmp(&a.high_score).then(a.id.cmp(&b.id)));
        Ok(users)
    }
}

#[async_trait]
impl ChartRepositoryTrait for MemoryStore {
    async fn list_charts(&self) -> Result<Vec<Chart>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.charts.clone())
    }

    async fn find_by_music_id(&self, music_id: &str) -> Result<Option<Chart>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.charts.iter().find(|c| c.music_id == music_id).cloned())
    }

    async fn find_notes(&self, chart_id: i64) -> Result<Vec<Note>, DbError> {
        let inner = self.inner.lock().unwrap();
        let mut notes: Vec<Note> = inner
            .notes
            .iter()
            .filter(|n| n.chart_id == chart_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));
        Ok(notes)
    }

    async fn create_chart(
        &self,
        creator_id: i64,
        music_id: &str,
        fields: ChartFields,
        notes: Vec<NewNote>,
    ) -> Result<Chart, DbError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.charts.iter().any(|c| c.music_id == music_id) {
            return Err(DbError::UniqueConstraintViolation(format!(
                "Duplicate entry '{music_id}' for key 'uk_charts_music_id'"
            )));
        }
        let id = inner.next_id();
        let chart = Chart {
            id,
            music_id: music_id.to_string(),
            title: fields.title,
            artist: fields.artist,
            song: fields.song,
            background_video: fields.background_video,
            cover_url: fields.cover_url,
            bpm: fields.bpm,
            difficulty: fields.difficulty,
            is_community_song: fields.is_community_song,
            creator_id,
        };
        inner.charts.push(chart.clone());
        inner.push_notes(id, notes);
        Ok(chart)
    }

    async fn update_chart(
        &self,
        chart_id: i64,
        fields: ChartFields,
        notes: Option<Vec<NewNote>>,
    ) -> Result<Chart, DbError> {
        let mut inner = self.inner.lock().unwrap();
        let chart = inner
            .charts
            .iter_mut()
            .find(|c| c.id == chart_id)
            .ok_or_else(|| DbError::SomethingWentWrong(format!("chart {chart_id} not found")))?;
        chart.title = fields.title;
        chart.artist = fields.artist;
        chart.song = fields.song;
        chart.background_video = fields.background_video;
        chart.cover_url = fields.cover_url;
        chart.bpm = fields.bpm;
        chart.difficulty = fields.difficulty;
        chart.is_community_song = fields.is_community_song;
        let updated = chart.clone();
        if let Some(notes) = notes {
            inner.notes.retain(|n| n.chart_id != chart_id);
            inner.push_notes(chart_id, notes);
        }
        Ok(updated)
    }

    async fn delete_chart(&self, chart_id: i64) -> Result<(), DbError> {
        let mut inner = self.inner.lock().unwrap();
        inner.charts.retain(|c| c.id != chart_id);
        inner.notes.retain(|n| n.chart_id != chart_id);
        inner.ranks.retain(|r| r.chart_id != chart_id);
        inner.results.retain(|r| r.chart_id != chart_id);
        Ok(())
    }
}

#[async_trait]
impl ScoreRepositoryTrait for MemoryStore {
    async fn record_play(&self, result: NewPlayResult) -> Result<PlayResult, DbError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let stored = PlayResult {
            id,
            music_id: result.music_id,
            user_id: result.user_id,
            chart_id: result.chart_id,
            difficulty: result.difficulty,
            score: result.score,
            accuracy: result.accuracy,
            letter_rank: result.letter_rank,
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
        };
        inner.results.push(stored.clone());

        let existing = inner
            .ranks
            .iter_mut()
            .find(|r| r.user_id == stored.user_id && r.chart_id == stored.chart_id);
        match existing {
            Some(rank) => {
                if stored.score > rank.score {
                    rank.score = stored.score;
                    rank.achieved_at = stored.played_at;
                }
            }
            None => {
                let rank_id = inner.next_id();
                inner.ranks.push(RankRow {
                    id: rank_id,
                    chart_id: stored.chart_id,
                    user_id: stored.user_id,
                    score: stored.score,
                    achieved_at: stored.played_at,
                });
            }
        }
        Ok(stored)
    }

    async fn top_ranks(&self, chart_id: i64, limit: i64) -> Result<Vec<RankEntry>, DbError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<&RankRow> = inner.ranks.iter().filter(|r| r.chart_id == chart_id).collect();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.achieved_at.cmp(&b.achieved_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(rows
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|r| RankEntry {
                user_id: r.user_id,
                nickname: inner
                    .users
                    .iter()
                    .find(|u| u.id == r.user_id)
                    .map(|u| u.nickname.clone())
                    .unwrap_or_default(),
                score: r.score,
                achieved_at: r.achieved_at,
            })
            .collect())
    }

    async fn best_result(
        &self,
        user_id: i64,
        chart_id: i64,
    ) -> Result<Option<PlayResult>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .results
            .iter()
            .filter(|r| r.user_id == user_id && r.chart_id == chart_id)
            .min_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then(a.played_at.cmp(&b.played_at))
                    .then(a.id.cmp(&b.id))
            })
            .cloned())
    }

    async fn results_for_chart(&self, chart_id: i64) -> Result<Vec<PlayResult>, DbError> {
        let inner = self.inner.lock().unwrap();
        let mut results: Vec<PlayResult> = inner
            .results
            .iter()
            .filter(|r| r.chart_id == chart_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        Ok(results)
    }

    async fn results_for_user(&self, user_id: i64) -> Result<Vec<PlayResult>, DbError> {
        let inner = self.inner.lock().unwrap();
        let mut results: Vec<PlayResult> = inner
            .results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        Ok(results)
    }

    async fn find_user_result(
        &self,
        user_id: i64,
        result_id: i64,
    ) -> Result<Option<PlayResult>, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .results
            .iter()
            .find(|r| r.id == result_id && r.user_id == user_id)
            .cloned())
    }

    async fn user_stats(&self, user_id: i64) -> Result<UserStats, DbError> {
        let inner = self.inner.lock().unwrap();
        let mine = inner.results.iter().filter(|r| r.user_id == user_id);
        let mut stats = UserStats::default();
        for result in mine {
            stats.perfect_count += result.perfect as i64;
            stats.highest_score = stats.highest_score.max(result.score as i64);
        }
        Ok(stats)
    }
}

#[async_trait]
impl TokenBlacklistTrait for MemoryStore {
    async fn revoke(&self, jti: &str, _ttl_secs: u64) -> Result<(), DbError> {
        let mut inner = self.inner.lock().unwrap();
        inner.revoked.insert(jti.to_string());
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, DbError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.revoked.contains(jti))
    }
}
