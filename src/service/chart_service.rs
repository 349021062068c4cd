use crate::config::app_config::ChartConfig;
use crate::dto::chart_dto::{
    BestRecordRes, ChartDetailRes, ChartRes, CreateChartReq, NoteDto, NoteRes, RankEntryRes,
    UpdateChartReq, MAX_CHART_NOTES,
};
use crate::dto::score_dto::ResultRes;
use crate::error::api_error::ApiError;
use crate::error::chart_error::ChartError;
use crate::error::db_error::DbError;
use crate::model::chart::{Chart, NewNote, NoteType};
use crate::model::session::AuthUser;
use crate::repository::chart_repository::ChartRepositoryTrait;
use crate::repository::score_repository::ScoreRepositoryTrait;
use crate::repository::Repositories;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    chart_repo: Arc<dyn ChartRepositoryTrait>,
    score_repo: Arc<dyn ScoreRepositoryTrait>,
    config: ChartConfig,
}

impl ChartService {
    pub fn new(repos: &Repositories, config: &ChartConfig) -> Self {
        Self {
            chart_repo: Arc::clone(&repos.chart_repo),
            score_repo: Arc::clone(&repos.score_repo),
            config: config.clone(),
        }
    }

    pub async fn list_charts(&self) -> Result<Vec<ChartRes>, ApiError> {
        let charts = self.chart_repo.list_charts().await?;
        Ok(charts.into_iter().map(ChartRes::from).collect())
    }

    async fn find_chart(&self, music_id: &str) -> Result<Chart, ApiError> {
        Ok(self
            .chart_repo
            .find_by_music_id(music_id)
            .await?
            .ok_or(ChartError::ChartNotFound)?)
    }

    /// 谱面、音符、排行榜，登录时附带调用者的最佳成绩
    pub async fn get_chart_detail(
        &self,
        music_id: &str,
        viewer: Option<&AuthUser>,
    ) -> Result<ChartDetailRes, ApiError> {
        let chart = self.find_chart(music_id).await?;
        let notes = self.chart_repo.find_notes(chart.id).await?;
        let ranks = self
            .score_repo
            .top_ranks(chart.id, self.config.leaderboard_size)
            .await?;
        let user_best_record = match viewer {
            Some(user) => self
                .score_repo
                .best_result(user.id, chart.id)
                .await?
                .map(BestRecordRes::from),
            None => None,
        };
        Ok(ChartDetailRes {
            chart: chart.into(),
            notes: notes.into_iter().map(NoteRes::from).collect(),
            ranks: RankEntryRes::from_entries(ranks),
            user_best_record,
        })
    }

    pub async fn create_chart(
        &self,
        creator: &AuthUser,
        payload: CreateChartReq,
    ) -> Result<ChartDetailRes, ApiError> {
        let notes = validate_notes(&payload.notes, self.config.lane_count)?;
        if self
            .chart_repo
            .find_by_music_id(&payload.music_id)
            .await?
            .is_some()
        {
            return Err(ChartError::MusicIdTaken(payload.music_id).into());
        }

        let chart = match self
            .chart_repo
            .create_chart(creator.id, &payload.music_id, payload.fields(), notes)
            .await
        {
            Ok(chart) => chart,
            Err(DbError::UniqueConstraintViolation(_)) => {
                Err(ChartError::MusicIdTaken(payload.music_id.clone()))?
            }
            Err(err) => Err(err)?,
        };
        tracing::info!(
            "create_chart - music_id:{} | creator:{}",
            chart.music_id,
            creator.id
        );
        self.get_chart_detail(&chart.music_id, Some(creator)).await
    }

    pub async fn update_chart(
        &self,
        editor: &AuthUser,
        music_id: &str,
        payload: UpdateChartReq,
    ) -> Result<ChartDetailRes, ApiError> {
        let chart = self.find_chart(music_id).await?;
        if chart.creator_id != editor.id {
            return Err(ChartError::NotChartCreator.into());
        }
        let notes = match &payload.notes {
            Some(notes) => Some(validate_notes(notes, self.config.lane_count)?),
            None => None,
        };
        self.chart_repo
            .update_chart(chart.id, payload.fields(), notes)
            .await?;
        tracing::info!("update_chart - music_id:{} | editor:{}", music_id, editor.id);
        self.get_chart_detail(music_id, Some(editor)).await
    }

    pub async fn delete_chart(&self, editor: &AuthUser, music_id: &str) -> Result<(), ApiError> {
        let chart = self.find_chart(music_id).await?;
        if chart.creator_id != editor.id {
            return Err(ChartError::NotChartCreator.into());
        }
        self.chart_repo.delete_chart(chart.id).await?;
        tracing::info!("delete_chart - music_id:{} | editor:{}", music_id, editor.id);
        Ok(())
    }

    /// 该谱面的全部成绩，分数倒序
    pub async fn chart_results(&self, music_id: &str) -> Result<Vec<ResultRes>, ApiError> {
        let chart = self.find_chart(music_id).await?;
        let results = self.score_repo.results_for_chart(chart.id).await?;
        Ok(results.into_iter().map(ResultRes::from).collect())
    }
}

/// 逐个校验音符，任一不合法则整体拒绝
pub fn validate_notes(notes: &[NoteDto], lane_count: i32) -> Result<Vec<NewNote>, ChartError> {
    if notes.len() > MAX_CHART_NOTES {
        return Err(ChartError::InvalidNote {
            index: MAX_CHART_NOTES,
            reason: format!("a chart may have at most {} notes", MAX_CHART_NOTES),
        });
    }
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            let invalid = |reason: String| ChartError::InvalidNote { index, reason };
            if note.time < 0 {
                return Err(invalid(format!("time must be >= 0, got {}", note.time)));
            }
            if note.lane < 0 || note.lane >= lane_count {
                return Err(invalid(format!(
                    "lane must be in 0..{}, got {}",
                    lane_count, note.lane
                )));
            }
            match (note.note_type, note.duration) {
                (NoteType::Hold, Some(duration)) if duration > 0 => {}
                (NoteType::Hold, _) => {
                    return Err(invalid("hold note requires a positive duration".to_string()))
                }
                (NoteType::Tap, Some(_)) => {
                    return Err(invalid("tap note must not have a duration".to_string()))
                }
                (NoteType::Tap, None) => {}
            }
            Ok(NewNote {
                time: note.time,
                lane: note.lane,
                note_type: note.note_type,
                duration: note.duration,
            })
        })
        .collect()
}
