use crate::config::app_config::ChartConfig;
use crate::dto::chart_dto::RankEntryRes;
use crate::dto::score_dto::{ResultRes, SubmitResultReq};
use crate::error::api_error::ApiError;
use crate::error::chart_error::ChartError;
use crate::error::score_error::ScoreError;
use crate::model::chart::Chart;
use crate::model::score::{LetterRank, NewPlayResult};
use crate::model::session::AuthUser;
use crate::repository::chart_repository::ChartRepositoryTrait;
use crate::repository::score_repository::ScoreRepositoryTrait;
use crate::repository::Repositories;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScoreService {
    chart_repo: Arc<dyn ChartRepositoryTrait>,
    score_repo: Arc<dyn ScoreRepositoryTrait>,
    leaderboard_size: i64,
}

impl ScoreService {
    pub fn new(repos: &Repositories, config: &ChartConfig) -> Self {
        Self {
            chart_repo: Arc::clone(&repos.chart_repo),
            score_repo: Arc::clone(&repos.score_repo),
            leaderboard_size: config.leaderboard_size,
        }
    }

    async fn find_chart(&self, music_id: &str) -> Result<Chart, ApiError> {
        Ok(self
            .chart_repo
            .find_by_music_id(music_id)
            .await?
            .ok_or(ChartError::ChartNotFound)?)
    }

    /// 记录一次游玩；只有严格高于原最高分时才更新排行
    pub async fn submit_result(
        &self,
        user: &AuthUser,
        payload: SubmitResultReq,
    ) -> Result<ResultRes, ApiError> {
        let letter_rank = LetterRank::from_score(payload.score);
        if let Some(submitted) = payload.rank {
            if submitted != letter_rank {
                return Err(ScoreError::LetterRankMismatch {
                    submitted,
                    expected: letter_rank,
                    score: payload.score,
                }
                .into());
            }
        }
        let chart = self.find_chart(&payload.music_id).await?;

        let stored = self
            .score_repo
            .record_play(NewPlayResult {
                music_id: chart.music_id.clone(),
                user_id: user.id,
                chart_id: chart.id,
                difficulty: chart.difficulty,
                score: payload.score,
                accuracy: payload.accuracy,
                letter_rank,
                combo: payload.combo,
                is_full_combo: payload.is_full_combo,
                is_all_perfect: payload.is_all_perfect,
                early_count: payload.early_count,
                late_count: payload.late_count,
                perfect: payload.perfect,
                great: payload.great,
                good: payload.good,
                miss: payload.miss,
                bad: payload.bad,
                played_at: Utc::now(),
            })
            .await
            .map_err(|err| {
                tracing::error!(
                    "submit_result - record failed, user:{} | music_id:{} | err:{}",
                    user.id,
                    chart.music_id,
                    err.to_string()
                );
                err
            })?;
        tracing::info!(
            "submit_result - user:{} | music_id:{} | score:{} | rank:{}",
            user.id,
            stored.music_id,
            stored.score,
            stored.letter_rank
        );
        Ok(stored.into())
    }

    pub async fn leaderboard(&self, music_id: &str) -> Result<Vec<RankEntryRes>, ApiError> {
        let chart = self.find_chart(music_id).await?;
        let ranks = self
            .score_repo
            .top_ranks(chart.id, self.leaderboard_size)
            .await?;
        Ok(RankEntryRes::from_entries(ranks))
    }

    pub async fn my_results(&self, user: &AuthUser) -> Result<Vec<ResultRes>, ApiError> {
        let results = self.score_repo.results_for_user(user.id).await?;
        Ok(results.into_iter().map(ResultRes::from).collect())
    }

    pub async fn my_result(&self, user: &AuthUser, result_id: i64) -> Result<ResultRes, ApiError> {
        let result = self
            .score_repo
            .find_user_result(user.id, result_id)
            .await?
            .ok_or(ScoreError::ResultNotFound)?;
        Ok(result.into())
    }
}
