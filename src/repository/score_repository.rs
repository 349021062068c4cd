use crate::db::database::{Database, DatabaseTrait};
use crate::error::db_error::DbError;
use crate::model::score::{NewPlayResult, PlayResult, RankEntry};
use crate::model::user::UserStats;
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

const RESULT_COLUMNS: &str = "id, music_id, user_id, chart_id, difficulty, score, accuracy, \
    letter_rank, combo, is_full_combo, is_all_perfect, early_count, late_count, perfect, great, \
    good, miss, bad, played_at";

#[derive(Clone)]
pub struct ScoreRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl ScoreRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScoreRepositoryTrait: Send + Sync {
    /// 写入成绩并更新 (user, chart) 最高分，二者同一事务提交
    async fn record_play(&self, result: NewPlayResult) -> Result<PlayResult, DbError>;

    /// 分数倒序，同分按先达成者在前
    async fn top_ranks(&self, chart_id: i64, limit: i64) -> Result<Vec<RankEntry>, DbError>;

    async fn best_result(&self, user_id: i64, chart_id: i64)
        -> Result<Option<PlayResult>, DbError>;

    async fn results_for_chart(&self, chart_id: i64) -> Result<Vec<PlayResult>, DbError>;

    /// 最近的在前
    async fn results_for_user(&self, user_id: i64) -> Result<Vec<PlayResult>, DbError>;

    async fn find_user_result(
        &self,
        user_id: i64,
        result_id: i64,
    ) -> Result<Option<PlayResult>, DbError>;

    /// 无成绩时各项为 0
    async fn user_stats(&self, user_id: i64) -> Result<UserStats, DbError>;
}

#[async_trait]
impl ScoreRepositoryTrait for ScoreRepository {
    async fn record_play(&self, result: NewPlayResult) -> Result<PlayResult, DbError> {
        let mut tx = self.db_conn.get_master_pool().begin().await?;

        let sql_ret = sqlx::query(
            "INSERT INTO play_results (music_id, user_id, chart_id, difficulty, score, accuracy,
                letter_rank, combo, is_full_combo, is_all_perfect, early_count, late_count,
                perfect, great, good, miss, bad, played_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&result.music_id)
        .bind(result.user_id)
        .bind(result.chart_id)
        .bind(result.difficulty)
        .bind(result.score)
        .bind(result.accuracy)
        .bind(result.letter_rank.as_str())
        .bind(&result.combo)
        .bind(result.is_full_combo)
        .bind(result.is_all_perfect)
        .bind(result.early_count)
        .bind(result.late_count)
        .bind(result.perfect)
        .bind(result.great)
        .bind(result.good)
        .bind(result.miss)
        .bind(result.bad)
        .bind(result.played_at)
        .execute(&mut *tx)
        .await?;
        let result_id = sql_ret.last_insert_id() as i64;

        // 唯一键 (chart_id, user_id) 上的行锁保证并发提交不会丢失最高分
        // achieved_at 必须先于 score 赋值，MySQL 按顺序求值
        let sql_ret = sqlx::query(
            "INSERT INTO chart_ranks (chart_id, user_id, score, achieved_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                achieved_at = IF(VALUES(score) > score, VALUES(achieved_at), achieved_at),
                score = GREATEST(score, VALUES(score))",
        )
        .bind(result.chart_id)
        .bind(result.user_id)
        .bind(result.score)
        .bind(result.played_at)
        .execute(&mut *tx)
        .await?;
        tracing::debug!(
            "record_play - result:{} | rank rows_affected:{}",
            result_id,
            sql_ret.rows_affected()
        );

        let sql = format!("SELECT {RESULT_COLUMNS} FROM play_results WHERE id = ?");
        let stored = sqlx::query_as::<_, PlayResult>(&sql)
            .bind(result_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn top_ranks(&self, chart_id: i64, limit: i64) -> Result<Vec<RankEntry>, DbError> {
        if limit <= 0 {
            tracing::error!("top_ranks - limit <= 0 is error!!");
            return Ok(vec![]);
        }
        let ranks = sqlx::query_as::<_, RankEntry>(
            "SELECT r.user_id, u.nickname, r.score, r.achieved_at
            FROM chart_ranks r
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.chart_id = ?
            ORDER BY r.score DESC, r.achieved_at ASC, r.id ASC
            LIMIT ?",
        )
        .bind(chart_id)
        .bind(limit)
        .fetch_all(self.db_conn.get_slave_pool())
        .await?;
        Ok(ranks)
    }

    async fn best_result(
        &self,
        user_id: i64,
        chart_id: i64,
    ) -> Result<Option<PlayResult>, DbError> {
        let sql = format!(
            "SELECT {RESULT_COLUMNS} FROM play_results
            WHERE user_id = ? AND chart_id = ?
            ORDER BY score DESC, played_at ASC, id ASC
            LIMIT 1"
        );
        let result = sqlx::query_as::<_, PlayResult>(&sql)
            .bind(user_id)
            .bind(chart_id)
            .fetch_optional(self.db_conn.get_slave_pool())
            .await?;
        Ok(result)
    }

    async fn results_for_chart(&self, chart_id: i64) -> Result<Vec<PlayResult>, DbError> {
        let sql = format!(
            "SELECT {RESULT_COLUMNS} FROM play_results
            WHERE chart_id = ?
            ORDER BY score DESC, played_at ASC, id ASC"
        );
        let results = sqlx::query_as::<_, PlayResult>(&sql)
            .bind(chart_id)
            .fetch_all(self.db_conn.get_slave_pool())
            .await?;
        Ok(results)
    }

    async fn results_for_user(&self, user_id: i64) -> Result<Vec<PlayResult>, DbError> {
        let sql = format!(
            "SELECT {RESULT_COLUMNS} FROM play_results
            WHERE user_id = ?
            ORDER BY played_at DESC, id DESC"
        );
        let results = sqlx::query_as::<_, PlayResult>(&sql)
            .bind(user_id)
            .fetch_all(self.db_conn.get_slave_pool())
            .await?;
        Ok(results)
    }

    async fn find_user_result(
        &self,
        user_id: i64,
        result_id: i64,
    ) -> Result<Option<PlayResult>, DbError> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM play_results WHERE id = ? AND user_id = ?");
        let result = sqlx::query_as::<_, PlayResult>(&sql)
            .bind(result_id)
            .bind(user_id)
            .fetch_optional(self.db_conn.get_master_pool())
            .await?;
        Ok(result)
    }

    async fn user_stats(&self, user_id: i64) -> Result<UserStats, DbError> {
        let stats = sqlx::query_as::<_, UserStats>(
            "SELECT CAST(COALESCE(SUM(perfect), 0) AS SIGNED) AS perfect_count,
                CAST(COALESCE(MAX(score), 0) AS SIGNED) AS highest_score
            FROM play_results
            WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(self.db_conn.get_slave_pool())
        .await?;
        Ok(stats)
    }
}
