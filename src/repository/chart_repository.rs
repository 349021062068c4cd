use crate::db::database::{Database, DatabaseTrait};
use crate::error::db_error::DbError;
use crate::model::chart::{Chart, ChartFields, NewNote, Note};
use async_trait::async_trait;
use sqlx::{MySql, QueryBuilder, Transaction};
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

const CHART_COLUMNS: &str = "id, music_id, title, artist, song, background_video, cover_url, \
    bpm, difficulty, is_community_song, creator_id";

#[derive(Clone)]
pub struct ChartRepository {
    pub(crate) db_conn: Arc<Database>,
}

impl ChartRepository {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChartRepositoryTrait: Send + Sync {
    async fn list_charts(&self) -> Result<Vec<Chart>, DbError>;

    async fn find_by_music_id(&self, music_id: &str) -> Result<Option<Chart>, DbError>;

    /// 按时间顺序返回谱面的全部音符
    async fn find_notes(&self, chart_id: i64) -> Result<Vec<Note>, DbError>;

    /// 谱面与音符在同一事务中写入
    async fn create_chart(
        &self,
        creator_id: i64,
        music_id: &str,
        fields: ChartFields,
        notes: Vec<NewNote>,
    ) -> Result<Chart, DbError>;

    /// `notes` 为 Some 时整体替换原有音符
    async fn update_chart(
        &self,
        chart_id: i64,
        fields: ChartFields,
        notes: Option<Vec<NewNote>>,
    ) -> Result<Chart, DbError>;

    /// 级联删除音符、排行与成绩
    async fn delete_chart(&self, chart_id: i64) -> Result<(), DbError>;
}

#[async_trait]
impl ChartRepositoryTrait for ChartRepository {
    async fn list_charts(&self) -> Result<Vec<Chart>, DbError> {
        let sql = format!("SELECT {CHART_COLUMNS} FROM charts ORDER BY id ASC");
        let charts = sqlx::query_as::<_, Chart>(&sql)
            .fetch_all(self.db_conn.get_slave_pool())
            .await?;
        Ok(charts)
    }

    async fn find_by_music_id(&self, music_id: &str) -> Result<Option<Chart>, DbError> {
        let sql = format!("SELECT {CHART_COLUMNS} FROM charts WHERE music_id = ?");
        let chart = sqlx::query_as::<_, Chart>(&sql)
            .bind(music_id)
            .fetch_optional(self.db_conn.get_master_pool())
            .await?;
        Ok(chart)
    }

    async fn find_notes(&self, chart_id: i64) -> Result<Vec<Note>, DbError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT id, chart_id, time, lane, note_type, duration FROM notes
            WHERE chart_id = ? ORDER BY time ASC, id ASC",
        )
        .bind(chart_id)
        .fetch_all(self.db_conn.get_slave_pool())
        .await?;
        Ok(notes)
    }

    async fn create_chart(
        &self,
        creator_id: i64,
        music_id: &str,
        fields: ChartFields,
        notes: Vec<NewNote>,
    ) -> Result<Chart, DbError> {
        let mut tx = self.db_conn.get_master_pool().begin().await?;
        let sql_ret = sqlx::query(
            "INSERT INTO charts (music_id, title, artist, song, background_video, cover_url,
                bpm, difficulty, is_community_song, creator_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(music_id)
        .bind(&fields.title)
        .bind(&fields.artist)
        .bind(&fields.song)
        .bind(&fields.background_video)
        .bind(&fields.cover_url)
        .bind(fields.bpm)
        .bind(fields.difficulty)
        .bind(fields.is_community_song)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;
        let chart_id = sql_ret.last_insert_id() as i64;

        insert_notes(&mut tx, chart_id, &notes).await?;
        let chart = fetch_chart(&mut tx, chart_id).await?;
        tx.commit().await?;
        tracing::debug!("create_chart - id:{} | notes:{}", chart_id, notes.len());
        Ok(chart)
    }

    async fn update_chart(
        &self,
        chart_id: i64,
        fields: ChartFields,
        notes: Option<Vec<NewNote>>,
    ) -> Result<Chart, DbError> {
        let mut tx = self.db_conn.get_master_pool().begin().await?;
        sqlx::query(
            "UPDATE charts SET title = ?, artist = ?, song = ?, background_video = ?,
                cover_url = ?, bpm = ?, difficulty = ?, is_community_song = ?
            WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.artist)
        .bind(&fields.song)
        .bind(&fields.background_video)
        .bind(&fields.cover_url)
        .bind(fields.bpm)
        .bind(fields.difficulty)
        .bind(fields.is_community_song)
        .bind(chart_id)
        .execute(&mut *tx)
        .await?;

        if let Some(notes) = notes {
            let sql_ret = sqlx::query("DELETE FROM notes WHERE chart_id = ?")
                .bind(chart_id)
                .execute(&mut *tx)
                .await?;
            tracing::debug!(
                "update_chart - replaced notes:{} -> {}",
                sql_ret.rows_affected(),
                notes.len()
            );
            insert_notes(&mut tx, chart_id, &notes).await?;
        }
        let chart = fetch_chart(&mut tx, chart_id).await?;
        tx.commit().await?;
        Ok(chart)
    }

    async fn delete_chart(&self, chart_id: i64) -> Result<(), DbError> {
        let sql_ret = sqlx::query("DELETE FROM charts WHERE id = ?")
            .bind(chart_id)
            .execute(self.db_conn.get_master_pool())
            .await?;
        tracing::debug!("delete_chart - rows_affected:{}", sql_ret.rows_affected());
        Ok(())
    }
}

/// MySQL 单条语句最多 65535 个占位符
const MYSQL_MAX_PLACEHOLDERS: usize = 65_535;
const NOTE_BIND_COLUMNS: usize = 5;
/// 每批写入的音符数
const NOTE_INSERT_BATCH: usize = 1_000;

async fn insert_notes(
    tx: &mut Transaction<'_, MySql>,
    chart_id: i64,
    notes: &[NewNote],
) -> Result<(), sqlx::Error> {
    for batch in notes.chunks(NOTE_INSERT_BATCH) {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("INSERT INTO notes (chart_id, time, lane, note_type, duration) ");
        builder.push_values(batch, |mut row, note| {
            row.push_bind(chart_id)
                .push_bind(note.time)
                .push_bind(note.lane)
                .push_bind(note.note_type.as_str())
                .push_bind(note.duration);
        });
        builder.build().execute(&mut **tx).await?;
    }
    tracing::debug!(
        "insert_notes - chart:{} | notes:{} | batches:{}",
        chart_id,
        notes.len(),
        notes.chunks(NOTE_INSERT_BATCH).len()
    );
    Ok(())
}

async fn fetch_chart(tx: &mut Transaction<'_, MySql>, chart_id: i64) -> Result<Chart, sqlx::Error> {
    let sql = format!("SELECT {CHART_COLUMNS} FROM charts WHERE id = ?");
    sqlx::query_as::<_, Chart>(&sql)
        .bind(chart_id)
        .fetch_one(&mut **tx)
        .await
}
