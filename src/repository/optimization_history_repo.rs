// ==========================================
// 仓库拣选路径优化系统 - 优化历史仓储
// ==========================================
// 红线: 追加写,本子系统不删除
// 路径以 JSON 持久化,重载后必须逐步还原(含每步距离)
// ==========================================

use crate::domain::pick::PathStep;
use crate::domain::result::HistoryRecord;
use crate::domain::types::OptimizeMethod;
use crate::engine::stores::HistoryStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{Duration, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// OptimizationHistoryRepository - 优化历史仓储
// ==========================================
pub struct OptimizationHistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OptimizationHistoryRepository {
    /// 创建新的优化历史仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<RawHistoryRow> {
        Ok(RawHistoryRow {
            record_id: row.get(0)?,
            user_id: row.get(1)?,
            method: row.get(2)?,
            total_distance: row.get(3)?,
            original_distance: row.get(4)?,
            estimated_time: row.get(5)?,
            distance_saved_pct: row.get(6)?,
            time_saved_pct: row.get(7)?,
            efficiency_score: row.get(8)?,
            original_path_json: row.get(9)?,
            optimized_path_json: row.get(10)?,
            unfulfilled_json: row.get(11)?,
            created_at: row.get(12)?,
        })
    }

    fn parse_row(raw: RawHistoryRow) -> RepositoryResult<HistoryRecord> {
        let method: OptimizeMethod = raw
            .method
            .parse()
            .map_err(RepositoryError::ValidationError)?;
        let original_path: Vec<PathStep> = serde_json::from_str(&raw.original_path_json)?;
        let optimized_path: Vec<PathStep> = serde_json::from_str(&raw.optimized_path_json)?;
        let unfulfilled_skus: Vec<String> = serde_json::from_str(&raw.unfulfilled_json)?;
        let created_at = NaiveDateTime::parse_from_str(&raw.created_at, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| {
                RepositoryError::ValidationError(format!("created_at 解析失败: {}", e))
            })?
            .and_utc();

        Ok(HistoryRecord {
            record_id: raw.record_id,
            user_id: raw.user_id,
            method,
            total_distance: raw.total_distance,
            original_distance: raw.original_distance,
            estimated_time: raw.estimated_time,
            distance_saved_pct: raw.distance_saved_pct,
            time_saved_pct: raw.time_saved_pct,
            efficiency_score: raw.efficiency_score,
            original_path,
            optimized_path,
            unfulfilled_skus,
            created_at,
        })
    }

    /// 按记录 ID 查询单条历史
    pub fn find_by_id(&self, record_id: &str) -> RepositoryResult<HistoryRecord> {
        let conn = self.get_conn()?;

        let raw = conn
            .query_row(
                &format!("{} WHERE record_id = ?1", SELECT_COLUMNS),
                params![record_id],
                Self::map_row,
            )
            .optional()?;

        match raw {
            Some(raw) => Self::parse_row(raw),
            None => Err(RepositoryError::NotFound {
                entity: "HistoryRecord".to_string(),
                id: record_id.to_string(),
            }),
        }
    }
}

struct RawHistoryRow {
    record_id: String,
    user_id: String,
    method: String,
    total_distance: f64,
    original_distance: f64,
    estimated_time: f64,
    distance_saved_pct: f64,
    time_saved_pct: f64,
    efficiency_score: f64,
    original_path_json: String,
    optimized_path_json: String,
    unfulfilled_json: String,
    created_at: String,
}

const SELECT_COLUMNS: &str = r#"
    SELECT record_id, user_id, method, total_distance, original_distance,
           estimated_time, distance_saved_pct, time_saved_pct, efficiency_score,
           original_path_json, optimized_path_json, unfulfilled_json, created_at
    FROM optimization_history
"#;

impl HistoryStore for OptimizationHistoryRepository {
    /// 追加一条优化历史记录
    fn append(&self, record: &HistoryRecord) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO optimization_history (
                record_id, user_id, method, total_distance, original_distance,
                estimated_time, distance_saved_pct, time_saved_pct, efficiency_score,
                original_path_json, optimized_path_json, unfulfilled_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                record.record_id,
                record.user_id,
                record.method.to_db_str(),
                record.total_distance,
                record.original_distance,
                record.estimated_time,
                record.distance_saved_pct,
                record.time_saved_pct,
                record.efficiency_score,
                serde_json::to_string(&record.original_path)?,
                serde_json::to_string(&record.optimized_path)?,
                serde_json::to_string(&record.unfulfilled_skus)?,
                record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;

        Ok(record.record_id.clone())
    }

    /// 读取近 window_days 天的历史记录(时间升序)
    fn recent(&self, window_days: i64) -> RepositoryResult<Vec<HistoryRecord>> {
        let conn = self.get_conn()?;

        let cutoff = (Utc::now() - Duration::days(window_days))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        let mut stmt = conn.prepare(&format!(
            "{} WHERE created_at >= ?1 ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![cutoff], Self::map_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::parse_row(row?)?);
        }
        Ok(records)
    }
}
