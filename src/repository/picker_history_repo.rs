// ==========================================
// 仓库拣选路径优化系统 - 拣货员表现仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// 默认分(无历史时取 50)由引擎层决定,本层只返回 None
// ==========================================

use crate::engine::stores::PickerHistory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{Duration, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// PickerPerformanceRepository - 拣货员表现仓储
// ==========================================
pub struct PickerPerformanceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PickerPerformanceRepository {
    /// 创建新的拣货员表现仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl PickerHistory for PickerPerformanceRepository {
    /// 查询拣货员在指定库位近 window_days 天的平均表现分
    fn experience_score(
        &self,
        picker_id: &str,
        location_id: &str,
        window_days: i64,
    ) -> RepositoryResult<Option<f64>> {
        let conn = self.get_conn()?;

        let cutoff = (Utc::now() - Duration::days(window_days))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        let score: Option<f64> = conn.query_row(
            r#"
            SELECT AVG(performance_score)
            FROM picker_performance
            WHERE picker_id = ?1 AND location_id = ?2 AND picked_at >= ?3
            "#,
            params![picker_id, location_id, cutoff],
            |row| row.get(0),
        )?;

        Ok(score)
    }
}
