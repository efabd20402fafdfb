// ==========================================
// 仓库拣选路径优化系统 - 库位仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::domain::pick::Position;
use crate::domain::stock::LocationRecord;
use crate::engine::stores::LocationStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// LocationRepository - 库位主数据仓储
// ==========================================
pub struct LocationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LocationRepository {
    /// 创建新的库位仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl LocationStore for LocationRepository {
    /// 列出全部库位
    ///
    /// 按 rowid 排序保证列出顺序稳定 —— 合成布局的行列落位依赖该顺序
    fn all_locations(&self) -> RepositoryResult<Vec<LocationRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT location_id, zone, pos_x, pos_y, pos_z
            FROM storage_location
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let pos_x: Option<f64> = row.get(2)?;
            let pos_y: Option<f64> = row.get(3)?;
            let pos_z: Option<f64> = row.get(4)?;
            let position = match (pos_x, pos_y, pos_z) {
                (Some(x), Some(y), Some(z)) => Some(Position::new(x, y, z)),
                _ => None,
            };

            Ok(LocationRecord {
                location_id: row.get(0)?,
                zone: row.get(1)?,
                position,
            })
        })?;

        let mut locations = Vec::new();
        for row in rows {
            locations.push(row?);
        }
        Ok(locations)
    }
}
