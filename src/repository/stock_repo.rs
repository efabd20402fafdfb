// ==========================================
// 仓库拣选路径优化系统 - 库存仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// FEFO 排序约定在此层的 SQL 中落实
// ==========================================

use crate::domain::pick::Position;
use crate::domain::stock::StockCandidate;
use crate::engine::stores::StockLookup;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// StockRepository - 库存快照仓储
// ==========================================
pub struct StockRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StockRepository {
    /// 创建新的库存仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl StockLookup for StockRepository {
    /// 查询可拣选库存候选
    ///
    /// 排序: 效期升序(NULL 最后) → 可用数量降序
    /// FEFO 优先,同效期优先从较满的托盘整合拣货
    fn find_eligible(&self, sku: &str, min_quantity: f64) -> RepositoryResult<Vec<StockCandidate>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT s.location_id, l.zone, s.product_name, s.available_quantity,
                   s.unit_weight, s.expiration_date, l.pos_x, l.pos_y, l.pos_z
            FROM stock_record s
            JOIN storage_location l ON l.location_id = s.location_id
            WHERE s.sku = ?1
              AND s.available_quantity >= ?2
              AND s.status = 'OCCUPIED'
            ORDER BY s.expiration_date IS NULL, s.expiration_date ASC,
                     s.available_quantity DESC
            "#,
        )?;

        let rows = stmt.query_map(params![sku, min_quantity], |row| {
            let pos_x: Option<f64> = row.get(6)?;
            let pos_y: Option<f64> = row.get(7)?;
            let pos_z: Option<f64> = row.get(8)?;
            let position = match (pos_x, pos_y, pos_z) {
                (Some(x), Some(y), Some(z)) => Some(Position::new(x, y, z)),
                _ => None,
            };

            Ok(StockCandidate {
                location_id: row.get(0)?,
                zone: row.get(1)?,
                product_name: row.get(2)?,
                available_quantity: row.get(3)?,
                unit_weight: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                expiration_date: row.get::<_, Option<NaiveDate>>(5)?,
                position,
            })
        })?;

        let mut candidates = Vec::new();
        for row in rows {
            candidates.push(row?);
        }
        Ok(candidates)
    }
}
