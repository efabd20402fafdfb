// ==========================================
// 仓库拣选路径优化系统 - 权重模型仓储
// ==========================================
// 红线: 版本化存储,发布必须原子(同一事务内切换激活标记)
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::domain::weight_model::{ModelWeights, WeightModel};
use crate::engine::stores::ModelStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// WeightModelRepository - 权重模型仓储
// ==========================================
pub struct WeightModelRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WeightModelRepository {
    /// 创建新的权重模型仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_model(row: &Row<'_>) -> rusqlite::Result<(f64, String, String, f64, f64, String)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    fn parse_model(
        version: f64,
        weights_json: &str,
        zone_priorities_json: &str,
        learning_rate: f64,
        accuracy: f64,
        created_at: &str,
    ) -> RepositoryResult<WeightModel> {
        let weights: ModelWeights = serde_json::from_str(weights_json)?;
        let zone_priorities: HashMap<String, i32> = serde_json::from_str(zone_priorities_json)?;
        let created_at = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| {
                RepositoryError::ValidationError(format!("created_at 解析失败: {}", e))
            })?
            .and_utc();

        Ok(WeightModel {
            version,
            weights,
            zone_priorities,
            learning_rate,
            accuracy,
            created_at,
        })
    }

    /// 列出全部模型版本(版本升序,诊断用)
    pub fn list_versions(&self) -> RepositoryResult<Vec<f64>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT version FROM weight_model ORDER BY version ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, f64>(0))?;

        let mut versions = Vec::new();
        for row in rows {
            versions.push(row?);
        }
        Ok(versions)
    }
}

impl ModelStore for WeightModelRepository {
    /// 读取当前激活的权重模型
    ///
    /// # 返回
    /// - 已发布过版本: 激活版本
    /// - 从未发布: 默认模型(version=1.0)
    fn active(&self) -> RepositoryResult<WeightModel> {
        let conn = self.get_conn()?;

        let row = conn
            .query_row(
                r#"
                SELECT version, weights_json, zone_priorities_json,
                       learning_rate, accuracy, created_at
                FROM weight_model
                WHERE is_active = 1
                ORDER BY version DESC
                LIMIT 1
                "#,
                [],
                Self::row_to_model,
            )
            .optional()?;

        match row {
            Some((version, weights_json, zones_json, lr, accuracy, created_at)) => {
                Self::parse_model(version, &weights_json, &zones_json, lr, accuracy, &created_at)
            }
            None => {
                debug!("weight_model 表无激活版本, 回退默认模型");
                Ok(WeightModel::default())
            }
        }
    }

    /// 发布新版本并切换激活标记(单事务,原子)
    fn publish(&self, model: &WeightModel) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute("UPDATE weight_model SET is_active = 0 WHERE is_active = 1", [])?;

        let weights_json = serde_json::to_string(&model.weights)?;
        let zones_json = serde_json::to_string(&model.zone_priorities)?;

        tx.execute(
            r#"
            INSERT INTO weight_model (
                version, weights_json, zone_priorities_json,
                learning_rate, accuracy, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)
            "#,
            params![
                model.version,
                weights_json,
                zones_json,
                model.learning_rate,
                model.accuracy,
                model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;

        tx.commit()?;
        Ok(())
    }
}
