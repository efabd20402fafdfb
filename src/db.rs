// ==========================================
// 仓库拣选路径优化系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 幂等创建本子系统自有的两张表(weight_model / optimization_history)
//   库位/库存/拣货员主数据表归属外围 WMS,本库不建
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 幂等创建优化器自有表
///
/// - `weight_model`: 版本化权重模型,恰有一行 is_active=1
/// - `optimization_history`: 追加写的优化历史(训练输入)
pub fn ensure_optimizer_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS weight_model (
            version              REAL NOT NULL,
            weights_json         TEXT NOT NULL,
            zone_priorities_json TEXT NOT NULL,
            learning_rate        REAL NOT NULL,
            accuracy             REAL NOT NULL,
            is_active            INTEGER NOT NULL DEFAULT 0,
            created_at           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_weight_model_active
            ON weight_model (is_active, version);

        CREATE TABLE IF NOT EXISTS optimization_history (
            record_id           TEXT PRIMARY KEY,
            user_id             TEXT NOT NULL,
            method              TEXT NOT NULL,
            total_distance      REAL NOT NULL,
            original_distance   REAL NOT NULL,
            estimated_time      REAL NOT NULL,
            distance_saved_pct  REAL NOT NULL,
            time_saved_pct      REAL NOT NULL,
            efficiency_score    REAL NOT NULL,
            original_path_json  TEXT NOT NULL,
            optimized_path_json TEXT NOT NULL,
            unfulfilled_json    TEXT NOT NULL,
            created_at          TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_optimization_history_created
            ON optimization_history (created_at);
        "#,
    )?;
    Ok(())
}
