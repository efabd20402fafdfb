// ==========================================
// 仓库拣选路径优化系统 - 优化结果模型
// ==========================================
// OptimizationResult: 一次优化调用的产物
// HistoryRecord: 结果落库后的追加记录,仅作训练输入
// ==========================================

use crate::domain::pick::PathStep;
use crate::domain::types::OptimizeMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// OptimizationResult - 优化结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub method: OptimizeMethod,        // 实际使用的优化方法
    pub original_path: Vec<PathStep>,  // 原始顺序(调用方输入序)路径
    pub optimized_path: Vec<PathStep>, // 优化后路径
    pub total_distance: f64,           // 优化后总距离(米)
    pub original_distance: f64,        // 原始顺序总距离(米)
    pub estimated_time: f64,           // 优化后预计耗时(分钟)
    pub original_time: f64,            // 原始顺序预计耗时(分钟)
    pub distance_saved_pct: f64,       // 距离节省百分比
    pub time_saved_pct: f64,           // 时间节省百分比
    pub efficiency_score: f64,         // 效率分 [0,100]
    pub unfulfilled_skus: Vec<String>, // 无可拣库存而被丢弃的 SKU(部分履约信号)
}

// ==========================================
// HistoryRecord - 优化历史记录
// ==========================================
// 红线: 追加写,本子系统不删除;同一次调用内不回读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub record_id: String,             // 记录 ID (UUID)
    pub user_id: String,               // 操作人
    pub method: OptimizeMethod,        // 优化方法
    pub total_distance: f64,           // 优化后总距离
    pub original_distance: f64,        // 原始顺序总距离
    pub estimated_time: f64,           // 预计耗时
    pub distance_saved_pct: f64,       // 距离节省百分比
    pub time_saved_pct: f64,           // 时间节省百分比
    pub efficiency_score: f64,         // 效率分
    pub original_path: Vec<PathStep>,  // 原始路径(JSON 持久化)
    pub optimized_path: Vec<PathStep>, // 优化路径(JSON 持久化)
    pub unfulfilled_skus: Vec<String>, // 未履约 SKU
    pub created_at: DateTime<Utc>,     // 落库时间
}

impl HistoryRecord {
    /// 由优化结果构造历史记录
    pub fn from_result(result: &OptimizationResult, user_id: &str, record_id: String) -> Self {
        Self {
            record_id,
            user_id: user_id.to_string(),
            method: result.method,
            total_distance: result.total_distance,
            original_distance: result.original_distance,
            estimated_time: result.estimated_time,
            distance_saved_pct: result.distance_saved_pct,
            time_saved_pct: result.time_saved_pct,
            efficiency_score: result.efficiency_score,
            original_path: result.original_path.clone(),
            optimized_path: result.optimized_path.clone(),
            unfulfilled_skus: result.unfulfilled_skus.clone(),
            created_at: Utc::now(),
        }
    }
}
