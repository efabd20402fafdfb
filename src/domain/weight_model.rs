// ==========================================
// 仓库拣选路径优化系统 - 权重模型
// ==========================================
// 红线: 不可变版本化值对象,训练只产生新版本,不原地修改
// 红线: 任一时刻恰有一个激活版本,发布必须原子
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 未知库区的默认优先级
pub const DEFAULT_ZONE_RANK: i32 = 5;

// ==========================================
// ModelWeights - 评分权重
// ==========================================
// 约束: 各权重在 [0,1] 内,归一化后总和为 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    pub distance: f64,          // 距离权重
    pub fefo: f64,              // 效期(FEFO)权重
    pub zone_efficiency: f64,   // 库区效率权重
    pub picker_experience: f64, // 拣货员经验权重
}

impl ModelWeights {
    /// 权重总和
    pub fn sum(&self) -> f64 {
        self.distance + self.fefo + self.zone_efficiency + self.picker_experience
    }

    /// 归一化到总和为 1
    ///
    /// 总和为 0 或非有限值时回退到默认权重,避免产出 NaN
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Self::default();
        }
        Self {
            distance: self.distance / sum,
            fefo: self.fefo / sum,
            zone_efficiency: self.zone_efficiency / sum,
            picker_experience: self.picker_experience / sum,
        }
    }
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            distance: 0.4,
            fefo: 0.3,
            zone_efficiency: 0.2,
            picker_experience: 0.1,
        }
    }
}

// ==========================================
// WeightModel - 版本化权重模型
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightModel {
    pub version: f64,                        // 版本号(训练 +0.1)
    pub weights: ModelWeights,               // 评分权重
    pub zone_priorities: HashMap<String, i32>, // 库区 → 优先级(1 最高)
    pub learning_rate: f64,                  // 训练扰动幅度
    pub accuracy: f64,                       // 派生精度 = min(0.99, 最优均值/100)
    pub created_at: DateTime<Utc>,           // 版本创建时间
}

impl WeightModel {
    /// 查询库区优先级,未知库区返回默认值 5
    pub fn zone_rank(&self, zone: &str) -> i32 {
        self.zone_priorities
            .get(zone)
            .copied()
            .unwrap_or(DEFAULT_ZONE_RANK)
    }
}

impl Default for WeightModel {
    fn default() -> Self {
        let mut zone_priorities = HashMap::new();
        zone_priorities.insert("PF-Zone".to_string(), 1);
        zone_priorities.insert("Premium Zone".to_string(), 2);
        zone_priorities.insert("A-Zone".to_string(), 3);
        zone_priorities.insert("B-Zone".to_string(), 4);
        zone_priorities.insert("C-Zone".to_string(), 5);

        Self {
            version: 1.0,
            weights: ModelWeights::default(),
            zone_priorities,
            learning_rate: 0.01,
            accuracy: 0.5,
            created_at: Utc::now(),
        }
    }
}
