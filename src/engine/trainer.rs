// ==========================================
// 仓库拣选路径优化系统 - 权重训练引擎
// ==========================================
// 训练规则(刻意保留的朴素随机游走,非梯度下降):
// - 按方法分组历史记录,取各组效率分均值的最大者
// - 各权重加 uniform(-learning_rate, learning_rate) 扰动,钳到 [0.1, 0.8] 后归一化
// - version +0.1, accuracy = min(0.99, 最优均值/100)
// 红线: 不足 10 条历史记录必须显式报错,不得静默训练
// ==========================================

use crate::domain::result::HistoryRecord;
use crate::domain::types::OptimizeMethod;
use crate::domain::weight_model::{ModelWeights, WeightModel};
use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// 训练最少历史记录数
pub const MIN_TRAINING_RECORDS: usize = 10;

/// 训练输入时间窗口(天)
pub const TRAINING_WINDOW_DAYS: i64 = 180;

/// 扰动后单项权重下限
pub const WEIGHT_FLOOR: f64 = 0.1;

/// 扰动后单项权重上限
pub const WEIGHT_CEILING: f64 = 0.8;

/// 训练错误类型
#[derive(Error, Debug)]
pub enum TrainError {
    #[error("训练数据不足: 仅 {actual} 条历史记录, 至少需要 {required} 条")]
    InsufficientData { actual: usize, required: usize },
}

/// 训练产出摘要
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct TrainOutcome {
    pub version: f64,
    pub accuracy: f64,
}

// ==========================================
// WeightTrainer - 权重训练引擎
// ==========================================
pub struct WeightTrainer {
    // 无状态引擎,不需要注入依赖
}

impl WeightTrainer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 基于历史记录训练新版本权重模型
    ///
    /// # 参数
    /// - `current`: 当前激活模型(新版本的基底)
    /// - `history`: 近 180 天历史记录
    /// - `rng`: 随机源(测试注入固定种子以复现)
    ///
    /// # 返回
    /// - `Ok(WeightModel)`: 新版本模型(调用方发布成功后才生效)
    /// - `Err(TrainError::InsufficientData)`: 历史记录不足
    pub fn train<R: Rng>(
        &self,
        current: &WeightModel,
        history: &[HistoryRecord],
        rng: &mut R,
    ) -> Result<WeightModel, TrainError> {
        if history.len() < MIN_TRAINING_RECORDS {
            return Err(TrainError::InsufficientData {
                actual: history.len(),
                required: MIN_TRAINING_RECORDS,
            });
        }

        let best_mean = best_mean_efficiency(history);

        let amplitude = current.learning_rate;
        let perturbed = ModelWeights {
            distance: perturb(current.weights.distance, amplitude, rng),
            fefo: perturb(current.weights.fefo, amplitude, rng),
            zone_efficiency: perturb(current.weights.zone_efficiency, amplitude, rng),
            picker_experience: perturb(current.weights.picker_experience, amplitude, rng),
        };

        let model = WeightModel {
            version: current.version + 0.1,
            weights: perturbed.normalized(),
            zone_priorities: current.zone_priorities.clone(),
            learning_rate: current.learning_rate,
            accuracy: (best_mean / 100.0).min(0.99),
            created_at: Utc::now(),
        };

        info!(
            "权重训练完成: version={:.1}, best_mean_efficiency={:.2}, accuracy={:.2}",
            model.version, best_mean, model.accuracy
        );
        Ok(model)
    }
}

impl Default for WeightTrainer {
    fn default() -> Self {
        Self::new()
    }
}

/// 各方法效率分均值的最大者
fn best_mean_efficiency(history: &[HistoryRecord]) -> f64 {
    let mut sums: HashMap<OptimizeMethod, (f64, usize)> = HashMap::new();
    for record in history {
        let entry = sums.entry(record.method).or_insert((0.0, 0));
        entry.0 += record.efficiency_score;
        entry.1 += 1;
    }

    sums.values()
        .map(|(sum, count)| sum / *count as f64)
        .fold(0.0, f64::max)
}

/// 单项权重扰动: += uniform(-amplitude, amplitude),钳到 [0.1, 0.8]
fn perturb<R: Rng>(weight: f64, amplitude: f64, rng: &mut R) -> f64 {
    let delta = rng.random_range(-amplitude..=amplitude);
    (weight + delta).clamp(WEIGHT_FLOOR, WEIGHT_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::OptimizationResult;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn record(method: OptimizeMethod, efficiency: f64) -> HistoryRecord {
        let result = OptimizationResult {
            method,
            original_path: vec![],
            optimized_path: vec![],
            total_distance: 0.0,
            original_distance: 0.0,
            estimated_time: 0.0,
            original_time: 0.0,
            distance_saved_pct: 0.0,
            time_saved_pct: 0.0,
            efficiency_score: efficiency,
            unfulfilled_skus: vec![],
        };
        HistoryRecord::from_result(&result, "tester", format!("R-{}", efficiency))
    }

    #[test]
    fn test_insufficient_data_is_rejected() {
        let history: Vec<HistoryRecord> = (0..5)
            .map(|i| record(OptimizeMethod::Hybrid, 80.0 + i as f64))
            .collect();
        let mut rng = SmallRng::seed_from_u64(1);
        let result = WeightTrainer::new().train(&WeightModel::default(), &history, &mut rng);

        match result {
            Err(TrainError::InsufficientData { actual, required }) => {
                assert_eq!(actual, 5);
                assert_eq!(required, 10);
            }
            other => panic!("期望 InsufficientData, 实得 {:?}", other.map(|m| m.version)),
        }
    }

    #[test]
    fn test_train_bumps_version_and_normalizes() {
        let history: Vec<HistoryRecord> = (0..12)
            .map(|i| {
                let method = if i % 2 == 0 {
                    OptimizeMethod::Genetic
                } else {
                    OptimizeMethod::NearestNeighbor
                };
                record(method, 70.0 + i as f64)
            })
            .collect();
        let current = WeightModel::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let model = WeightTrainer::new().train(&current, &history, &mut rng).unwrap();

        assert!((model.version - 1.1).abs() < 1e-9);
        assert!((model.weights.sum() - 1.0).abs() < 1e-9);
        assert!(model.weights.distance > 0.0);
        assert!(model.weights.fefo > 0.0);
        assert!(model.weights.zone_efficiency > 0.0);
        assert!(model.weights.picker_experience > 0.0);
        // 各权重与基底偏移不超过扰动幅度(归一化前 ±0.01,归一化微调)
        assert!((model.weights.distance - current.weights.distance).abs() < 0.05);
        // 库区优先级原样继承
        assert_eq!(model.zone_priorities, current.zone_priorities);
    }

    #[test]
    fn test_accuracy_derived_from_best_mean() {
        let mut history: Vec<HistoryRecord> = (0..10)
            .map(|_| record(OptimizeMethod::Genetic, 80.0))
            .collect();
        history.extend((0..10).map(|_| record(OptimizeMethod::Weighted, 60.0)));

        let mut rng = SmallRng::seed_from_u64(7);
        let model = WeightTrainer::new()
            .train(&WeightModel::default(), &history, &mut rng)
            .unwrap();

        // 最优组 Genetic 均值 80 → accuracy 0.8
        assert!((model.accuracy - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_capped_at_099() {
        let history: Vec<HistoryRecord> = (0..10)
            .map(|_| record(OptimizeMethod::Hybrid, 100.0))
            .collect();
        let mut rng = SmallRng::seed_from_u64(7);
        let model = WeightTrainer::new()
            .train(&WeightModel::default(), &history, &mut rng)
            .unwrap();
        assert!((model.accuracy - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let history: Vec<HistoryRecord> = (0..15)
            .map(|i| record(OptimizeMethod::Hybrid, 75.0 + (i % 4) as f64))
            .collect();
        let current = WeightModel::default();

        let mut rng1 = SmallRng::seed_from_u64(99);
        let mut rng2 = SmallRng::seed_from_u64(99);
        let trainer = WeightTrainer::new();
        let m1 = trainer.train(&current, &history, &mut rng1).unwrap();
        let m2 = trainer.train(&current, &history, &mut rng2).unwrap();

        assert_eq!(m1.weights, m2.weights);
    }
}
