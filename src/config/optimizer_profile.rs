// ==========================================
// 仓库拣选路径优化系统 - 优化器参数配置
// ==========================================
// 用途:
// - 以可序列化配置承载遗传算法参数、时间模型与合成布局几何;
// - 调用方可整体持久化/下发,缺省值与引擎内置常量保持一致。
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 优化器整体配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OptimizerProfile {
    /// 遗传算法参数
    #[serde(default)]
    pub genetic: GeneticProfile,

    /// 时间模型参数
    #[serde(default)]
    pub time: TimeProfile,

    /// 合成布局几何参数
    #[serde(default)]
    pub layout: LayoutProfile,
}

// ==========================================
// GeneticProfile - 遗传算法参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticProfile {
    /// 种群规模
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// 迭代代数
    #[serde(default = "default_generations")]
    pub generations: usize,

    /// 精英保留数(逐代原样带入下一代)
    #[serde(default = "default_elite_size")]
    pub elite_size: usize,

    /// 变异概率
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// 锦标赛规模(每次抽样个体数)
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,

    /// 随机种子(None = 系统熵源;测试中固定以复现结果)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_population_size() -> usize {
    50
}
fn default_generations() -> usize {
    100
}
fn default_elite_size() -> usize {
    10
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_tournament_size() -> usize {
    3
}

impl Default for GeneticProfile {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            elite_size: default_elite_size(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            seed: None,
        }
    }
}

// ==========================================
// TimeProfile - 时间模型参数
// ==========================================
// estimated_time = 距离 * travel_minutes_per_meter + 件数 * handling_minutes_per_pick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeProfile {
    /// 行走耗时(分钟/米)
    #[serde(default = "default_travel_minutes")]
    pub travel_minutes_per_meter: f64,

    /// 单件拣货处理耗时(分钟)
    #[serde(default = "default_handling_minutes")]
    pub handling_minutes_per_pick: f64,
}

fn default_travel_minutes() -> f64 {
    0.5
}
fn default_handling_minutes() -> f64 {
    2.0
}

impl Default for TimeProfile {
    fn default() -> Self {
        Self {
            travel_minutes_per_meter: default_travel_minutes(),
            handling_minutes_per_pick: default_handling_minutes(),
        }
    }
}

// ==========================================
// LayoutProfile - 合成布局几何参数
// ==========================================
// 无显式坐标时按库区分组生成网格布局(见 engine::layout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// 相邻库位间距(单位长度)
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,

    /// 每行库位数
    #[serde(default = "default_row_capacity")]
    pub row_capacity: usize,

    /// 库区基准偏移(未知库区取 (0,0))
    #[serde(default = "default_zone_offsets")]
    pub zone_offsets: HashMap<String, (f64, f64)>,
}

fn default_cell_size() -> f64 {
    5.0
}
fn default_row_capacity() -> usize {
    10
}

fn default_zone_offsets() -> HashMap<String, (f64, f64)> {
    let mut offsets = HashMap::new();
    offsets.insert("PF-Zone".to_string(), (0.0, 0.0));
    offsets.insert("Premium Zone".to_string(), (60.0, 0.0));
    offsets.insert("A-Zone".to_string(), (0.0, 60.0));
    offsets.insert("B-Zone".to_string(), (60.0, 60.0));
    offsets.insert("C-Zone".to_string(), (120.0, 0.0));
    offsets
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            row_capacity: default_row_capacity(),
            zone_offsets: default_zone_offsets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_engine_constants() {
        let profile = OptimizerProfile::default();
        assert_eq!(profile.genetic.population_size, 50);
        assert_eq!(profile.genetic.generations, 100);
        assert_eq!(profile.genetic.elite_size, 10);
        assert!((profile.genetic.mutation_rate - 0.1).abs() < 1e-12);
        assert_eq!(profile.genetic.tournament_size, 3);
        assert!(profile.genetic.seed.is_none());
        assert!((profile.time.travel_minutes_per_meter - 0.5).abs() < 1e-12);
        assert!((profile.time.handling_minutes_per_pick - 2.0).abs() < 1e-12);
        assert!((profile.layout.cell_size - 5.0).abs() < 1e-12);
        assert_eq!(profile.layout.row_capacity, 10);
    }

    #[test]
    fn test_profile_deserialize_with_partial_fields() {
        // 部分字段缺省时回落默认值
        let profile: OptimizerProfile =
            serde_json::from_str(r#"{"genetic":{"seed":42}}"#).unwrap();
        assert_eq!(profile.genetic.seed, Some(42));
        assert_eq!(profile.genetic.population_size, 50);
        assert_eq!(profile.layout.row_capacity, 10);
    }
}
