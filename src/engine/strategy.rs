// ==========================================
// 仓库拣选路径优化系统 - 策略选项定义
// ==========================================
// 用途:
// - 单次优化调用的策略开关(FEFO/重量/拣货员经验);
// - 可序列化,便于调用方整体下发与复现同一次优化。
// ==========================================

use serde::{Deserialize, Serialize};

/// 单次优化调用的策略选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// 是否考虑效期(FEFO 预排序/效期得分)
    #[serde(default = "default_true")]
    pub consider_fefo: bool,

    /// 是否考虑重量(重货惩罚远距离绕行)
    #[serde(default = "default_true")]
    pub consider_weight: bool,

    /// 是否考虑拣货员历史经验
    #[serde(default)]
    pub consider_picker_experience: bool,

    /// 拣货员 ID(经验查询键,未指定时经验项不生效)
    #[serde(default)]
    pub picker_id: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            consider_fefo: true,
            consider_weight: true,
            consider_picker_experience: false,
            picker_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = OptimizeOptions::default();
        assert!(options.consider_fefo);
        assert!(options.consider_weight);
        assert!(!options.consider_picker_experience);
        assert!(options.picker_id.is_none());
    }

    #[test]
    fn test_options_deserialize_empty_object() {
        let options: OptimizeOptions = serde_json::from_str("{}").unwrap();
        assert!(options.consider_fefo);
        assert!(options.consider_weight);
        assert!(!options.consider_picker_experience);
    }
}
