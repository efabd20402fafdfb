// ==========================================
// 仓库拣选路径优化系统 - 最近邻贪心策略
// ==========================================
// 从原点(月台)出发,每步选取比较距离最小的未访问库位
// consider_weight 时按货物重量放大"比较距离",但记录的仍是实际距离
// 红线: 确定性算法 —— 同输入同选项必得同路径(平局取先遇到者)
// ==========================================

use crate::domain::pick::{EnrichedPickItem, PathStep, Position};
use crate::engine::distance::{annotate, distance};
use crate::engine::strategy::OptimizeOptions;

// ==========================================
// NearestNeighborOptimizer - 最近邻贪心策略
// ==========================================
pub struct NearestNeighborOptimizer {
    // 无状态引擎,不需要注入依赖
}

impl NearestNeighborOptimizer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解拣选顺序(不含步距标注)
    ///
    /// 步骤:
    /// 1. consider_fefo 时按效期升序稳定预排序(无效期排最后,平局保持原相对顺序)
    /// 2. 逐步贪心: 取比较距离最小的剩余项,移动并移除,直至取完
    pub fn order(
        &self,
        mut items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
    ) -> Vec<EnrichedPickItem> {
        if options.consider_fefo {
            // Vec::sort_by_key 为稳定排序
            items.sort_by_key(|item| item.expiry_key());
        }

        let mut remaining = items;
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut current = Position::origin();

        while !remaining.is_empty() {
            let mut best_index = 0;
            let mut best_scaled = f64::INFINITY;

            for (index, item) in remaining.iter().enumerate() {
                let actual = distance(current, item.position);
                let scaled = if options.consider_weight {
                    actual * weight_scale(item.unit_weight)
                } else {
                    actual
                };
                // 严格小于: 平局保持先遇到者
                if scaled < best_scaled {
                    best_scaled = scaled;
                    best_index = index;
                }
            }

            let chosen = remaining.remove(best_index);
            current = chosen.position;
            ordered.push(chosen);
        }

        ordered
    }

    /// 求解并标注路径
    pub fn optimize(
        &self,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
    ) -> Vec<PathStep> {
        annotate(self.order(items, options))
    }
}

impl Default for NearestNeighborOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 重量缩放系数: 1 + min(2.0, 重量/10) * 0.1
///
/// 仅用于候选比较,不进入记录的实际距离
fn weight_scale(unit_weight: f64) -> f64 {
    1.0 + (unit_weight / 10.0).min(2.0) * 0.1
}
