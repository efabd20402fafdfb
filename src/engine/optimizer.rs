// ==========================================
// 仓库拣选路径优化系统 - 路径优化调度引擎
// ==========================================
// 职责: 按方法分派三个基础策略;Hybrid 同输入跑全部三个,留适应度最低者
// 平局按固定顺序裁决: 最近邻 → 遗传 → 加权
// ==========================================

use crate::config::optimizer_profile::GeneticProfile;
use crate::domain::pick::{EnrichedPickItem, PathStep};
use crate::domain::types::OptimizeMethod;
use crate::domain::weight_model::WeightModel;
use crate::engine::distance::{annotate, fitness};
use crate::engine::genetic::GeneticOptimizer;
use crate::engine::nearest_neighbor::NearestNeighborOptimizer;
use crate::engine::stores::PickerHistory;
use crate::engine::strategy::OptimizeOptions;
use crate::engine::weighted::WeightedOptimizer;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// RouteOptimizer - 路径优化调度引擎
// ==========================================
pub struct RouteOptimizer {
    nearest_neighbor: NearestNeighborOptimizer,
    genetic: GeneticOptimizer,
    weighted: WeightedOptimizer,
}

impl RouteOptimizer {
    /// 构造函数
    pub fn new(genetic_profile: GeneticProfile) -> Self {
        Self {
            nearest_neighbor: NearestNeighborOptimizer::new(),
            genetic: GeneticOptimizer::new(genetic_profile),
            weighted: WeightedOptimizer::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按指定方法求解并标注路径
    pub fn optimize(
        &self,
        method: OptimizeMethod,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
        model: &WeightModel,
        picker_history: &dyn PickerHistory,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<PathStep>> {
        let ordered = match method {
            OptimizeMethod::NearestNeighbor => self.nearest_neighbor.order(items, options),
            OptimizeMethod::Genetic => self.genetic.order(items, options),
            OptimizeMethod::Weighted => {
                self.weighted
                    .order(items, options, model, picker_history, today)?
            }
            OptimizeMethod::Hybrid => {
                self.hybrid_order(items, options, model, picker_history, today)?
            }
        };
        Ok(annotate(ordered))
    }

    /// Hybrid: 三个策略同输入求解,保留适应度最低的路径
    fn hybrid_order(
        &self,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
        model: &WeightModel,
        picker_history: &dyn PickerHistory,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<EnrichedPickItem>> {
        let nn = self.nearest_neighbor.order(items.clone(), options);
        let ga = self.genetic.order(items.clone(), options);
        let weighted = self
            .weighted
            .order(items, options, model, picker_history, today)?;

        // 固定裁决顺序: 最近邻 → 遗传 → 加权;严格更优才替换
        let mut best = nn;
        let mut best_fitness = fitness(&best);
        debug!("hybrid 候选适应度: nearest_neighbor={:.3}", best_fitness);

        for (name, candidate) in [("genetic", ga), ("weighted", weighted)] {
            let candidate_fitness = fitness(&candidate);
            debug!("hybrid 候选适应度: {}={:.3}", name, candidate_fitness);
            if candidate_fitness < best_fitness {
                best = candidate;
                best_fitness = candidate_fitness;
            }
        }

        Ok(best)
    }
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new(GeneticProfile::default())
    }
}
