// ==========================================
// 仓库拣选路径优化系统 - 加权启发式策略
// ==========================================
// 逐步贪心,但候选得分为多因子加权(越高越好,与适应度符号约定相反):
//   score = -距离*W.distance + 效期分*W.fefo + 库区分*W.zone_efficiency
//           + 经验分*W.picker_experience
// 权重取自当前激活的权重模型
// ==========================================

use crate::domain::pick::{EnrichedPickItem, PathStep, Position};
use crate::domain::weight_model::WeightModel;
use crate::engine::distance::{annotate, distance};
use crate::engine::stores::PickerHistory;
use crate::engine::strategy::OptimizeOptions;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::HashMap;

/// 拣货员经验查询窗口(天)
pub const EXPERIENCE_WINDOW_DAYS: i64 = 30;

/// 无历史记录时的默认经验分
pub const DEFAULT_EXPERIENCE_SCORE: f64 = 50.0;

// ==========================================
// WeightedOptimizer - 加权启发式策略
// ==========================================
pub struct WeightedOptimizer {
    // 无状态引擎,不需要注入依赖
}

impl WeightedOptimizer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解拣选顺序(不含步距标注)
    ///
    /// # 参数
    /// - `items`: 富化拣选项
    /// - `options`: 策略选项
    /// - `model`: 激活权重模型
    /// - `picker_history`: 拣货员历史表现(仅 consider_picker_experience 时查询)
    /// - `today`: 业务日期
    pub fn order(
        &self,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
        model: &WeightModel,
        picker_history: &dyn PickerHistory,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<EnrichedPickItem>> {
        // 经验分缓存: 同一次调用内每个库位只查一次
        let experience = self.load_experience(&items, options, picker_history)?;

        let mut remaining = items;
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut current = Position::origin();

        while !remaining.is_empty() {
            let mut best_index = 0;
            let mut best_score = f64::NEG_INFINITY;

            for (index, item) in remaining.iter().enumerate() {
                let score = self.candidate_score(item, current, options, model, &experience, today);
                // 严格大于: 平局保持先遇到者
                if score > best_score {
                    best_score = score;
                    best_index = index;
                }
            }

            let chosen = remaining.remove(best_index);
            current = chosen.position;
            ordered.push(chosen);
        }

        Ok(ordered)
    }

    /// 求解并标注路径
    pub fn optimize(
        &self,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
        model: &WeightModel,
        picker_history: &dyn PickerHistory,
        today: NaiveDate,
    ) -> RepositoryResult<Vec<PathStep>> {
        Ok(annotate(self.order(
            items,
            options,
            model,
            picker_history,
            today,
        )?))
    }

    // ==========================================
    // 评分
    // ==========================================

    fn candidate_score(
        &self,
        item: &EnrichedPickItem,
        current: Position,
        options: &OptimizeOptions,
        model: &WeightModel,
        experience: &HashMap<String, f64>,
        today: NaiveDate,
    ) -> f64 {
        let weights = &model.weights;
        let d = distance(current, item.position);

        let fefo_score = if options.consider_fefo {
            fefo_score(item.expiration_date, today)
        } else {
            0.0
        };

        let zone_score = (6 - model.zone_rank(&item.zone)) as f64 * 20.0;

        let experience_score = if options.consider_picker_experience {
            experience
                .get(&item.location_id)
                .copied()
                .unwrap_or(DEFAULT_EXPERIENCE_SCORE)
        } else {
            0.0
        };

        -d * weights.distance
            + fefo_score * weights.fefo
            + zone_score * weights.zone_efficiency
            + experience_score * weights.picker_experience
    }

    /// 预加载经验分(consider_picker_experience 且指定 picker_id 时)
    fn load_experience(
        &self,
        items: &[EnrichedPickItem],
        options: &OptimizeOptions,
        picker_history: &dyn PickerHistory,
    ) -> RepositoryResult<HashMap<String, f64>> {
        let mut experience = HashMap::new();

        if !options.consider_picker_experience {
            return Ok(experience);
        }
        let picker_id = match options.picker_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Ok(experience),
        };

        for item in items {
            if experience.contains_key(&item.location_id) {
                continue;
            }
            let score = picker_history
                .experience_score(picker_id, &item.location_id, EXPERIENCE_WINDOW_DAYS)?
                .unwrap_or(DEFAULT_EXPERIENCE_SCORE);
            experience.insert(item.location_id.clone(), score);
        }

        Ok(experience)
    }
}

impl Default for WeightedOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// 效期得分: max(0, 100 - 距效期天数);无效期记 0
///
/// 已过期(天数为负)得分超过 100,进一步放大急迫性
fn fefo_score(expiration: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match expiration {
        Some(expiry) => {
            let days_to_expiry = (expiry - today).num_days() as f64;
            (100.0 - days_to_expiry).max(0.0)
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fefo_score_gradient() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let d = |offset: i64| Some(today + chrono::Duration::days(offset));

        // 越临期分越高
        assert!(fefo_score(d(3), today) > fefo_score(d(30), today));
        // 距效期 100 天以上归零
        assert_eq!(fefo_score(d(150), today), 0.0);
        // 已过期继续升高
        assert!(fefo_score(d(-5), today) > fefo_score(d(0), today));
        // 无效期归零
        assert_eq!(fefo_score(None, today), 0.0);
    }
}
