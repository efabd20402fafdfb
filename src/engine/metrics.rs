// ==========================================
// 仓库拣选路径优化系统 - 效率指标引擎
// ==========================================
// 对比优化路径与原始顺序路径,产出距离/时间节省与效率分
// 时间模型: 行走 0.5 分钟/米 + 每件 2 分钟处理(可配置)
// ==========================================

use crate::config::optimizer_profile::TimeProfile;
use crate::domain::pick::PathStep;
use crate::domain::result::OptimizationResult;
use crate::domain::types::OptimizeMethod;

// ==========================================
// MetricsCalculator - 效率指标引擎
// ==========================================
pub struct MetricsCalculator {
    time: TimeProfile,
}

impl MetricsCalculator {
    /// 构造函数
    pub fn new(time: TimeProfile) -> Self {
        Self { time }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 组装优化结果
    ///
    /// # 参数
    /// - `method`: 调用方请求的优化方法
    /// - `original_path`: 原始顺序(输入序)路径
    /// - `optimized_path`: 优化后路径
    /// - `unfulfilled_skus`: 未履约 SKU
    pub fn build_result(
        &self,
        method: OptimizeMethod,
        original_path: Vec<PathStep>,
        optimized_path: Vec<PathStep>,
        unfulfilled_skus: Vec<String>,
    ) -> OptimizationResult {
        let total_distance = path_total(&optimized_path);
        let original_distance = path_total(&original_path);

        let estimated_time = self.estimated_minutes(total_distance, optimized_path.len());
        let original_time = self.estimated_minutes(original_distance, original_path.len());

        let distance_saved_pct = saved_pct(original_distance, total_distance);
        let time_saved_pct = saved_pct(original_time, estimated_time);

        let efficiency_score = (100.0 - total_distance / 10.0).clamp(0.0, 100.0);

        OptimizationResult {
            method,
            original_path,
            optimized_path,
            total_distance,
            original_distance,
            estimated_time,
            original_time,
            distance_saved_pct,
            time_saved_pct,
            efficiency_score,
            unfulfilled_skus,
        }
    }

    /// 预计耗时(分钟) = 距离 * 行走系数 + 件数 * 单件处理耗时
    fn estimated_minutes(&self, total_distance: f64, item_count: usize) -> f64 {
        total_distance * self.time.travel_minutes_per_meter
            + item_count as f64 * self.time.handling_minutes_per_pick
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(TimeProfile::default())
    }
}

/// 路径总距离(各步距之和)
fn path_total(path: &[PathStep]) -> f64 {
    path.iter().map(|step| step.distance_from_previous).sum()
}

/// 节省百分比: max(0, (原值-新值)/原值*100);原值为 0 时记 0
fn saved_pct(original: f64, optimized: f64) -> f64 {
    if original > 0.0 {
        ((original - optimized) / original * 100.0).max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pick::{EnrichedPickItem, Position};
    use crate::engine::distance::annotate;

    fn item_at(sku: &str, x: f64) -> EnrichedPickItem {
        EnrichedPickItem {
            sku: sku.to_string(),
            quantity: 1.0,
            location_id: format!("LOC-{}", sku),
            zone: "A-Zone".to_string(),
            product_name: None,
            available_quantity: 10.0,
            expiration_date: None,
            unit_weight: 1.0,
            position: Position::new(x, 0.0, 0.0),
            priority_score: 100.0,
        }
    }

    #[test]
    fn test_metrics_formulas() {
        // 原始: A(0) → B(10) → C(3): 0 + 10 + 7 = 17
        // 优化: A(0) → C(3) → B(10): 0 + 3 + 7 = 10
        let original = annotate(vec![item_at("A", 0.0), item_at("B", 10.0), item_at("C", 3.0)]);
        let optimized = annotate(vec![item_at("A", 0.0), item_at("C", 3.0), item_at("B", 10.0)]);

        let result = MetricsCalculator::default().build_result(
            OptimizeMethod::NearestNeighbor,
            original,
            optimized,
            vec![],
        );

        assert!((result.total_distance - 10.0).abs() < 1e-12);
        assert!((result.original_distance - 17.0).abs() < 1e-12);
        // (17-10)/17*100
        assert!((result.distance_saved_pct - 41.17647058823529).abs() < 1e-9);
        // 10*0.5 + 3*2
        assert!((result.estimated_time - 11.0).abs() < 1e-12);
        // 17*0.5 + 3*2 = 14.5 → (14.5-11)/14.5*100
        assert!((result.time_saved_pct - 24.137931034482758).abs() < 1e-9);
        // 100 - 10/10
        assert!((result.efficiency_score - 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_saved_pct_never_negative() {
        // 优化路径比原始更长时,节省百分比钳为 0
        assert_eq!(saved_pct(10.0, 15.0), 0.0);
        assert_eq!(saved_pct(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_efficiency_score_clamped() {
        let calc = MetricsCalculator::default();
        // 超长路径: 100 - 2000/10 < 0 → 钳为 0
        let far = annotate(vec![item_at("FAR", 2000.0)]);
        let result =
            calc.build_result(OptimizeMethod::NearestNeighbor, far.clone(), far, vec![]);
        assert_eq!(result.efficiency_score, 0.0);

        // 空路径: 效率分封顶 100
        let empty = calc.build_result(OptimizeMethod::NearestNeighbor, vec![], vec![], vec![]);
        assert_eq!(empty.efficiency_score, 100.0);
    }
}
