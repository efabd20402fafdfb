// ==========================================
// 仓库拣选路径优化系统 - 距离与适应度模型
// ==========================================
// 红线: 全部策略共用同一距离口径,不得各自另算
// 适应度越低越好(最小化约定)
// ==========================================

use crate::domain::pick::{EnrichedPickItem, PathStep, Position};

/// 每次 FEFO 违规的固定罚分
pub const FEFO_VIOLATION_PENALTY: f64 = 100.0;

/// 两点间三维欧氏距离
pub fn distance(a: Position, b: Position) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// 路径总距离(从原点出发,逐步累加)
pub fn path_distance(items: &[EnrichedPickItem]) -> f64 {
    let mut total = 0.0;
    let mut current = Position::origin();
    for item in items {
        total += distance(current, item.position);
        current = item.position;
    }
    total
}

/// FEFO 违规罚分
///
/// 沿路径顺序扫描,每当某步效期严格早于前一步效期记一次违规。
/// 无效期按"最晚"处理(NaiveDate::MAX),即有效期货物排在无效期货物之后不违规。
pub fn fefo_penalty(items: &[EnrichedPickItem]) -> f64 {
    let mut violations = 0u32;
    for pair in items.windows(2) {
        if pair[1].expiry_key() < pair[0].expiry_key() {
            violations += 1;
        }
    }
    violations as f64 * FEFO_VIOLATION_PENALTY
}

/// 路径适应度 = 总距离 + FEFO 罚分(越低越好)
pub fn fitness(items: &[EnrichedPickItem]) -> f64 {
    path_distance(items) + fefo_penalty(items)
}

/// 将有序拣选项标注为路径步(记录每步实际距离)
pub fn annotate(items: Vec<EnrichedPickItem>) -> Vec<PathStep> {
    let mut steps = Vec::with_capacity(items.len());
    let mut current = Position::origin();
    for item in items {
        let d = distance(current, item.position);
        current = item.position;
        steps.push(PathStep {
            item,
            distance_from_previous: d,
        });
    }
    steps
}
