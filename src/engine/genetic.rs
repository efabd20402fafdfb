// ==========================================
// 仓库拣选路径优化系统 - 遗传算法策略
// ==========================================
// 个体编码: 拣选项下标排列
// 逐代流程: 按适应度升序排名 → 精英保留 → 锦标赛选择 → 顺序交叉 → 交换变异
// 红线: 随机源可注入种子 —— 固定种子必得可复现路径
// ==========================================

use crate::config::optimizer_profile::GeneticProfile;
use crate::domain::pick::{EnrichedPickItem, PathStep, Position};
use crate::engine::distance::{annotate, distance, FEFO_VIOLATION_PENALTY};
use crate::engine::strategy::OptimizeOptions;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ==========================================
// GeneticOptimizer - 遗传算法策略
// ==========================================
pub struct GeneticOptimizer {
    profile: GeneticProfile,
}

impl GeneticOptimizer {
    /// 构造函数
    pub fn new(profile: GeneticProfile) -> Self {
        Self { profile }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求解拣选顺序(不含步距标注)
    ///
    /// 随机源: 配置了 seed 用 seed,否则取系统熵源
    pub fn order(
        &self,
        items: Vec<EnrichedPickItem>,
        options: &OptimizeOptions,
    ) -> Vec<EnrichedPickItem> {
        let mut rng = match self.profile.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.order_with_rng(items, options, &mut rng)
    }

    /// 使用外部随机源求解(测试注入固定种子)
    pub fn order_with_rng<R: Rng>(
        &self,
        items: Vec<EnrichedPickItem>,
        _options: &OptimizeOptions,
        rng: &mut R,
    ) -> Vec<EnrichedPickItem> {
        // 单项/空清单无需演化
        if items.len() <= 1 {
            return items;
        }

        let n = items.len();
        let base: Vec<usize> = (0..n).collect();

        // 初始种群: 输入排列的随机洗牌
        let mut population: Vec<Vec<usize>> = (0..self.profile.population_size)
            .map(|_| {
                let mut perm = base.clone();
                perm.shuffle(rng);
                perm
            })
            .collect();

        for _generation in 0..self.profile.generations {
            // 适应度升序排名(越低越好)
            let mut scored: Vec<(f64, Vec<usize>)> = population
                .into_iter()
                .map(|perm| (perm_fitness(&items, &perm), perm))
                .collect();
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));

            // 精英原样保留
            let mut next: Vec<Vec<usize>> = scored
                .iter()
                .take(self.profile.elite_size.min(scored.len()))
                .map(|(_, perm)| perm.clone())
                .collect();

            // 锦标赛选择 + 顺序交叉 + 变异填满剩余席位
            while next.len() < self.profile.population_size {
                let parent1 = tournament(&scored, self.profile.tournament_size, rng);
                let parent2 = tournament(&scored, self.profile.tournament_size, rng);
                let mut child = order_crossover(parent1, parent2, rng);
                if rng.random_bool(self.profile.mutation_rate.clamp(0.0, 1.0)) {
                    swap_mutation(&mut child, rng);
                }
                next.push(child);
            }

            population = next;
        }

        // 终代最优个体
        let best = population
            .into_iter()
            .map(|perm| (perm_fitness(&items, &perm), perm))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, perm)| perm)
            .unwrap_or(base);

        apply_permutation(items, &best)
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

impl Default for GeneticOptimizer {
    fn default() -> Self {
        Self::new(GeneticProfile::default())
    }
}

// ==========================================
// 遗传算子
// ==========================================

/// 排列适应度: 原点锚定总距离 + FEFO 罚分(与 distance::fitness 同口径)
fn perm_fitness(items: &[EnrichedPickItem], perm: &[usize]) -> f64 {
    let mut total = 0.0;
    let mut current = Position::origin();
    for &index in perm {
        total += distance(current, items[index].position);
        current = items[index].position;
    }

    for pair in perm.windows(2) {
        if items[pair[1]].expiry_key() < items[pair[0]].expiry_key() {
            total += FEFO_VIOLATION_PENALTY;
        }
    }
    total
}

/// 锦标赛选择: 随机抽 tournament_size 个个体,保留其中最优者
fn tournament<'a, R: Rng>(
    scored: &'a [(f64, Vec<usize>)],
    tournament_size: usize,
    rng: &mut R,
) -> &'a [usize] {
    let mut best: Option<&(f64, Vec<usize>)> = None;
    for _ in 0..tournament_size.max(1) {
        let candidate = &scored[rng.random_range(0..scored.len())];
        match best {
            Some(current) if candidate.0 >= current.0 => {}
            _ => best = Some(candidate),
        }
    }
    &best.expect("锦标赛至少抽样一次").1
}

/// 顺序交叉 (Order Crossover)
///
/// 取随机切点 start <= end,父1区段原位复制到子代,
/// 余下空位按子代下标顺序用父2的基因(按父2顺序)跳过已放置者填充。
/// 不变量: 子代恒为合法排列 —— 无重复,无遗漏。
fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    let mut start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];
    for i in start..=end {
        child[i] = parent1[i];
        placed[parent1[i]] = true;
    }

    let mut fill = parent2.iter().copied().filter(|gene| !placed[*gene]);
    for slot in child.iter_mut() {
        if *slot == usize::MAX {
            *slot = fill.next().expect("父2必能补全排列空位");
        }
    }
    child
}

/// 交换变异: 交换两个随机下标
fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let len = perm.len();
    let i = rng.random_range(0..len);
    let j = rng.random_range(0..len);
    perm.swap(i, j);
}

/// 按排列重排拣选项
fn apply_permutation(items: Vec<EnrichedPickItem>, perm: &[usize]) -> Vec<EnrichedPickItem> {
    let mut slots: Vec<Option<EnrichedPickItem>> = items.into_iter().map(Some).collect();
    perm.iter()
        .map(|&index| slots[index].take().expect("排列下标不得重复"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn item_at(sku: &str, x: f64, y: f64) -> EnrichedPickItem {
        EnrichedPickItem {
            sku: sku.to_string(),
            quantity: 1.0,
            location_id: format!("LOC-{}", sku),
            zone: "A-Zone".to_string(),
            product_name: None,
            available_quantity: 10.0,
            expiration_date: None,
            unit_weight: 1.0,
            position: Position::new(x, y, 0.0),
            priority_score: 100.0,
        }
    }

    #[test]
    fn test_order_crossover_preserves_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let parent1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let parent2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..200 {
            let child = order_crossover(&parent1, &parent2, &mut rng);
            let mut sorted = child.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, parent1, "子代必须是合法排列: {:?}", child);
        }
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let items: Vec<EnrichedPickItem> = (0..8)
            .map(|i| item_at(&format!("S{}", i), (i * 3) as f64, ((i * 7) % 5) as f64))
            .collect();
        let profile = GeneticProfile {
            seed: Some(42),
            generations: 30,
            ..GeneticProfile::default()
        };
        let optimizer = GeneticOptimizer::new(profile);
        let options = OptimizeOptions::default();

        let first = optimizer.order(items.clone(), &options);
        let second = optimizer.order(items, &options);
        let skus = |path: &[EnrichedPickItem]| {
            path.iter().map(|i| i.sku.clone()).collect::<Vec<_>>()
        };
        assert_eq!(skus(&first), skus(&second));
    }

    #[test]
    fn test_output_is_permutation_of_input() {
        let items: Vec<EnrichedPickItem> = (0..6)
            .map(|i| item_at(&format!("S{}", i), (i % 3) as f64 * 4.0, (i / 3) as f64 * 4.0))
            .collect();
        let profile = GeneticProfile {
            seed: Some(1),
            generations: 10,
            ..GeneticProfile::default()
        };
        let ordered = GeneticOptimizer::new(profile).order(items, &OptimizeOptions::default());

        let mut location_ids: Vec<String> =
            ordered.iter().map(|i| i.location_id.clone()).collect();
        location_ids.sort();
        let expected: Vec<String> = {
            let mut ids: Vec<String> = (0..6).map(|i| format!("LOC-S{}", i)).collect();
            ids.sort();
            ids
        };
        assert_eq!(location_ids, expected);
    }

    #[test]
    fn test_single_item_short_circuits() {
        let items = vec![item_at("ONLY", 5.0, 5.0)];
        let ordered =
            GeneticOptimizer::default().order(items, &OptimizeOptions::default());
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].sku, "ONLY");
    }
}
