// ==========================================
// 仓库拣选路径优化系统 - 拣选清单富化引擎
// ==========================================
// 职责: 将 SKU+数量 请求解析到最优可拣库位,附加坐标/库区/效期/重量/优先级分
// 选位规则: FEFO 优先(效期最早),同效期取可用数量最大的库位
// 红线: 无可拣库存的请求项降级为部分履约信号(记录并丢弃),不报错
// ==========================================

use crate::domain::pick::{EnrichedPickItem, PickRequestItem, Position};
use crate::domain::weight_model::WeightModel;
use crate::engine::layout::LayoutEngine;
use crate::engine::stores::{LocationStore, StockLookup};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use tracing::warn;

/// 富化结果
///
/// `items` 可能短于请求清单 —— `unfulfilled_skus` 记录被丢弃的请求项
#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    pub items: Vec<EnrichedPickItem>,
    pub unfulfilled_skus: Vec<String>,
}

// ==========================================
// PickListEnricher - 拣选清单富化引擎
// ==========================================
pub struct PickListEnricher {
    // 无状态引擎,不需要注入依赖
}

impl PickListEnricher {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 富化拣选清单
    ///
    /// # 参数
    /// - `pick_list`: 请求清单(SKU + 数量)
    /// - `stock`: 可拣库存查询
    /// - `layout`: 布局引擎(坐标解析)
    /// - `locations`: 库位主数据
    /// - `model`: 激活权重模型(库区优先级)
    /// - `today`: 业务日期(效期天数计算基准)
    ///
    /// # 返回
    /// 富化项 + 未履约 SKU 列表
    pub fn enrich(
        &self,
        pick_list: &[PickRequestItem],
        stock: &dyn StockLookup,
        layout: &LayoutEngine,
        locations: &dyn LocationStore,
        model: &WeightModel,
        today: NaiveDate,
    ) -> RepositoryResult<EnrichOutcome> {
        // 1. 逐项选位: 仓储层已按 FEFO 排序,取首个候选
        let mut chosen = Vec::with_capacity(pick_list.len());
        let mut unfulfilled_skus = Vec::new();

        for request in pick_list {
            let candidates = stock.find_eligible(&request.sku, request.quantity)?;
            match candidates.into_iter().next() {
                Some(candidate) => chosen.push((request, candidate)),
                None => {
                    warn!(
                        "无可拣库存, 请求项降级为部分履约: sku={}, quantity={}",
                        request.sku, request.quantity
                    );
                    unfulfilled_skus.push(request.sku.clone());
                }
            }
        }

        // 2. 批量解析坐标(库存行自带显式坐标时优先)
        let location_ids: Vec<String> = chosen
            .iter()
            .map(|(_, candidate)| candidate.location_id.clone())
            .collect();
        let positions = layout.positions_for(&location_ids, locations)?;

        // 3. 组装富化项
        let mut items = Vec::with_capacity(chosen.len());
        for (request, candidate) in chosen {
            let position = candidate
                .position
                .or_else(|| positions.get(&candidate.location_id).copied())
                .unwrap_or_else(Position::origin);

            let priority_score = compute_priority_score(
                candidate.expiration_date,
                model.zone_rank(&candidate.zone),
                today,
            );

            items.push(EnrichedPickItem {
                sku: request.sku.clone(),
                quantity: request.quantity,
                location_id: candidate.location_id,
                zone: candidate.zone,
                product_name: candidate.product_name,
                available_quantity: candidate.available_quantity,
                expiration_date: candidate.expiration_date,
                unit_weight: candidate.unit_weight,
                position,
                priority_score,
            });
        }

        Ok(EnrichOutcome {
            items,
            unfulfilled_skus,
        })
    }
}

impl Default for PickListEnricher {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 优先级评分
// ==========================================

/// 计算拣选项优先级分(信息性,供策略参考,不直接决定顺序)
///
/// 基准 100 分:
/// - 距效期 < 7 天: +50;否则 < 30 天: +20
/// - 库区加成: (6 - zone_rank) * 10,未知库区 rank=5
pub(crate) fn compute_priority_score(
    expiration: Option<NaiveDate>,
    zone_rank: i32,
    today: NaiveDate,
) -> f64 {
    let mut score = 100.0;

    if let Some(expiry) = expiration {
        let days_to_expiry = (expiry - today).num_days();
        if days_to_expiry < 7 {
            score += 50.0;
        } else if days_to_expiry < 30 {
            score += 20.0;
        }
    }

    score += (6 - zone_rank) as f64 * 10.0;
    score
}
