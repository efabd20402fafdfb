// ==========================================
// 仓库拣选路径优化系统 - 布局引擎
// ==========================================
// 职责: 为库位解析三维坐标
// - 库位主数据带全量显式坐标时原样使用
// - 否则按库区分组生成确定性网格布局(行宽固定,同一输入顺序产出同一坐标)
// 红线: 缺失库位不报错,回退原点坐标并告警
// ==========================================

use crate::config::optimizer_profile::LayoutProfile;
use crate::domain::pick::Position;
use crate::domain::stock::LocationRecord;
use crate::engine::stores::LocationStore;
use crate::repository::error::RepositoryResult;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// LayoutEngine - 布局引擎
// ==========================================
pub struct LayoutEngine {
    profile: LayoutProfile,
}

impl LayoutEngine {
    /// 构造函数
    pub fn new(profile: LayoutProfile) -> Self {
        Self { profile }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 解析一组库位的坐标
    ///
    /// # 参数
    /// - `location_ids`: 待解析的库位编码
    /// - `store`: 库位主数据存储
    ///
    /// # 返回
    /// location_id → Position 映射;无法解析的库位映射为原点 (0,0,0)
    pub fn positions_for(
        &self,
        location_ids: &[String],
        store: &dyn LocationStore,
    ) -> RepositoryResult<HashMap<String, Position>> {
        let locations = store.all_locations()?;
        let layout = self.resolve_layout(&locations);

        let mut result = HashMap::with_capacity(location_ids.len());
        for id in location_ids {
            match layout.get(id) {
                Some(pos) => {
                    result.insert(id.clone(), *pos);
                }
                None => {
                    warn!("库位坐标不可解析, 回退原点: location_id={}", id);
                    result.insert(id.clone(), Position::origin());
                }
            }
        }
        Ok(result)
    }

    /// 解析全量库位布局
    ///
    /// 全部库位带显式坐标 → 原样使用;否则整体合成网格布局
    fn resolve_layout(&self, locations: &[LocationRecord]) -> HashMap<String, Position> {
        let all_explicit =
            !locations.is_empty() && locations.iter().all(|loc| loc.position.is_some());

        if all_explicit {
            return locations
                .iter()
                .map(|loc| (loc.location_id.clone(), loc.position.unwrap()))
                .collect();
        }

        self.synthetic_layout(locations)
    }

    /// 合成网格布局
    ///
    /// 按库区分组(保持列出顺序),区内每行 row_capacity 个库位,
    /// 间距 cell_size,库区基准偏移来自配置表(未知库区 (0,0))。
    fn synthetic_layout(&self, locations: &[LocationRecord]) -> HashMap<String, Position> {
        let mut zone_counters: HashMap<&str, usize> = HashMap::new();
        let mut layout = HashMap::with_capacity(locations.len());

        for loc in locations {
            let index = zone_counters.entry(loc.zone.as_str()).or_insert(0);
            let (base_x, base_y) = self
                .profile
                .zone_offsets
                .get(&loc.zone)
                .copied()
                .unwrap_or((0.0, 0.0));

            let col = *index % self.profile.row_capacity;
            let row = *index / self.profile.row_capacity;
            let position = Position::new(
                base_x + col as f64 * self.profile.cell_size,
                base_y + row as f64 * self.profile.cell_size,
                0.0,
            );

            layout.insert(loc.location_id.clone(), position);
            *index += 1;
        }

        layout
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutProfile::default())
    }
}
