// ==========================================
// 仓库拣选路径优化系统 - 引擎外部依赖契约
// ==========================================
// 职责: 定义引擎消费的抽象存储契约,由仓储层实现
// 红线: 引擎只依赖这些 trait,不依赖具体仓储类型,不拼 SQL
// ==========================================

use crate::domain::result::HistoryRecord;
use crate::domain::stock::{LocationRecord, StockCandidate};
use crate::domain::weight_model::WeightModel;
use crate::repository::error::RepositoryResult;

// ==========================================
// StockLookup - 可拣选库存查询
// ==========================================
pub trait StockLookup: Send + Sync {
    /// 查询可拣选库存候选
    ///
    /// 契约:
    /// - 只返回 `status == OCCUPIED` 且 `available_quantity >= min_quantity` 的行
    /// - 排序: 效期升序(无效期最后),同效期按可用数量降序(FEFO 优先,整托优先)
    fn find_eligible(&self, sku: &str, min_quantity: f64) -> RepositoryResult<Vec<StockCandidate>>;
}

// ==========================================
// LocationStore - 库位主数据
// ==========================================
pub trait LocationStore: Send + Sync {
    /// 列出全部库位(顺序稳定 —— 合成布局依赖列出顺序)
    fn all_locations(&self) -> RepositoryResult<Vec<LocationRecord>>;
}

// ==========================================
// PickerHistory - 拣货员历史表现
// ==========================================
pub trait PickerHistory: Send + Sync {
    /// 查询拣货员在指定库位近 window_days 天的经验分
    ///
    /// # 返回
    /// - `Ok(Some(score))`: 有历史记录
    /// - `Ok(None)`: 无历史记录(调用方使用默认分 50)
    fn experience_score(
        &self,
        picker_id: &str,
        location_id: &str,
        window_days: i64,
    ) -> RepositoryResult<Option<f64>>;
}

// ==========================================
// ModelStore - 权重模型存储
// ==========================================
pub trait ModelStore: Send + Sync {
    /// 读取当前激活的权重模型(从未发布过任何版本时返回默认模型)
    fn active(&self) -> RepositoryResult<WeightModel>;

    /// 发布新版本并切换激活标记
    ///
    /// 红线: 必须原子 —— 并发读取方看到旧版本或新版本,绝不出现半更新
    fn publish(&self, model: &WeightModel) -> RepositoryResult<()>;
}

// ==========================================
// HistoryStore - 优化历史存储
// ==========================================
pub trait HistoryStore: Send + Sync {
    /// 追加一条优化历史记录,返回 record_id
    fn append(&self, record: &HistoryRecord) -> RepositoryResult<String>;

    /// 读取近 window_days 天的历史记录(训练输入)
    fn recent(&self, window_days: i64) -> RepositoryResult<Vec<HistoryRecord>>;
}
