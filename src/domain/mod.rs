// ==========================================
// 仓库拣选路径优化系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod pick;
pub mod result;
pub mod stock;
pub mod types;
pub mod weight_model;

// 重导出核心类型
pub use pick::{EnrichedPickItem, PathStep, PickRequestItem, Position};
pub use result::{HistoryRecord, OptimizationResult};
pub use stock::{LocationRecord, StockCandidate};
pub use types::{OptimizeMethod, StorageStatus};
pub use weight_model::{ModelWeights, WeightModel, DEFAULT_ZONE_RANK};
