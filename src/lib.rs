// ==========================================
// 仓库拣选路径优化系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持库 —— 只读库存快照,产出拣选路径与效率指标,不回写库存
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 优化器参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{OptimizeMethod, StorageStatus};

// 领域实体
pub use domain::{
    EnrichedPickItem, HistoryRecord, LocationRecord, ModelWeights, OptimizationResult, PathStep,
    PickRequestItem, Position, StockCandidate, WeightModel,
};

// 引擎
pub use engine::{
    GeneticOptimizer, LayoutEngine, MetricsCalculator, NearestNeighborOptimizer, OptimizeOptions,
    PickListEnricher, RouteOptimizer, WeightTrainer, WeightedOptimizer,
};

// 存储契约
pub use engine::{HistoryStore, LocationStore, ModelStore, PickerHistory, StockLookup};

// API
pub use api::{ApiError, ApiResult, OptimizeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仓库拣选路径优化系统";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
