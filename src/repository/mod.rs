// ==========================================
// 仓库拣选路径优化系统 - 数据仓储层
// ==========================================
// 职责: SQLite 数据访问,实现引擎层的存储契约
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

pub mod error;
pub mod location_repo;
pub mod optimization_history_repo;
pub mod picker_history_repo;
pub mod stock_repo;
pub mod weight_model_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use location_repo::LocationRepository;
pub use optimization_history_repo::OptimizationHistoryRepository;
pub use picker_history_repo::PickerPerformanceRepository;
pub use stock_repo::StockRepository;
pub use weight_model_repo::WeightModelRepository;
