// ==========================================
// 仓库拣选路径优化系统 - 引擎层
// ==========================================
// 职责: 实现路径优化业务规则,不拼 SQL
// 红线: 引擎只依赖 stores 抽象契约,策略共用同一距离/适应度口径
// ==========================================

pub mod distance;
pub mod enricher;
pub mod genetic;
pub mod layout;
pub mod metrics;
pub mod nearest_neighbor;
pub mod optimizer;
pub mod stores;
pub mod strategy;
pub mod trainer;
pub mod weighted;

// 重导出核心引擎
pub use enricher::{EnrichOutcome, PickListEnricher};
pub use genetic::GeneticOptimizer;
pub use layout::LayoutEngine;
pub use metrics::MetricsCalculator;
pub use nearest_neighbor::NearestNeighborOptimizer;
pub use optimizer::RouteOptimizer;
pub use stores::{HistoryStore, LocationStore, ModelStore, PickerHistory, StockLookup};
pub use strategy::OptimizeOptions;
pub use trainer::{TrainError, TrainOutcome, WeightTrainer};
pub use weighted::WeightedOptimizer;
