// ==========================================
// 仓库拣选路径优化系统 - 配置层
// ==========================================
// 职责: 优化器可调参数(遗传算法/时间模型/布局几何)
// ==========================================

pub mod optimizer_profile;

// 重导出核心类型
pub use optimizer_profile::{GeneticProfile, LayoutProfile, OptimizerProfile, TimeProfile};
