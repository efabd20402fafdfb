// ==========================================
// 仓库拣选路径优化系统 - 优化 API
// ==========================================
// 职责: 对外提供三个操作 —— 路径优化、结果落库、模型训练
// 架构: API 层 → 引擎层 (Enricher/RouteOptimizer/Metrics/Trainer) → 存储契约
// 红线:
// - 空拣选清单在触达任何存储之前拒绝
// - 数量/SKU 的调用方契约违规在优化开始前报 InvalidInput
// - 训练互斥(单活动训练者),新模型发布成功后才生效
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::Local;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::optimizer_profile::OptimizerProfile;
use crate::domain::pick::PickRequestItem;
use crate::domain::result::{HistoryRecord, OptimizationResult};
use crate::domain::types::OptimizeMethod;
use crate::engine::distance::annotate;
use crate::engine::enricher::PickListEnricher;
use crate::engine::layout::LayoutEngine;
use crate::engine::metrics::MetricsCalculator;
use crate::engine::optimizer::RouteOptimizer;
use crate::engine::stores::{HistoryStore, LocationStore, ModelStore, PickerHistory, StockLookup};
use crate::engine::strategy::OptimizeOptions;
use crate::engine::trainer::{TrainOutcome, WeightTrainer, TRAINING_WINDOW_DAYS};

// ==========================================
// OptimizeApi - 优化 API
// ==========================================

/// 优化API
///
/// 职责:
/// 1. 路径优化: 富化 → 策略求解 → 指标对比
/// 2. 结果落库(训练输入)
/// 3. 权重模型训练与发布
pub struct OptimizeApi {
    /// 可拣库存查询
    stock: Arc<dyn StockLookup>,
    /// 库位主数据
    locations: Arc<dyn LocationStore>,
    /// 拣货员历史表现
    picker_history: Arc<dyn PickerHistory>,
    /// 权重模型存储
    model_store: Arc<dyn ModelStore>,
    /// 优化历史存储
    history_store: Arc<dyn HistoryStore>,

    // 引擎(无状态,随 API 构造)
    enricher: PickListEnricher,
    layout: LayoutEngine,
    optimizer: RouteOptimizer,
    metrics: MetricsCalculator,
    trainer: WeightTrainer,

    /// 训练互斥锁(红线: 训练不得与自身并发)
    train_lock: Mutex<()>,
}

impl OptimizeApi {
    /// 创建新的OptimizeApi实例
    ///
    /// # 参数
    /// - 五个存储契约实现
    /// - `profile`: 优化器参数(遗传算法/时间模型/布局几何)
    pub fn new(
        stock: Arc<dyn StockLookup>,
        locations: Arc<dyn LocationStore>,
        picker_history: Arc<dyn PickerHistory>,
        model_store: Arc<dyn ModelStore>,
        history_store: Arc<dyn HistoryStore>,
        profile: OptimizerProfile,
    ) -> Self {
        Self {
            stock,
            locations,
            picker_history,
            model_store,
            history_store,
            enricher: PickListEnricher::new(),
            layout: LayoutEngine::new(profile.layout),
            optimizer: RouteOptimizer::new(profile.genetic),
            metrics: MetricsCalculator::new(profile.time),
            trainer: WeightTrainer::new(),
            train_lock: Mutex::new(()),
        }
    }

    // ==========================================
    // 路径优化
    // ==========================================

    /// 优化拣选路径
    ///
    /// # 参数
    /// - `pick_list`: 拣选请求清单
    /// - `method`: 优化方法
    /// - `options`: 策略选项
    ///
    /// # 返回
    /// - Ok(OptimizationResult): 原始/优化路径对比与效率指标
    /// - Err(ApiError::EmptyPickList): 清单为空
    /// - Err(ApiError::InvalidInput): 数量或 SKU 非法
    pub fn optimize(
        &self,
        pick_list: &[PickRequestItem],
        method: OptimizeMethod,
        options: &OptimizeOptions,
    ) -> ApiResult<OptimizationResult> {
        // 1. 调用方契约校验(任何存储触达之前)
        if pick_list.is_empty() {
            return Err(ApiError::EmptyPickList);
        }
        for item in pick_list {
            if item.sku.trim().is_empty() {
                return Err(ApiError::InvalidInput("SKU 不能为空".to_string()));
            }
            if !item.quantity.is_finite() || item.quantity <= 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "数量必须为正数: sku={}, quantity={}",
                    item.sku, item.quantity
                )));
            }
        }

        let today = Local::now().date_naive();

        // 2. 读取激活权重模型(单次快照,整个调用内一致)
        let model = self.model_store.active()?;

        // 3. 富化: 选位 + 坐标 + 优先级分
        let outcome = self.enricher.enrich(
            pick_list,
            self.stock.as_ref(),
            &self.layout,
            self.locations.as_ref(),
            &model,
            today,
        )?;
        if outcome.items.is_empty() {
            warn!(
                "拣选清单全部无法履约: requested={}, unfulfilled={}",
                pick_list.len(),
                outcome.unfulfilled_skus.len()
            );
        }

        // 4. 原始顺序路径(输入序) + 策略求解
        let original_path = annotate(outcome.items.clone());
        let optimized_path = self.optimizer.optimize(
            method,
            outcome.items,
            options,
            &model,
            self.picker_history.as_ref(),
            today,
        )?;

        // 5. 指标对比
        let result = self.metrics.build_result(
            method,
            original_path,
            optimized_path,
            outcome.unfulfilled_skus,
        );

        info!(
            "路径优化完成: method={}, items={}, distance={:.2}, saved={:.1}%, efficiency={:.1}",
            method,
            result.optimized_path.len(),
            result.total_distance,
            result.distance_saved_pct,
            result.efficiency_score
        );
        Ok(result)
    }

    // ==========================================
    // 结果落库
    // ==========================================

    /// 保存优化结果为历史记录
    ///
    /// # 参数
    /// - `result`: 优化结果
    /// - `user_id`: 操作人
    ///
    /// # 返回
    /// - Ok(record_id): 新历史记录 ID
    pub fn save_result(&self, result: &OptimizationResult, user_id: &str) -> ApiResult<String> {
        if user_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("操作人不能为空".to_string()));
        }

        let record = HistoryRecord::from_result(result, user_id, Uuid::new_v4().to_string());
        let record_id = self.history_store.append(&record)?;

        info!(
            "优化结果已落库: record_id={}, method={}, user={}",
            record_id, result.method, user_id
        );
        Ok(record_id)
    }

    // ==========================================
    // 模型训练
    // ==========================================

    /// 训练并发布新版本权重模型
    ///
    /// # 返回
    /// - Ok(TrainOutcome): 新版本号与派生精度
    /// - Err(ApiError::InsufficientTrainingData): 近 180 天历史不足 10 条
    pub fn train_model(&self) -> ApiResult<TrainOutcome> {
        // 单活动训练者
        let _guard = self
            .train_lock
            .lock()
            .map_err(|e| ApiError::InternalError(format!("训练锁获取失败: {}", e)))?;

        let history = self.history_store.recent(TRAINING_WINDOW_DAYS)?;
        let current = self.model_store.active()?;

        let mut rng = SmallRng::from_os_rng();
        let model = self.trainer.train(&current, &history, &mut rng)?;

        // 发布成功后新版本才生效
        self.model_store.publish(&model)?;

        info!(
            "权重模型已发布: version={:.1}, accuracy={:.2}",
            model.version, model.accuracy
        );
        Ok(TrainOutcome {
            version: model.version,
            accuracy: model.accuracy,
        })
    }
}
