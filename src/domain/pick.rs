// ==========================================
// 仓库拣选路径优化系统 - 拣选领域模型
// ==========================================
// 职责: 定义拣选请求、坐标、富化拣选项与路径步
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PickRequestItem - 拣选请求项
// ==========================================
// 用途: 调用方传入,生命周期仅限一次优化调用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickRequestItem {
    pub sku: String,   // 商品编码
    pub quantity: f64, // 请求数量(必须为正)
}

impl PickRequestItem {
    pub fn new(sku: impl Into<String>, quantity: f64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

// ==========================================
// Position - 库位三维坐标
// ==========================================
// 红线: 一经分配给库位即不可变
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 原点 (0,0,0) —— 出入口/月台,所有路径的起点
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::origin()
    }
}

// ==========================================
// EnrichedPickItem - 富化拣选项
// ==========================================
// 用途: Enricher 输出,策略输入,生成后只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPickItem {
    pub sku: String,                          // 商品编码
    pub quantity: f64,                        // 请求数量
    pub location_id: String,                  // 拣选源库位
    pub zone: String,                         // 库区
    pub product_name: Option<String>,         // 商品名称
    pub available_quantity: f64,              // 库位可用数量
    pub expiration_date: Option<NaiveDate>,   // 效期(None = 无效期管理)
    pub unit_weight: f64,                     // 单位重量(kg)
    pub position: Position,                   // 库位坐标
    pub priority_score: f64,                  // 优先级分(信息性,不决定顺序)
}

impl EnrichedPickItem {
    /// 效期排序键: 无效期按"最晚"处理(FEFO 下排在所有有效期之后)
    pub fn expiry_key(&self) -> NaiveDate {
        self.expiration_date.unwrap_or(NaiveDate::MAX)
    }
}

// ==========================================
// PathStep - 路径步
// ==========================================
// 路径 = Vec<PathStep>,不变量: 恒为输入富化项的一个排列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStep {
    pub item: EnrichedPickItem,
    pub distance_from_previous: f64, // 与上一步(首步为原点)的实际距离
}
