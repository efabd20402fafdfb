// ==========================================
// 仓库拣选路径优化系统 - 库存快照模型
// ==========================================
// 用途: 外部库存/库位主数据的只读快照行
// 红线: 优化器只读,不回写库存
// ==========================================

use crate::domain::pick::Position;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StockCandidate - 可拣选库存候选
// ==========================================
// 来源: StockLookup::find_eligible 的一行结果
// 排序约定: 效期升序(NULL 最后) + 可用数量降序,由仓储层 SQL 保证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCandidate {
    pub location_id: String,                // 库位编码
    pub zone: String,                       // 库区
    pub product_name: Option<String>,       // 商品名称
    pub available_quantity: f64,            // 可用数量
    pub unit_weight: f64,                   // 单位重量(kg)
    pub expiration_date: Option<NaiveDate>, // 效期
    pub position: Option<Position>,         // 显式坐标(缺失时由布局引擎合成)
}

// ==========================================
// LocationRecord - 库位主数据行
// ==========================================
// 来源: LocationStore::all_locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub location_id: String,        // 库位编码
    pub zone: String,               // 库区
    pub position: Option<Position>, // 显式坐标(可缺失)
}
