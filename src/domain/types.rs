// ==========================================
// 仓库拣选路径优化系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 优化方法 (Optimize Method)
// ==========================================
// 红线: 封闭枚举,不接受自由字符串分派
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeMethod {
    NearestNeighbor, // 最近邻贪心
    Genetic,         // 遗传算法
    Weighted,        // 加权启发式
    Hybrid,          // 混合(三者取最优)
}

impl OptimizeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizeMethod::NearestNeighbor => "nearest_neighbor",
            OptimizeMethod::Genetic => "genetic",
            OptimizeMethod::Weighted => "weighted",
            OptimizeMethod::Hybrid => "hybrid",
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OptimizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for OptimizeMethod {
    fn default() -> Self {
        OptimizeMethod::Hybrid
    }
}

impl std::str::FromStr for OptimizeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest_neighbor" | "nearest-neighbor" => Ok(OptimizeMethod::NearestNeighbor),
            "genetic" => Ok(OptimizeMethod::Genetic),
            "weighted" => Ok(OptimizeMethod::Weighted),
            "hybrid" => Ok(OptimizeMethod::Hybrid),
            other => Err(format!("未知优化方法: {}", other)),
        }
    }
}

// ==========================================
// 库位状态 (Storage Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageStatus {
    Empty,    // 空库位
    Occupied, // 有货(可拣选)
    Reserved, // 已预留
    Blocked,  // 盘点/质量冻结
}

impl fmt::Display for StorageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageStatus::Empty => write!(f, "EMPTY"),
            StorageStatus::Occupied => write!(f, "OCCUPIED"),
            StorageStatus::Reserved => write!(f, "RESERVED"),
            StorageStatus::Blocked => write!(f, "BLOCKED"),
        }
    }
}

impl StorageStatus {
    /// 从字符串解析库位状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "EMPTY" => StorageStatus::Empty,
            "OCCUPIED" => StorageStatus::Occupied,
            "RESERVED" => StorageStatus::Reserved,
            "BLOCKED" => StorageStatus::Blocked,
            _ => StorageStatus::Empty, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            StorageStatus::Empty => "EMPTY",
            StorageStatus::Occupied => "OCCUPIED",
            StorageStatus::Reserved => "RESERVED",
            StorageStatus::Blocked => "BLOCKED",
        }
    }
}
