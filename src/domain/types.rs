// ==========================================
// 库存调拨平衡系统 - 领域类型定义
// ==========================================
// 计算模式 / 缺货状态 / 库位类型常量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 唯一可作为调出方的库位类型
pub const MAIN_LOCATION_TYPE: &str = "MAIN";

// ==========================================
// 计算模式 (Calculation Mode)
// ==========================================
// IndependentDefault / IndependentOriginal: 逐行独立分配
//   两者仅在“行内工作变量是否回写”上不同，必须同时保留
// Rolling: 按仓库汇总缺货后的滚动分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    IndependentDefault,
    IndependentOriginal,
    Rolling,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::IndependentDefault => "independent-default",
            CalculationMode::IndependentOriginal => "independent-original",
            CalculationMode::Rolling => "rolling",
        }
    }

    pub fn all() -> [CalculationMode; 3] {
        [
            CalculationMode::IndependentDefault,
            CalculationMode::IndependentOriginal,
            CalculationMode::Rolling,
        ]
    }
}

impl Default for CalculationMode {
    fn default() -> Self {
        CalculationMode::IndependentDefault
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "independent-default" | "independent_default" | "default" => {
                Ok(CalculationMode::IndependentDefault)
            }
            "independent-original" | "independent_original" | "original" => {
                Ok(CalculationMode::IndependentOriginal)
            }
            "rolling" => Ok(CalculationMode::Rolling),
            other => Err(format!("未知计算模式: {}", other)),
        }
    }
}

// ==========================================
// 缺货状态 (Shortage Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShortageStatus {
    Fulfilled,   // 已满足
    Unfulfilled, // 未满足
}

impl ShortageStatus {
    /// 报表 Status 列取值（已满足行留空）
    pub fn report_label(&self) -> &'static str {
        match self {
            ShortageStatus::Fulfilled => "",
            ShortageStatus::Unfulfilled => "Unfulfilled",
        }
    }
}

impl fmt::Display for ShortageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortageStatus::Fulfilled => write!(f, "FULFILLED"),
            ShortageStatus::Unfulfilled => write!(f, "UNFULFILLED"),
        }
    }
}
