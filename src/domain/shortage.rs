// ==========================================
// 库存调拨平衡系统 - 缺货记录领域模型
// ==========================================
// 一行 = 一个 (仓库, 零件) 缺货声明
// 生命周期: 单次分配内加载、按下标原位更新、运行结束后丢弃
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ShortageRecord - 缺货记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageRecord {
    // ===== 来源字段 =====
    pub warehouse_code: String,      // 需要补货的仓库
    pub part_id: Option<String>,     // 零件号 (可选，缺省时按仓库号标记调拨)
    pub quantity_needed: f64,        // 剩余需求量 (独立模式下分配后回写)

    // ===== 滚动模式派生字段 =====
    pub aggregate_quantity_needed: Option<f64>, // 同仓库所有行需求量之和
    pub rolling_shortage: Option<f64>,          // 滚动剩余缺货量

    // ===== 元信息 =====
    pub row_number: usize,           // 源数据行号 (1-based)
}

impl ShortageRecord {
    pub fn new(warehouse_code: impl Into<String>, quantity_needed: f64) -> Self {
        Self {
            warehouse_code: warehouse_code.into(),
            part_id: None,
            quantity_needed,
            aggregate_quantity_needed: None,
            rolling_shortage: None,
            row_number: 0,
        }
    }

    pub fn with_part_id(mut self, part_id: impl Into<String>) -> Self {
        self.part_id = Some(part_id.into());
        self
    }

    pub fn with_row_number(mut self, row_number: usize) -> Self {
        self.row_number = row_number;
        self
    }

    /// 调拨记录上使用的零件标签
    ///
    /// 有零件号时使用零件号，否则沿用仓库号
    pub fn transfer_part_label(&self) -> &str {
        self.part_id.as_deref().unwrap_or(&self.warehouse_code)
    }

    /// 本行当前剩余缺货量
    ///
    /// 滚动模式写入 rolling_shortage 后以其为准
    pub fn remaining_need(&self) -> f64 {
        self.rolling_shortage.unwrap_or(self.quantity_needed)
    }

    pub fn is_unfulfilled(&self) -> bool {
        self.remaining_need() > 0.0
    }
}
