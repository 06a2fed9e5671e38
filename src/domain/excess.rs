// ==========================================
// 库存调拨平衡系统 - 富余库存领域模型
// ==========================================
// 一行 = 一个 (仓库, 库位类型, 零件) 富余供给
// 红线: excess_quantity 任意一次调拨后不得为负
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ExcessRecord - 富余库存记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcessRecord {
    // ===== 来源字段 =====
    pub warehouse_code: String,   // 调出仓库
    pub part_id: Option<String>,  // 零件号 (可选)
    pub location_type: String,    // 库位类型，仅 MAIN 参与分配
    pub excess_quantity: f64,     // 富余量，调拨后递减
    pub usage_rate: f64,          // 消耗速度（含下游依赖），可为 0

    // ===== 派生字段 =====
    pub priority_index: f64,      // 富余/消耗指数，每次调拨后重算

    // ===== 元信息 =====
    pub row_number: usize,        // 源数据行号 (1-based)
}

impl ExcessRecord {
    pub fn new(
        warehouse_code: impl Into<String>,
        location_type: impl Into<String>,
        excess_quantity: f64,
        usage_rate: f64,
    ) -> Self {
        Self {
            warehouse_code: warehouse_code.into(),
            part_id: None,
            location_type: location_type.into(),
            excess_quantity,
            usage_rate,
            priority_index: 0.0,
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

    /// 是否为可调出的主库位
    pub fn is_location_type(&self, main_location_type: &str) -> bool {
        self.location_type == main_location_type
    }

    pub fn has_supply(&self) -> bool {
        self.excess_quantity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_type_match_is_exact() {
        let excess = ExcessRecord::new("W2", "MAIN", 40.0, 2.0);
        assert!(excess.is_location_type("MAIN"));
        assert!(!excess.is_location_type("main"));

        let other = ExcessRecord::new("W3", "OTHER", 1000.0, 0.0);
        assert!(!other.is_location_type("MAIN"));
    }

    #[test]
    fn test_has_supply() {
        let mut excess = ExcessRecord::new("W2", "MAIN", 1.0, 0.0);
        assert!(excess.has_supply());
        excess.excess_quantity = 0.0;
        assert!(!excess.has_supply());
    }
}
