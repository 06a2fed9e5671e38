// ==========================================
// 库存调拨平衡系统 - 调拨记录领域模型
// ==========================================
// 一条记录 = 一段已完成的调拨，创建后不可变
// 同一缺货可由多个富余来源分段满足
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// AllocationRecord - 调拨记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub from_warehouse: String, // 调出仓库
    pub to_warehouse: String,   // 调入仓库
    pub part_id: String,        // 零件标签
    pub quantity: f64,          // 调拨数量 (> 0)
}

impl AllocationRecord {
    pub fn new(
        from_warehouse: impl Into<String>,
        to_warehouse: impl Into<String>,
        part_id: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            from_warehouse: from_warehouse.into(),
            to_warehouse: to_warehouse.into(),
            part_id: part_id.into(),
            quantity,
        }
    }

    /// 调拨描述
    ///
    /// 格式: `<part> || <from> --> <part> || <to> x <quantity>`
    pub fn transfer_description(&self) -> String {
        format!(
            "{} || {} --> {} || {} x {}",
            self.part_id,
            self.from_warehouse,
            self.part_id,
            self.to_warehouse,
            format_quantity(self.quantity)
        )
    }
}

/// 数量展示格式
///
/// 整数值不带小数部分 (80)，其余使用最短浮点表示 (12.5)
pub fn format_quantity(quantity: f64) -> String {
    if quantity.is_finite() && quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{:.0}", quantity)
    } else {
        format!("{}", quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_description() {
        let record = AllocationRecord::new("W3", "W1", "W1", 80.0);
        assert_eq!(record.transfer_description(), "W1 || W3 --> W1 || W1 x 80");

        let record = AllocationRecord::new("W2", "W1", "P-7", 12.5);
        assert_eq!(record.transfer_description(), "P-7 || W2 --> P-7 || W1 x 12.5");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(30.0), "30");
        assert_eq!(format_quantity(0.25), "0.25");
    }
}
