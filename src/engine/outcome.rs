// ==========================================
// 库存调拨平衡系统 - 分配结果
// ==========================================
// 输出: 调拨列表 (顺序即生成顺序) + 更新后的缺货 + 未满足缺货 + 富余终态
// ==========================================

use crate::domain::{AllocationRecord, CalculationMode, ExcessRecord, ShortageRecord, ShortageStatus};
use serde::{Deserialize, Serialize};

/// 逐行分配轨迹
///
/// `working_need` 为该行迭代结束时的行内工作变量:
/// - IndependentDefault: 回写为剩余需求
/// - IndependentOriginal: 保持行开始时的需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTrace {
    pub warehouse_code: String,
    pub row_number: usize,
    pub starting_need: f64,
    pub transferred: f64,
    pub stored_remaining_need: f64,
    pub working_need: f64,
}

// ==========================================
// AllocationOutcome - 单次分配结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub mode: CalculationMode,
    pub allocations: Vec<AllocationRecord>,
    pub shortages: Vec<ShortageRecord>,
    pub unfulfilled: Vec<ShortageRecord>,
    pub excesses: Vec<ExcessRecord>,
    pub row_traces: Vec<RowTrace>,
    pub excluded_excess_count: usize,
}

/// 分配汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub shortage_rows: usize,
    pub unfulfilled_rows: usize,
    pub eligible_excess_rows: usize,
    pub excluded_excess_rows: usize,
    pub allocation_count: usize,
    pub total_allocated: f64,
    pub total_unfulfilled: f64,
    pub remaining_excess: f64,
}

impl AllocationOutcome {
    pub fn empty(mode: CalculationMode) -> Self {
        Self {
            mode,
            allocations: Vec::new(),
            shortages: Vec::new(),
            unfulfilled: Vec::new(),
            excesses: Vec::new(),
            row_traces: Vec::new(),
            excluded_excess_count: 0,
        }
    }

    /// 追加另一零件的分配结果（按零件顺序拼接）
    pub fn extend(&mut self, other: AllocationOutcome) {
        self.allocations.extend(other.allocations);
        self.shortages.extend(other.shortages);
        self.unfulfilled.extend(other.unfulfilled);
        self.excesses.extend(other.excesses);
        self.row_traces.extend(other.row_traces);
        self.excluded_excess_count += other.excluded_excess_count;
    }

    /// 缺货行最终状态
    pub fn status_of(&self, shortage: &ShortageRecord) -> ShortageStatus {
        if shortage.is_unfulfilled() {
            ShortageStatus::Unfulfilled
        } else {
            ShortageStatus::Fulfilled
        }
    }

    pub fn summary(&self) -> AllocationSummary {
        AllocationSummary {
            shortage_rows: self.shortages.len(),
            unfulfilled_rows: self.unfulfilled.len(),
            eligible_excess_rows: self.excesses.len(),
            excluded_excess_rows: self.excluded_excess_count,
            allocation_count: self.allocations.len(),
            total_allocated: self.allocations.iter().map(|a| a.quantity).sum(),
            total_unfulfilled: self.unfulfilled.iter().map(|s| s.remaining_need()).sum(),
            remaining_excess: self.excesses.iter().map(|e| e.excess_quantity).sum(),
        }
    }
}
