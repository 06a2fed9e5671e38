// ==========================================
// 库存调拨平衡系统 - 逐行独立分配
// ==========================================
// 输入: 已排序缺货 + 已排序 MAIN 富余（顺序在整个分配过程中固定）
// 输出: 调拨列表 + 逐行轨迹，缺货/富余按下标原位更新
// ==========================================
// 规则:
// 1) 每行缺货按富余顺序依次消耗，覆盖后立即停止扫描
// 2) 每次调拨后只刷新该富余的指数，不重新排序
//    后续缺货仍按初始顺序扫描，数量为 0 的富余逐个跳过
// 3) 未完全满足时回写剩余需求；两种子模式仅在是否同步
//    行内工作变量上不同（见 CalculationMode）
// ==========================================
// 注: 当前扫描在满足后立即 break，两种子模式的分配结果相同；
//     若放宽该条件（部分满足后继续扫描），两者将出现差异
// ==========================================

use crate::domain::{AllocationRecord, CalculationMode, ExcessRecord, ShortageRecord};
use crate::engine::outcome::RowTrace;
use crate::engine::priority::PrioritySorter;
use tracing::{debug, instrument};

/// 逐行独立分配的子模式
///
/// 仅由 IndependentDefault / IndependentOriginal 构造，Rolling 无对应子模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndependentSubMode {
    /// 未满足时同步行内工作变量
    Default,
    /// 未满足时仅回写记录，工作变量保持行开始时的值
    Original,
}

impl IndependentSubMode {
    pub fn from_mode(mode: CalculationMode) -> Option<Self> {
        match mode {
            CalculationMode::IndependentDefault => Some(IndependentSubMode::Default),
            CalculationMode::IndependentOriginal => Some(IndependentSubMode::Original),
            CalculationMode::Rolling => None,
        }
    }
}

// ==========================================
// IndependentAllocator - 逐行独立分配
// ==========================================
pub struct IndependentAllocator {
    sorter: PrioritySorter,
}

impl IndependentAllocator {
    pub fn new() -> Self {
        Self {
            sorter: PrioritySorter::new(),
        }
    }

    /// 执行逐行分配
    ///
    /// # 参数
    /// - `shortages`: 已按需求量降序排列的缺货（quantity_needed 会被回写）
    /// - `excesses`: 已按指数降序排列的 MAIN 富余（excess_quantity 会被扣减）
    /// - `sub_mode`: 未满足行的回写方式
    ///
    /// # 返回
    /// (调拨列表, 逐行轨迹)
    #[instrument(skip(self, shortages, excesses), fields(
        shortage_rows = shortages.len(),
        excess_rows = excesses.len()
    ))]
    pub fn allocate(
        &self,
        shortages: &mut [ShortageRecord],
        excesses: &mut [ExcessRecord],
        sub_mode: IndependentSubMode,
    ) -> (Vec<AllocationRecord>, Vec<RowTrace>) {
        let mut allocations = Vec::new();
        let mut traces = Vec::with_capacity(shortages.len());

        for shortage_idx in 0..shortages.len() {
            let to_warehouse = shortages[shortage_idx].warehouse_code.clone();
            let part_id = shortages[shortage_idx].transfer_part_label().to_string();
            let starting_need = shortages[shortage_idx].quantity_needed;
            let mut shortage = starting_need;
            let mut transferred_qty = 0.0;

            for excess_idx in 0..excesses.len() {
                if transferred_qty >= shortage {
                    break;
                }
                if excesses[excess_idx].has_supply() {
                    let transfer_qty =
                        (shortage - transferred_qty).min(excesses[excess_idx].excess_quantity);

                    excesses[excess_idx].excess_quantity -= transfer_qty;
                    self.sorter.refresh(&mut excesses[excess_idx]);

                    debug!(
                        from = %excesses[excess_idx].warehouse_code,
                        to = %to_warehouse,
                        quantity = transfer_qty,
                        "调拨"
                    );
                    allocations.push(AllocationRecord::new(
                        excesses[excess_idx].warehouse_code.clone(),
                        to_warehouse.clone(),
                        part_id.clone(),
                        transfer_qty,
                    ));
                    transferred_qty += transfer_qty;
                }
            }

            if transferred_qty < shortage {
                match sub_mode {
                    IndependentSubMode::Original => {
                        // 回写记录，但行内工作变量保持原值
                        shortages[shortage_idx].quantity_needed = shortage - transferred_qty;
                    }
                    IndependentSubMode::Default => {
                        let updated_shortage = shortage - transferred_qty;
                        shortages[shortage_idx].quantity_needed = updated_shortage;
                        shortage = updated_shortage;
                    }
                }
            } else {
                shortages[shortage_idx].quantity_needed = 0.0;
            }

            traces.push(RowTrace {
                warehouse_code: to_warehouse,
                row_number: shortages[shortage_idx].row_number,
                starting_need,
                transferred: transferred_qty,
                stored_remaining_need: shortages[shortage_idx].quantity_needed,
                working_need: shortage,
            });
        }

        // 报表口径: 全部富余指数最终重算一次
        self.sorter.refresh_all(excesses);

        (allocations, traces)
    }

    /// 未满足缺货: 剩余需求 > 0 的行（保持优先级顺序）
    pub fn unfulfilled(&self, shortages: &[ShortageRecord]) -> Vec<ShortageRecord> {
        shortages
            .iter()
            .filter(|s| s.quantity_needed > 0.0)
            .cloned()
            .collect()
    }
}

impl Default for IndependentAllocator {
    fn default() -> Self {
        Self::new()
    }
}
