// ==========================================
// 库存调拨平衡系统 - 滚动汇总分配
// ==========================================
// 输入: 已写入仓库汇总量、按汇总量降序的缺货 + 已排序 MAIN 富余
// 输出: 调拨列表；每行写入所属仓库的最终 rolling_shortage
// ==========================================
// 规则:
// 1) 每个仓库只服务一次，缺货量取汇总量 (rolling_shortage)
// 2) 富余量 >= 滚动缺货: 一次性覆盖，退出该仓库的扫描
// 3) 否则整条富余调出（归零），以剩余缺货继续扫描
// 4) 富余顺序固定，已归零的富余跳过（调拨数量必须 > 0）
// 5) 扫描完仍 > 0 的仓库即未满足
// 6) 调拨零件标签: 仓库各行零件号一致时取该零件号，否则取仓库号
// ==========================================

use crate::domain::{AllocationRecord, ExcessRecord, ShortageRecord};
use crate::engine::priority::PrioritySorter;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

// ==========================================
// RollingAllocator - 滚动汇总分配
// ==========================================
pub struct RollingAllocator {
    sorter: PrioritySorter,
}

impl RollingAllocator {
    pub fn new() -> Self {
        Self {
            sorter: PrioritySorter::new(),
        }
    }

    /// 执行滚动分配
    ///
    /// # 参数
    /// - `shortages`: 已按汇总量降序排列的缺货（rolling_shortage 会被回写）
    /// - `excesses`: 已按指数降序排列的 MAIN 富余（excess_quantity 会被扣减）
    #[instrument(skip(self, shortages, excesses), fields(
        shortage_rows = shortages.len(),
        excess_rows = excesses.len()
    ))]
    pub fn allocate(
        &self,
        shortages: &mut [ShortageRecord],
        excesses: &mut [ExcessRecord],
    ) -> Vec<AllocationRecord> {
        let mut allocations = Vec::new();
        let mut settled: HashMap<String, f64> = HashMap::new();
        let labels = warehouse_part_labels(shortages);

        for shortage_idx in 0..shortages.len() {
            let to_warehouse = shortages[shortage_idx].warehouse_code.clone();

            // 同仓库的后续行沿用已结算的滚动缺货
            if let Some(&final_shortage) = settled.get(&to_warehouse) {
                shortages[shortage_idx].rolling_shortage = Some(final_shortage);
                continue;
            }

            let part_id = labels
                .get(&to_warehouse)
                .cloned()
                .unwrap_or_else(|| to_warehouse.clone());
            let mut rolling_shortage = shortages[shortage_idx]
                .aggregate_quantity_needed
                .unwrap_or(shortages[shortage_idx].quantity_needed);

            if rolling_shortage > 0.0 {
                for excess_idx in 0..excesses.len() {
                    if !excesses[excess_idx].has_supply() {
                        continue;
                    }
                    let available = excesses[excess_idx].excess_quantity;

                    let from_warehouse = excesses[excess_idx].warehouse_code.clone();
                    if available >= rolling_shortage {
                        excesses[excess_idx].excess_quantity -= rolling_shortage;
                        self.sorter.refresh(&mut excesses[excess_idx]);
                        debug!(from = %from_warehouse, to = %to_warehouse, quantity = rolling_shortage, "整单覆盖");
                        allocations.push(AllocationRecord::new(
                            from_warehouse,
                            to_warehouse.clone(),
                            part_id.clone(),
                            rolling_shortage,
                        ));
                        rolling_shortage = 0.0;
                        break;
                    }

                    excesses[excess_idx].excess_quantity = 0.0;
                    self.sorter.refresh(&mut excesses[excess_idx]);
                    debug!(from = %from_warehouse, to = %to_warehouse, quantity = available, "部分调拨");
                    allocations.push(AllocationRecord::new(
                        from_warehouse,
                        to_warehouse.clone(),
                        part_id.clone(),
                        available,
                    ));
                    rolling_shortage -= available;
                }
            }

            shortages[shortage_idx].rolling_shortage = Some(rolling_shortage);
            settled.insert(to_warehouse, rolling_shortage);
        }

        self.sorter.refresh_all(excesses);

        allocations
    }

    /// 未满足缺货: 每个仓库取优先级顺序中的第一行，滚动缺货 > 0 者
    pub fn unfulfilled(&self, shortages: &[ShortageRecord]) -> Vec<ShortageRecord> {
        let mut seen: HashSet<&str> = HashSet::new();
        shortages
            .iter()
            .filter(|s| seen.insert(s.warehouse_code.as_str()))
            .filter(|s| s.rolling_shortage.unwrap_or(s.quantity_needed) > 0.0)
            .cloned()
            .collect()
    }
}

/// 每个仓库的调拨零件标签（零件号不一致时退回仓库号）
fn warehouse_part_labels(shortages: &[ShortageRecord]) -> HashMap<String, String> {
    let mut labels: HashMap<String, String> = HashMap::new();
    for shortage in shortages {
        let label = shortage.transfer_part_label();
        labels
            .entry(shortage.warehouse_code.clone())
            .and_modify(|current| {
                if current.as_str() != label {
                    *current = shortage.warehouse_code.clone();
                }
            })
            .or_insert_with(|| label.to_string());
    }
    labels
}

impl Default for RollingAllocator {
    fn default() -> Self {
        Self::new()
    }
}
