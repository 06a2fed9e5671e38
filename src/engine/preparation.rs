// ==========================================
// 库存调拨平衡系统 - 分配前准备
// ==========================================
// 职责:
// 1) 缺货按需求量降序（逐行模式）或按仓库汇总量降序（滚动模式）
// 2) 富余仅保留 MAIN 库位，其余类型本次运行永久排除
// 3) 计算富余指数并降序排列
// ==========================================

use crate::domain::{CalculationMode, ExcessRecord, ShortageRecord};
use crate::engine::priority::PrioritySorter;
use std::collections::HashMap;
use tracing::debug;

/// 准备完成的输入
#[derive(Debug, Clone)]
pub struct PreparedInput {
    pub shortages: Vec<ShortageRecord>,
    pub excesses: Vec<ExcessRecord>,
    pub excluded_excess_count: usize,
}

// ==========================================
// AllocationPreparer - 分配前准备
// ==========================================
pub struct AllocationPreparer {
    main_location_type: String,
    sorter: PrioritySorter,
}

impl AllocationPreparer {
    pub fn new(main_location_type: impl Into<String>) -> Self {
        Self {
            main_location_type: main_location_type.into(),
            sorter: PrioritySorter::new(),
        }
    }

    /// 按计算模式准备缺货与富余
    pub fn prepare(
        &self,
        shortages: Vec<ShortageRecord>,
        excesses: Vec<ExcessRecord>,
        mode: CalculationMode,
    ) -> PreparedInput {
        let shortages = match mode {
            CalculationMode::Rolling => self.sort_shortages_by_aggregate(shortages),
            CalculationMode::IndependentDefault | CalculationMode::IndependentOriginal => {
                self.sort_shortages_by_need(shortages)
            }
        };

        let total_excess = excesses.len();
        let excesses = self.prepare_excesses(excesses);
        let excluded_excess_count = total_excess - excesses.len();

        debug!(
            shortage_rows = shortages.len(),
            eligible_excess_rows = excesses.len(),
            excluded_excess_rows = excluded_excess_count,
            "分配前准备完成"
        );

        PreparedInput {
            shortages,
            excesses,
            excluded_excess_count,
        }
    }

    /// 过滤 MAIN 库位并按指数降序排列
    pub fn prepare_excesses(&self, excesses: Vec<ExcessRecord>) -> Vec<ExcessRecord> {
        let eligible: Vec<ExcessRecord> = excesses
            .into_iter()
            .filter(|e| e.is_location_type(&self.main_location_type))
            .collect();
        self.sorter.sort(eligible)
    }

    /// 缺货按需求量降序（稳定）
    pub fn sort_shortages_by_need(&self, mut shortages: Vec<ShortageRecord>) -> Vec<ShortageRecord> {
        shortages.sort_by(|a, b| b.quantity_needed.total_cmp(&a.quantity_needed));
        shortages
    }

    /// 写入仓库汇总需求量并按其降序（稳定）
    ///
    /// rolling_shortage 以汇总量为初值
    pub fn sort_shortages_by_aggregate(&self, mut shortages: Vec<ShortageRecord>) -> Vec<ShortageRecord> {
        let totals = aggregate_by_warehouse(&shortages);
        for shortage in shortages.iter_mut() {
            let aggregate = totals
                .get(shortage.warehouse_code.as_str())
                .copied()
                .unwrap_or(shortage.quantity_needed);
            shortage.aggregate_quantity_needed = Some(aggregate);
            shortage.rolling_shortage = Some(aggregate);
        }

        shortages.sort_by(|a, b| {
            let agg_a = a.aggregate_quantity_needed.unwrap_or(a.quantity_needed);
            let agg_b = b.aggregate_quantity_needed.unwrap_or(b.quantity_needed);
            agg_b.total_cmp(&agg_a)
        });
        shortages
    }
}

/// 按仓库号汇总需求量
pub fn aggregate_by_warehouse(shortages: &[ShortageRecord]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for shortage in shortages {
        *totals.entry(shortage.warehouse_code.clone()).or_insert(0.0) += shortage.quantity_needed;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preparer() -> AllocationPreparer {
        AllocationPreparer::new("MAIN")
    }

    #[test]
    fn test_shortages_sorted_by_need_desc_stable() {
        let sorted = preparer().sort_shortages_by_need(vec![
            ShortageRecord::new("W1", 10.0),
            ShortageRecord::new("W2", 30.0),
            ShortageRecord::new("W3", 10.0),
        ]);
        let codes: Vec<_> = sorted.iter().map(|s| s.warehouse_code.as_str()).collect();
        assert_eq!(codes, vec!["W2", "W1", "W3"]);
    }

    #[test]
    fn test_aggregate_sort_sums_rows_of_same_warehouse() {
        let sorted = preparer().sort_shortages_by_aggregate(vec![
            ShortageRecord::new("W2", 40.0),
            ShortageRecord::new("W1", 30.0),
            ShortageRecord::new("W1", 20.0),
        ]);

        let codes: Vec<_> = sorted.iter().map(|s| s.warehouse_code.as_str()).collect();
        assert_eq!(codes, vec!["W1", "W1", "W2"]);
        assert_eq!(sorted[0].aggregate_quantity_needed, Some(50.0));
        assert_eq!(sorted[1].rolling_shortage, Some(50.0));
        assert_eq!(sorted[2].aggregate_quantity_needed, Some(40.0));
        // 原始行需求量不变
        assert_eq!(sorted[0].quantity_needed, 30.0);
    }

    #[test]
    fn test_prepare_excesses_filters_non_main() {
        let prepared = preparer().prepare_excesses(vec![
            ExcessRecord::new("W2", "MAIN", 20.0, 0.0),
            ExcessRecord::new("W3", "OTHER", 1000.0, 0.0),
            ExcessRecord::new("W4", "MAIN", 50.0, 1.0),
        ]);
        let codes: Vec<_> = prepared.iter().map(|e| e.warehouse_code.as_str()).collect();
        assert_eq!(codes, vec!["W4", "W2"]);
    }

    #[test]
    fn test_prepare_counts_excluded_rows() {
        let prepared = preparer().prepare(
            vec![ShortageRecord::new("W1", 50.0)],
            vec![
                ExcessRecord::new("W2", "MAIN", 20.0, 0.0),
                ExcessRecord::new("W3", "OTHER", 1000.0, 0.0),
            ],
            CalculationMode::IndependentDefault,
        );
        assert_eq!(prepared.excesses.len(), 1);
        assert_eq!(prepared.excluded_excess_count, 1);
        assert_eq!(prepared.excesses[0].priority_index, 20.0);
    }
}
