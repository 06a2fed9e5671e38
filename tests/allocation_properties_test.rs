// ==========================================
// 分配引擎性质测试 (proptest)
// ==========================================
// 数量取整数值，保证浮点运算精确，可直接做相等比较
// ==========================================

use proptest::prelude::*;
use std::collections::HashMap;
use stock_rebalancer::domain::{CalculationMode, ExcessRecord, ShortageRecord};
use stock_rebalancer::engine::{priority_index, AllocationEngine, AllocationOutcome, PrioritySorter};

// ==========================================
// 数据生成策略
// ==========================================

fn mode_strategy() -> impl Strategy<Value = CalculationMode> {
    prop_oneof![
        Just(CalculationMode::IndependentDefault),
        Just(CalculationMode::IndependentOriginal),
        Just(CalculationMode::Rolling),
    ]
}

/// 缺货: 仓库从小集合中取，便于出现同仓库多行
fn shortages_strategy() -> impl Strategy<Value = Vec<ShortageRecord>> {
    prop::collection::vec((0u8..5, 0u32..300), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (warehouse, need))| {
                ShortageRecord::new(format!("S{}", warehouse), need as f64).with_row_number(idx + 1)
            })
            .collect()
    })
}

/// 富余: 仓库号唯一；MAIN 以 E 开头，其余库位以 X 开头
fn excesses_strategy() -> impl Strategy<Value = Vec<ExcessRecord>> {
    prop::collection::vec((any::<bool>(), 0u32..400, 0u32..20), 0..10).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (is_main, qty, usage))| {
                let (code, location) = if is_main {
                    (format!("E{}", idx), "MAIN")
                } else {
                    (format!("X{}", idx), "OTHER")
                };
                ExcessRecord::new(code, location, qty as f64, usage as f64).with_row_number(idx + 1)
            })
            .collect()
    })
}

fn run(
    shortages: Vec<ShortageRecord>,
    excesses: Vec<ExcessRecord>,
    mode: CalculationMode,
) -> AllocationOutcome {
    AllocationEngine::new()
        .allocate(shortages, excesses, mode)
        .expect("合法输入应分配成功")
}

fn sent_by_source(outcome: &AllocationOutcome) -> HashMap<String, f64> {
    let mut sent = HashMap::new();
    for allocation in &outcome.allocations {
        *sent.entry(allocation.from_warehouse.clone()).or_insert(0.0) += allocation.quantity;
    }
    sent
}

fn received_by_warehouse(outcome: &AllocationOutcome) -> HashMap<String, f64> {
    let mut received = HashMap::new();
    for allocation in &outcome.allocations {
        *received.entry(allocation.to_warehouse.clone()).or_insert(0.0) += allocation.quantity;
    }
    received
}

fn need_by_warehouse(shortages: &[ShortageRecord]) -> HashMap<String, f64> {
    let mut needs = HashMap::new();
    for shortage in shortages {
        *needs.entry(shortage.warehouse_code.clone()).or_insert(0.0) += shortage.quantity_needed;
    }
    needs
}

// ==========================================
// 供给守恒 / 不超发 / 库位排除
// ==========================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn supply_is_conserved(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
        mode in mode_strategy(),
    ) {
        let initial: HashMap<String, f64> = excesses
            .iter()
            .map(|e| (e.warehouse_code.clone(), e.excess_quantity))
            .collect();
        let outcome = run(shortages, excesses, mode);
        let sent = sent_by_source(&outcome);

        for excess in &outcome.excesses {
            let before = initial[&excess.warehouse_code];
            let moved = sent.get(&excess.warehouse_code).copied().unwrap_or(0.0);
            prop_assert_eq!(before, excess.excess_quantity + moved);
            prop_assert!(excess.excess_quantity >= 0.0);
        }
    }

    #[test]
    fn transfers_never_exceed_need(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
        mode in mode_strategy(),
    ) {
        let needs = need_by_warehouse(&shortages);
        let outcome = run(shortages, excesses, mode);

        for allocation in &outcome.allocations {
            prop_assert!(allocation.quantity > 0.0);
        }
        for (warehouse, received) in received_by_warehouse(&outcome) {
            prop_assert!(received <= needs[&warehouse], "{} 超发: {}", warehouse, received);
        }
    }

    #[test]
    fn non_main_locations_never_ship(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
        mode in mode_strategy(),
    ) {
        let excluded = excesses.iter().filter(|e| e.location_type != "MAIN").count();
        let outcome = run(shortages, excesses, mode);

        prop_assert_eq!(outcome.excluded_excess_count, excluded);
        prop_assert!(outcome.allocations.iter().all(|a| a.from_warehouse.starts_with('E')));
        prop_assert!(outcome.excesses.iter().all(|e| e.location_type == "MAIN"));
    }

    #[test]
    fn final_index_matches_remaining_excess(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
        mode in mode_strategy(),
    ) {
        let outcome = run(shortages, excesses, mode);
        for excess in &outcome.excesses {
            prop_assert_eq!(
                excess.priority_index,
                priority_index(excess.excess_quantity, excess.usage_rate)
            );
        }
    }
}

// ==========================================
// 需求核算: 已调拨 + 未满足 = 原需求
// ==========================================
proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn independent_need_is_accounted(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
        original in any::<bool>(),
    ) {
        let mode = if original {
            CalculationMode::IndependentOriginal
        } else {
            CalculationMode::IndependentDefault
        };
        let total_need: f64 = shortages.iter().map(|s| s.quantity_needed).sum();
        let outcome = run(shortages, excesses, mode);

        let summary = outcome.summary();
        prop_assert_eq!(summary.total_allocated + summary.total_unfulfilled, total_need);

        for trace in &outcome.row_traces {
            prop_assert_eq!(trace.stored_remaining_need, trace.starting_need - trace.transferred);
        }
        for shortage in &outcome.unfulfilled {
            prop_assert!(shortage.quantity_needed > 0.0);
        }
    }

    #[test]
    fn independent_sub_modes_allocate_identically(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
    ) {
        let default = run(shortages.clone(), excesses.clone(), CalculationMode::IndependentDefault);
        let original = run(shortages, excesses, CalculationMode::IndependentOriginal);

        prop_assert_eq!(default.allocations, original.allocations);
        prop_assert_eq!(default.unfulfilled, original.unfulfilled);
    }

    #[test]
    fn rolling_need_is_accounted_per_warehouse(
        shortages in shortages_strategy(),
        excesses in excesses_strategy(),
    ) {
        let needs = need_by_warehouse(&shortages);
        let outcome = run(shortages, excesses, CalculationMode::Rolling);
        let received = received_by_warehouse(&outcome);

        for shortage in &outcome.shortages {
            let warehouse = &shortage.warehouse_code;
            let got = received.get(warehouse).copied().unwrap_or(0.0);
            prop_assert_eq!(shortage.aggregate_quantity_needed, Some(needs[warehouse]));
            prop_assert_eq!(shortage.rolling_shortage, Some(needs[warehouse] - got));
        }

        let unfulfilled_warehouses = outcome.unfulfilled.len();
        let short_warehouses = needs
            .iter()
            .filter(|(warehouse, need)| {
                **need - received.get(*warehouse).copied().unwrap_or(0.0) > 0.0
            })
            .count();
        prop_assert_eq!(unfulfilled_warehouses, short_warehouses);
    }
}

// ==========================================
// 优先级指数与排序
// ==========================================
proptest! {
    #[test]
    fn priority_index_is_deterministic(excess in 0u32..10_000, usage in 0u32..100) {
        let first = priority_index(excess as f64, usage as f64);
        let second = priority_index(excess as f64, usage as f64);
        prop_assert_eq!(first, second);
        if usage == 0 {
            prop_assert_eq!(first, excess as f64);
        }
    }

    #[test]
    fn sorting_is_idempotent(excesses in excesses_strategy()) {
        let sorter = PrioritySorter::new();
        let once = sorter.sort(excesses);
        let twice = sorter.sort(once.clone());
        prop_assert_eq!(once.clone(), twice);

        for pair in once.windows(2) {
            prop_assert!(pair[0].priority_index >= pair[1].priority_index);
        }
    }
}
