// ==========================================
// 库存调拨平衡系统 - 分配引擎入口
// ==========================================
// 流程: 输入校验 → 分配前准备 → 贪心匹配 → 事后核算
// 纯函数: 输入记录在单次运行内按下标更新，不跨运行共享状态
// ==========================================

use crate::domain::{CalculationMode, ExcessRecord, ShortageRecord, MAIN_LOCATION_TYPE};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::independent::{IndependentAllocator, IndependentSubMode};
use crate::engine::outcome::AllocationOutcome;
use crate::engine::preparation::AllocationPreparer;
use crate::engine::rolling::RollingAllocator;
use crate::engine::validation::InputValidator;
use tracing::{info, instrument, warn};

// ==========================================
// AllocationEngine - 分配引擎
// ==========================================
pub struct AllocationEngine {
    main_location_type: String,
    independent: IndependentAllocator,
    rolling: RollingAllocator,
}

impl AllocationEngine {
    pub fn new() -> Self {
        Self::with_main_location_type(MAIN_LOCATION_TYPE)
    }

    pub fn with_main_location_type(main_location_type: impl Into<String>) -> Self {
        Self {
            main_location_type: main_location_type.into(),
            independent: IndependentAllocator::new(),
            rolling: RollingAllocator::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 对单一零件的记录集执行分配
    ///
    /// # 参数
    /// - `shortages`: 缺货记录
    /// - `excesses`: 富余记录（非 MAIN 库位将被排除）
    /// - `mode`: 计算模式
    ///
    /// # 返回
    /// - Ok(AllocationOutcome): 调拨列表 + 更新后的缺货 + 未满足缺货 + 富余终态
    /// - Err(EngineError): 记录格式错误
    #[instrument(skip(self, shortages, excesses), fields(
        mode = %mode,
        shortage_rows = shortages.len(),
        excess_rows = excesses.len()
    ))]
    pub fn allocate(
        &self,
        shortages: Vec<ShortageRecord>,
        excesses: Vec<ExcessRecord>,
        mode: CalculationMode,
    ) -> EngineResult<AllocationOutcome> {
        self.check_config()?;
        InputValidator::validate(&shortages, &excesses)?;

        let outcome = self.allocate_validated(shortages, excesses, mode);
        let summary = outcome.summary();
        info!(
            allocations = summary.allocation_count,
            total_allocated = summary.total_allocated,
            unfulfilled_rows = summary.unfulfilled_rows,
            total_unfulfilled = summary.total_unfulfilled,
            "分配完成"
        );
        Ok(outcome)
    }

    /// 按零件分片执行分配
    ///
    /// 不同零件之间不争用供给；零件按其在缺货中首次出现的顺序依次计算，
    /// 结果按零件顺序拼接。无对应缺货的富余原样返回（已过滤、已算指数）。
    #[instrument(skip(self, shortages, excesses), fields(
        mode = %mode,
        shortage_rows = shortages.len(),
        excess_rows = excesses.len()
    ))]
    pub fn allocate_by_part(
        &self,
        shortages: Vec<ShortageRecord>,
        excesses: Vec<ExcessRecord>,
        mode: CalculationMode,
    ) -> EngineResult<AllocationOutcome> {
        self.check_config()?;
        InputValidator::validate(&shortages, &excesses)?;

        let mut shortage_groups = group_by_part(shortages, |s| s.part_id.clone());
        let mut excess_groups = group_by_part(excesses, |e| e.part_id.clone());

        let mut outcome = AllocationOutcome::empty(mode);
        for (part_key, part_shortages) in shortage_groups.drain(..) {
            let part_excesses = take_group(&mut excess_groups, &part_key).unwrap_or_default();
            let part_outcome = self.allocate_validated(part_shortages, part_excesses, mode);
            outcome.extend(part_outcome);
        }

        // 无缺货的零件: 富余不参与分配
        let preparer = AllocationPreparer::new(self.main_location_type.clone());
        for (_, part_excesses) in excess_groups {
            let total = part_excesses.len();
            let eligible = preparer.prepare_excesses(part_excesses);
            outcome.excluded_excess_count += total - eligible.len();
            outcome.excesses.extend(eligible);
        }

        let summary = outcome.summary();
        info!(
            allocations = summary.allocation_count,
            total_allocated = summary.total_allocated,
            unfulfilled_rows = summary.unfulfilled_rows,
            "分片分配完成"
        );
        Ok(outcome)
    }

    fn allocate_validated(
        &self,
        shortages: Vec<ShortageRecord>,
        excesses: Vec<ExcessRecord>,
        mode: CalculationMode,
    ) -> AllocationOutcome {
        let preparer = AllocationPreparer::new(self.main_location_type.clone());
        let prepared = preparer.prepare(shortages, excesses, mode);
        let mut shortages = prepared.shortages;
        let mut excesses = prepared.excesses;

        if excesses.is_empty() && !shortages.is_empty() {
            warn!(
                main_location_type = %self.main_location_type,
                "无可用富余来源，全部缺货未满足"
            );
        }

        let (allocations, row_traces, unfulfilled) = match IndependentSubMode::from_mode(mode) {
            Some(sub_mode) => {
                let (allocations, traces) =
                    self.independent.allocate(&mut shortages, &mut excesses, sub_mode);
                let unfulfilled = self.independent.unfulfilled(&shortages);
                (allocations, traces, unfulfilled)
            }
            None => {
                let allocations = self.rolling.allocate(&mut shortages, &mut excesses);
                let unfulfilled = self.rolling.unfulfilled(&shortages);
                (allocations, Vec::new(), unfulfilled)
            }
        };

        AllocationOutcome {
            mode,
            allocations,
            shortages,
            unfulfilled,
            excesses,
            row_traces,
            excluded_excess_count: prepared.excluded_excess_count,
        }
    }

    fn check_config(&self) -> EngineResult<()> {
        if self.main_location_type.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "main_location_type 不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 按零件键分组，保持首次出现顺序
fn group_by_part<T, F>(records: Vec<T>, key_of: F) -> Vec<(Option<String>, Vec<T>)>
where
    F: Fn(&T) -> Option<String>,
{
    let mut groups: Vec<(Option<String>, Vec<T>)> = Vec::new();
    for record in records {
        let key = key_of(&record);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(record),
            None => groups.push((key, vec![record])),
        }
    }
    groups
}

fn take_group<T>(groups: &mut Vec<(Option<String>, Vec<T>)>, key: &Option<String>) -> Option<Vec<T>> {
    let pos = groups.iter().position(|(k, _)| k == key)?;
    Some(groups.remove(pos).1)
}
