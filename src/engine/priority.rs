// ==========================================
// 库存调拨平衡系统 - 富余优先级排序引擎
// ==========================================
// 职责: 计算富余/消耗指数，按指数降序排列富余来源
// 输入: MAIN 库位富余记录
// 输出: 指数已刷新、按优先级排序的富余记录
// ==========================================
// 规则: 优先消耗“相对自身消耗速度富余最多”的来源，
//       近期可能自用的来源最后消耗
// ==========================================

use crate::domain::ExcessRecord;
use std::cmp::Ordering;

/// 富余/消耗指数
///
/// `usage_rate != 0` 时为 `excess_quantity / usage_rate`，
/// 否则直接取 `excess_quantity`（不做归一化）
pub fn priority_index(excess_quantity: f64, usage_rate: f64) -> f64 {
    if usage_rate != 0.0 {
        excess_quantity / usage_rate
    } else {
        excess_quantity
    }
}

// ==========================================
// PrioritySorter - 富余优先级排序引擎
// ==========================================
pub struct PrioritySorter {
    // 无状态引擎,不需要注入依赖
}

impl PrioritySorter {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按当前富余量重算单条记录的指数
    pub fn refresh(&self, excess: &mut ExcessRecord) {
        excess.priority_index = priority_index(excess.excess_quantity, excess.usage_rate);
    }

    /// 重算全部记录的指数（不改变顺序）
    pub fn refresh_all(&self, excesses: &mut [ExcessRecord]) {
        for excess in excesses.iter_mut() {
            self.refresh(excess);
        }
    }

    /// 刷新指数并按指数降序排序
    ///
    /// 稳定排序: 指数相同的记录保持输入顺序
    pub fn sort(&self, mut excesses: Vec<ExcessRecord>) -> Vec<ExcessRecord> {
        self.refresh_all(&mut excesses);
        excesses.sort_by(|a, b| self.compare(a, b));
        excesses
    }

    /// 比较两个富余来源的优先级
    ///
    /// Ordering::Less 表示 a 优先于 b
    fn compare(&self, a: &ExcessRecord, b: &ExcessRecord) -> Ordering {
        b.priority_index.total_cmp(&a.priority_index)
    }
}

impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}
