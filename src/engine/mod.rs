// ==========================================
// 库存调拨平衡系统 - 引擎层
// ==========================================
// 职责: 调拨分配算法（准备 / 贪心匹配 / 事后核算）
// 红线: 引擎不做 I/O，单线程、同步、纯内存计算
// ==========================================

pub mod allocator;
pub mod error;
pub mod independent;
pub mod outcome;
pub mod preparation;
pub mod priority;
pub mod rolling;
pub mod validation;

// 重导出核心引擎
pub use allocator::AllocationEngine;
pub use error::{EngineError, EngineResult, RecordKind};
pub use independent::{IndependentAllocator, IndependentSubMode};
pub use outcome::{AllocationOutcome, AllocationSummary, RowTrace};
pub use preparation::{AllocationPreparer, PreparedInput};
pub use priority::{priority_index, PrioritySorter};
pub use rolling::RollingAllocator;
pub use validation::InputValidator;
