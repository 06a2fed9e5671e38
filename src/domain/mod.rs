// ==========================================
// 库存调拨平衡系统 - 领域模型层
// ==========================================
// 职责: 定义缺货/富余/调拨实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod excess;
pub mod shortage;
pub mod types;

// 重导出核心类型
pub use allocation::{format_quantity, AllocationRecord};
pub use excess::ExcessRecord;
pub use shortage::ShortageRecord;
pub use types::{CalculationMode, ShortageStatus, MAIN_LOCATION_TYPE};
