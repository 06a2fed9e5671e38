// ==========================================
// 库存调拨平衡系统 - 配置层
// ==========================================
// 职责: 分配默认参数的持久化与读取
// 存储: config_kv 表
// ==========================================

pub mod allocation_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use allocation_config_trait::AllocationConfigReader;
pub use config_manager::{config_keys, ConfigEntry, ConfigManager, GLOBAL_SCOPE};
