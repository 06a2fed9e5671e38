// ==========================================
// 库存调拨平衡系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行调用
// ==========================================

pub mod allocation_api;
pub mod config_api;
pub mod error;

// 重导出核心类型
pub use allocation_api::{AllocationApi, AllocationReport, AllocationRequest};
pub use config_api::ConfigApi;
pub use error::{ApiError, ApiResult};
