// ==========================================
// 库存调拨平衡系统 - 核心库
// ==========================================
// 职责: 将 MAIN 库位的富余库存调拨给缺货仓库
// 技术栈: Rust + calamine/csv + SQLite 配置
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配算法
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 报表层 - 表格 / 搜索 / 导出
pub mod report;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令行集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AllocationRecord, CalculationMode, ExcessRecord, ShortageRecord, ShortageStatus,
    MAIN_LOCATION_TYPE,
};

// 引擎
pub use engine::{AllocationEngine, AllocationOutcome, AllocationSummary, EngineError};

// 导入
pub use importer::{AllocationDataset, DatasetLoader, ImportError};

// API
pub use api::{AllocationApi, AllocationReport, AllocationRequest, ApiError, ConfigApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存调拨平衡系统";
