// ==========================================
// 库存调拨平衡系统 - 应用层
// ==========================================
// 职责: 命令行集成，连接终端与 API 层
// ==========================================

pub mod cli;
pub mod commands;
pub mod state;

// 重导出
pub use cli::{Cli, Commands, ConfigAction, OutputFormat, RunArgs};
pub use commands::{execute, handle_config, run_allocation};
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
