#![allow(dead_code)]

// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用环境（临时配置库 + 临时工作目录）
// 依赖: 测试文件需同时声明 `mod test_helpers;`
// ==========================================

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use stock_rebalancer::api::{AllocationApi, ConfigApi};
use stock_rebalancer::app::AppState;
use stock_rebalancer::config::ConfigManager;

use crate::test_helpers::write_standard_workbook;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 配置库与数据文件都放在同一个临时目录下
pub struct ApiTestEnv {
    pub db_path: PathBuf,
    pub state: AppState,
    pub allocation_api: Arc<AllocationApi>,
    pub config_api: Arc<ConfigApi>,
    pub config_manager: Arc<ConfigManager>,

    // 临时目录（确保生命周期）
    temp_dir: TempDir,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let temp_dir = tempfile::tempdir()?;
        let db_path = temp_dir.path().join("stock_rebalancer_api_test.db");
        let state = AppState::new(&db_path)?;

        Ok(Self {
            db_path,
            allocation_api: state.allocation_api.clone(),
            config_api: state.config_api.clone(),
            config_manager: state.config_manager.clone(),
            state,
            temp_dir,
        })
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// 写入标准示例工作簿并返回路径
    pub fn standard_workbook(&self) -> Result<PathBuf, Box<dyn Error>> {
        write_standard_workbook(self.dir())
    }

    /// 临时目录下的导出目录（不预先创建）
    pub fn export_dir(&self) -> PathBuf {
        self.dir().join("exports")
    }

    /// 重新打开同一个配置库
    pub fn reopen(&self) -> Result<AppState, Box<dyn Error>> {
        Ok(AppState::new(&self.db_path)?)
    }
}
