// ==========================================
// 库存调拨平衡系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{AllocationApi, ConfigApi};
use crate::config::{AllocationConfigReader, ConfigManager};
use crate::i18n::{is_supported_locale, set_locale};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "STOCK_REBALANCER_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径（内存库为 ":memory:"）
    pub db_path: String,

    /// 配置管理器（各 API 共享）
    pub config_manager: Arc<ConfigManager>,

    /// 调拨分配API
    pub allocation_api: Arc<AllocationApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, String> {
        let db_path = db_path.as_ref();
        tracing::info!("初始化AppState，数据库路径: {}", db_path.display());

        let config_manager = ConfigManager::new(db_path)
            .map_err(|e| format!("无法打开配置数据库: {}", e))?;
        Ok(Self::from_manager(
            db_path.display().to_string(),
            Arc::new(config_manager),
        ))
    }

    /// 使用内存配置库（测试用）
    pub fn in_memory() -> Result<Self, String> {
        let config_manager =
            ConfigManager::in_memory().map_err(|e| format!("无法创建内存数据库: {}", e))?;
        Ok(Self::from_manager(":memory:".to_string(), Arc::new(config_manager)))
    }

    fn from_manager(db_path: String, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            db_path,
            allocation_api: Arc::new(AllocationApi::new(config_manager.clone())),
            config_api: Arc::new(ConfigApi::new(config_manager.clone())),
            config_manager,
        }
    }

    /// 应用报表语言：命令行优先，其次配置值
    ///
    /// 不支持的语言记录告警并保持默认语言
    pub fn apply_locale(&self, override_locale: Option<&str>) -> String {
        let locale = match override_locale {
            Some(locale) => locale.trim().to_string(),
            None => self
                .config_manager
                .get_locale()
                .unwrap_or_else(|_| crate::config::config_keys::DEFAULT_LOCALE.to_string()),
        };

        if is_supported_locale(&locale) {
            set_locale(&locale);
            locale
        } else {
            tracing::warn!(locale = %locale, "不支持的语言，使用默认语言");
            set_locale(crate::config::config_keys::DEFAULT_LOCALE);
            crate::config::config_keys::DEFAULT_LOCALE.to_string()
        }
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 STOCK_REBALANCER_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> PathBuf {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("stock-rebalancer").join("stock_rebalancer.db"),
        None => PathBuf::from("./stock_rebalancer.db"),
    }
}
