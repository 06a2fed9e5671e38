// ==========================================
// 库存调拨平衡系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)，仅使用 global 作用域
// ==========================================

use crate::config::allocation_config_trait::AllocationConfigReader;
use crate::db::{ensure_config_schema, open_in_memory, open_sqlite_connection};
use crate::domain::CalculationMode;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const GLOBAL_SCOPE: &str = "global";

/// 单条配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub updated_at: Option<String>, // None = 未写库，取默认值
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时创建）
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存数据库（测试与一次性运行）
    pub fn in_memory() -> Result<Self, Box<dyn Error>> {
        let conn = open_in_memory()?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let now = chrono::Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = ?4",
            params![GLOBAL_SCOPE, key, value, now],
        )?;

        tracing::info!(key, value, "配置已更新");
        Ok(())
    }

    /// 已写库的 global 配置（按 key 排序）
    pub fn list_stored_configs(&self) -> Result<Vec<ConfigEntry>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value, updated_at FROM config_kv WHERE scope_id = ?1 ORDER BY key",
        )?;
        let entries = stmt
            .query_map(params![GLOBAL_SCOPE], |row| {
                Ok(ConfigEntry {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: Some(row.get(2)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// 生效配置: 全部已知键（未写库者取默认值）+ 其余已写库键
    pub fn effective_configs(&self) -> Result<Vec<ConfigEntry>, Box<dyn Error>> {
        let stored = self.list_stored_configs()?;

        let mut entries: Vec<ConfigEntry> = config_keys::DEFAULTS
            .iter()
            .map(|(key, default)| {
                stored
                    .iter()
                    .find(|e| e.key == *key)
                    .cloned()
                    .unwrap_or_else(|| ConfigEntry {
                        key: key.to_string(),
                        value: default.to_string(),
                        updated_at: None,
                    })
            })
            .collect();

        entries.extend(
            stored
                .into_iter()
                .filter(|e| config_keys::default_for(&e.key).is_none()),
        );
        Ok(entries)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_global_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// AllocationConfigReader Trait 实现
// ==========================================
impl AllocationConfigReader for ConfigManager {
    fn get_main_location_type(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(
            config_keys::MAIN_LOCATION_TYPE,
            config_keys::DEFAULT_MAIN_LOCATION_TYPE,
        )
    }

    fn get_calculation_mode(&self) -> Result<CalculationMode, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::CALCULATION_MODE,
            config_keys::DEFAULT_CALCULATION_MODE,
        )?;
        Ok(value.parse::<CalculationMode>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::CALCULATION_MODE,
                raw_value = %value,
                "计算模式配置格式错误，使用默认值"
            );
            CalculationMode::default()
        }))
    }

    fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, config_keys::DEFAULT_LOCALE)
    }

    fn get_export_dir(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::EXPORT_DIR, config_keys::DEFAULT_EXPORT_DIR)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const MAIN_LOCATION_TYPE: &str = "main_location_type";
    pub const CALCULATION_MODE: &str = "calculation_mode";
    pub const LOCALE: &str = "locale";
    pub const EXPORT_DIR: &str = "export_dir";

    pub const DEFAULT_MAIN_LOCATION_TYPE: &str = "MAIN";
    pub const DEFAULT_CALCULATION_MODE: &str = "independent-default";
    pub const DEFAULT_LOCALE: &str = "zh-CN";
    pub const DEFAULT_EXPORT_DIR: &str = "exports";

    /// 已知键及默认值（列表输出顺序）
    pub const DEFAULTS: [(&str, &str); 4] = [
        (MAIN_LOCATION_TYPE, DEFAULT_MAIN_LOCATION_TYPE),
        (CALCULATION_MODE, DEFAULT_CALCULATION_MODE),
        (LOCALE, DEFAULT_LOCALE),
        (EXPORT_DIR, DEFAULT_EXPORT_DIR),
    ];

    pub fn default_for(key: &str) -> Option<&'static str> {
        DEFAULTS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}
