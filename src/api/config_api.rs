// ==========================================
// 库存调拨平衡系统 - 配置管理 API
// ==========================================
// 职责: 配置查询、更新（含取值校验）
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{config_keys, ConfigEntry, ConfigManager};
use crate::domain::CalculationMode;
use crate::i18n::{is_supported_locale, SUPPORTED_LOCALES};

// ==========================================
// ConfigApi - 配置管理 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询全部生效配置（未写库的键返回默认值）
    pub fn list_configs(&self) -> ApiResult<Vec<ConfigEntry>> {
        Ok(self.config_manager.effective_configs()?)
    }

    /// 查询单个配置
    ///
    /// # 返回
    /// - Ok(ConfigEntry): 配置项（未写库时为默认值）
    /// - Err(ApiError::NotFound): 未知键
    pub fn get_config(&self, key: &str) -> ApiResult<ConfigEntry> {
        self.list_configs()?
            .into_iter()
            .find(|e| e.key == key)
            .ok_or_else(|| ApiError::NotFound(format!("配置项 {}", key)))
    }

    /// 更新配置
    ///
    /// # 校验
    /// - 仅接受已知键
    /// - calculation_mode 必须可解析
    /// - main_location_type / export_dir 不能为空
    /// - locale 必须是支持的语言
    pub fn update_config(&self, key: &str, value: &str) -> ApiResult<ConfigEntry> {
        let value = validate_config_value(key, value)?;
        self.config_manager.set_global_config_value(key, &value)?;
        self.get_config(key)
    }
}

fn validate_config_value(key: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    match key {
        config_keys::CALCULATION_MODE => trimmed
            .parse::<CalculationMode>()
            .map(|mode| mode.as_str().to_string())
            .map_err(ApiError::InvalidInput),
        config_keys::MAIN_LOCATION_TYPE | config_keys::EXPORT_DIR => {
            if trimmed.is_empty() {
                Err(ApiError::InvalidInput(format!("{} 不能为空", key)))
            } else {
                Ok(trimmed.to_string())
            }
        }
        config_keys::LOCALE => {
            if is_supported_locale(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(ApiError::InvalidInput(format!(
                    "不支持的语言: {}（可选: {}）",
                    trimmed,
                    SUPPORTED_LOCALES.join(", ")
                )))
            }
        }
        _ => Err(ApiError::NotFound(format!("配置项 {}", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ConfigApi {
        ConfigApi::new(Arc::new(ConfigManager::in_memory().unwrap()))
    }

    #[test]
    fn test_update_normalizes_mode_alias() {
        let api = api();
        let entry = api.update_config("calculation_mode", " Original ").unwrap();
        assert_eq!(entry.value, "independent-original");
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn test_update_rejects_bad_values() {
        let api = api();
        assert!(matches!(
            api.update_config("calculation_mode", "fastest"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.update_config("main_location_type", "  "),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.update_config("locale", "fr"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.update_config("unknown_key", "x"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_config_returns_default() {
        let entry = api().get_config("export_dir").unwrap();
        assert_eq!(entry.value, "exports");
        assert!(entry.updated_at.is_none());
    }
}
