// ==========================================
// 库存调拨平衡系统 - 分配配置读取 Trait
// ==========================================
// 职责: 定义分配运行所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::CalculationMode;
use std::error::Error;

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 用途: 运行分配前读取默认参数
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait AllocationConfigReader: Send + Sync {
    /// 获取可作为调拨来源的库位类型
    ///
    /// # 默认值
    /// - MAIN
    fn get_main_location_type(&self) -> Result<String, Box<dyn Error>>;

    /// 获取默认计算模式
    ///
    /// # 默认值
    /// - independent-default（存储值无法解析时同样回退）
    fn get_calculation_mode(&self) -> Result<CalculationMode, Box<dyn Error>>;

    /// 获取报表语言
    ///
    /// # 默认值
    /// - zh-CN
    fn get_locale(&self) -> Result<String, Box<dyn Error>>;

    /// 获取 CSV 导出目录
    ///
    /// # 默认值
    /// - exports
    fn get_export_dir(&self) -> Result<String, Box<dyn Error>>;
}
