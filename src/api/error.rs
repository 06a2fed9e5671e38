// ==========================================
// 库存调拨平衡系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/报表/配置错误，转换为用户可读的错误消息
// ==========================================

use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::report::ReportError;
use thiserror::Error;

/// API层错误类型
/// 错误信息必须包含显式原因（行号、字段、配置键）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 各层错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("分配计算失败: {0}")]
    EngineError(#[from] EngineError),

    #[error("报表输出失败: {0}")]
    ReportError(#[from] ReportError),

    #[error("配置读写失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<Box<dyn std::error::Error>> for ApiError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
