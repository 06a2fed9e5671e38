// ==========================================
// 库存调拨平衡系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 输入格式错误立即失败，不重试、不取默认值
// ==========================================

use std::fmt;
use thiserror::Error;

/// 记录类别（用于错误定位）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Shortage,
    Excess,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Shortage => write!(f, "缺货"),
            RecordKind::Excess => write!(f, "富余"),
        }
    }
}

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{kind}记录无效 (行 {row}, 字段 {field}): {message}")]
    InvalidRecord {
        kind: RecordKind,
        row: usize,
        field: String,
        message: String,
    },

    #[error("引擎配置无效: {0}")]
    InvalidConfig(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
