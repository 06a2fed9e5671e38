// ==========================================
// 库存调拨平衡系统 - 报表模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("导出目录创建失败 ({path}): {message}")]
    ExportDirError { path: String, message: String },

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("JSON 序列化失败: {0}")]
    JsonError(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::CsvWriteError(err.to_string())
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::CsvWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::JsonError(err.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
