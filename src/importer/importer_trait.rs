// ==========================================
// 库存调拨平衡系统 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与字段映射接口（不包含实现）
// ==========================================

use crate::domain::{ExcessRecord, ShortageRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录（列名 → 去空白后的单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析指定工作表为原始行记录
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名（CSV 只有一张表，忽略该参数）
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（已跳过全空白行）
    /// - Err: 文件读取错误、格式错误、工作表不存在
    fn parse_sheet(&self, file_path: &Path, sheet: &str) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 用途: 原始行 → 领域记录
// 实现者: FieldMapper
pub trait RecordMapper: Send + Sync {
    fn map_shortage(&self, row: &RawRow, row_number: usize) -> ImportResult<ShortageRecord>;

    fn map_excess(&self, row: &RawRow, row_number: usize) -> ImportResult<ExcessRecord>;
}
