// ==========================================
// 库存调拨平衡系统 - 导入层
// ==========================================
// 职责: 外部表格 → 缺货/富余领域记录
// 支持: Excel, CSV
// ==========================================

pub mod dataset_loader;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use dataset_loader::{AllocationDataset, DatasetLoader, EXCESSES_SHEET, SHORTAGES_SHEET};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RawRow, RecordMapper};
