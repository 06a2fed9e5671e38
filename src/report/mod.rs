// ==========================================
// 库存调拨平衡系统 - 报表层
// ==========================================
// 职责: 分配结果 → 表格 / 搜索 / CSV 导出 / 文本渲染
// ==========================================

pub mod csv_export;
pub mod error;
pub mod filter;
pub mod tables;
pub mod text;

pub use csv_export::CsvExporter;
pub use error::{ReportError, ReportResult};
pub use filter::row_matches;
pub use tables::{
    ReportTable, ReportTables, ALLOCATIONS_TITLE, FINAL_SHORTAGE_TITLE, TRANSFERS_TITLE,
    UNFULFILLED_TITLE,
};
pub use text::{render_report, render_summary, render_table};
