// ==========================================
// 库存调拨平衡系统 - CSV 导出
// ==========================================
// 每张表写为 <标题>.csv: 表头一行，无索引列
// ==========================================

use crate::report::error::{ReportError, ReportResult};
use crate::report::tables::{ReportTable, ReportTables};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub struct CsvExporter {
    export_dir: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(export_dir: P) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// 导出单张表，返回文件路径
    pub fn export_table(&self, table: &ReportTable) -> ReportResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.export_dir.join(format!("{}.csv", table.title));

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(path)
    }

    /// 按页面顺序导出全部四张表
    #[instrument(skip(self, tables), fields(dir = %self.export_dir.display()))]
    pub fn export_all(&self, tables: &ReportTables) -> ReportResult<Vec<PathBuf>> {
        let paths = tables
            .all()
            .iter()
            .map(|table| self.export_table(table))
            .collect::<ReportResult<Vec<_>>>()?;
        info!(files = paths.len(), "CSV 导出完成");
        Ok(paths)
    }

    fn ensure_dir(&self) -> ReportResult<()> {
        std::fs::create_dir_all(&self.export_dir).map_err(|e| ReportError::ExportDirError {
            path: self.export_dir.display().to_string(),
            message: e.to_string(),
        })
    }
}
