// ==========================================
// 库存调拨平衡系统 - 数据集加载器
// ==========================================
// 流程: 文件解析 → 字段映射（首个错误行即失败）→ AllocationDataset
// 来源: 工作簿 (Shortages / Excesses 两张表) 或 CSV 文件对
// ==========================================

use crate::domain::{ExcessRecord, ShortageRecord};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, UniversalFileParser};
use crate::importer::importer_trait::{FileParser, RawRow, RecordMapper};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

pub const SHORTAGES_SHEET: &str = "Shortages";
pub const EXCESSES_SHEET: &str = "Excesses";

/// 一次分配所需的完整输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationDataset {
    pub shortages: Vec<ShortageRecord>,
    pub excesses: Vec<ExcessRecord>,
    pub source: String,
}

// ==========================================
// DatasetLoader - 数据集加载器
// ==========================================
pub struct DatasetLoader<P = UniversalFileParser, M = FieldMapper>
where
    P: FileParser,
    M: RecordMapper,
{
    parser: P,
    mapper: M,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, M> DatasetLoader<P, M>
where
    P: FileParser,
    M: RecordMapper,
{
    pub fn with_parts(parser: P, mapper: M) -> Self {
        Self { parser, mapper }
    }

    /// 从工作簿加载（Shortages / Excesses 两张表）
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_workbook<T: AsRef<Path>>(&self, path: T) -> ImportResult<AllocationDataset> {
        let path = path.as_ref();
        let shortage_rows = self.parser.parse_sheet(path, SHORTAGES_SHEET)?;
        let excess_rows = self.parser.parse_sheet(path, EXCESSES_SHEET)?;

        let dataset = AllocationDataset {
            shortages: self.map_shortages(&shortage_rows)?,
            excesses: self.map_excesses(&excess_rows)?,
            source: path.display().to_string(),
        };
        info!(
            shortages = dataset.shortages.len(),
            excesses = dataset.excesses.len(),
            "工作簿加载完成"
        );
        Ok(dataset)
    }

    /// 从一对 CSV 文件加载
    #[instrument(skip(self, shortages_path, excesses_path))]
    pub fn load_csv_pair<S: AsRef<Path>, E: AsRef<Path>>(
        &self,
        shortages_path: S,
        excesses_path: E,
    ) -> ImportResult<AllocationDataset> {
        let shortages_path = shortages_path.as_ref();
        let excesses_path = excesses_path.as_ref();

        let shortage_rows = CsvParser.parse_sheet(shortages_path, SHORTAGES_SHEET)?;
        let excess_rows = CsvParser.parse_sheet(excesses_path, EXCESSES_SHEET)?;

        let dataset = AllocationDataset {
            shortages: self.map_shortages(&shortage_rows)?,
            excesses: self.map_excesses(&excess_rows)?,
            source: format!("{} + {}", shortages_path.display(), excesses_path.display()),
        };
        info!(
            shortages = dataset.shortages.len(),
            excesses = dataset.excesses.len(),
            "CSV 加载完成"
        );
        Ok(dataset)
    }

    // 行号: 数据行序号 (1-based，不含表头)
    fn map_shortages(&self, rows: &[RawRow]) -> ImportResult<Vec<ShortageRecord>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_shortage(row, idx + 1))
            .collect()
    }

    fn map_excesses(&self, rows: &[RawRow]) -> ImportResult<Vec<ExcessRecord>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_excess(row, idx + 1))
            .collect()
    }
}
