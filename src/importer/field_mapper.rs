// ==========================================
// 库存调拨平衡系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 领域字段映射 + 类型转换 + 非负校验
// 列名: 工作簿原始列名，兼容 snake_case 别名
// ==========================================

use crate::domain::{ExcessRecord, ShortageRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{RawRow, RecordMapper};

// ===== 列名契约 =====
pub const COL_WAREHOUSE_CODE: &str = "Client Warehouse code";
pub const COL_QUANTITY_NEEDED: &str = "Supply new needed";
pub const COL_LOCATION_TYPE: &str = "Location Type";
pub const COL_EXCESS: &str = "EXCESS";
pub const COL_USAGE: &str = "Avg Usage + Usage via dependents";
pub const COL_PART_ID: &str = "Part ID";

pub struct FieldMapper;

impl RecordMapper for FieldMapper {
    fn map_shortage(&self, row: &RawRow, row_number: usize) -> ImportResult<ShortageRecord> {
        let warehouse_code = self.require_string(row, COL_WAREHOUSE_CODE, row_number)?;
        let quantity_needed = self.require_quantity(row, COL_QUANTITY_NEEDED, row_number)?;

        let mut record = ShortageRecord::new(warehouse_code, quantity_needed)
            .with_row_number(row_number);
        record.part_id = self.get_string(row, COL_PART_ID);
        Ok(record)
    }

    fn map_excess(&self, row: &RawRow, row_number: usize) -> ImportResult<ExcessRecord> {
        let warehouse_code = self.require_string(row, COL_WAREHOUSE_CODE, row_number)?;
        let location_type = self.require_string(row, COL_LOCATION_TYPE, row_number)?;
        let excess_quantity = self.require_quantity(row, COL_EXCESS, row_number)?;
        let usage_rate = self.require_quantity(row, COL_USAGE, row_number)?;

        let mut record = ExcessRecord::new(warehouse_code, location_type, excess_quantity, usage_rate)
            .with_row_number(row_number);
        record.part_id = self.get_string(row, COL_PART_ID);
        Ok(record)
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为缺失），支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            COL_WAREHOUSE_CODE => &[COL_WAREHOUSE_CODE, "warehouse_code"],
            COL_QUANTITY_NEEDED => &[COL_QUANTITY_NEEDED, "quantity_needed"],
            COL_LOCATION_TYPE => &[COL_LOCATION_TYPE, "location_type"],
            COL_EXCESS => &[COL_EXCESS, "excess_quantity"],
            COL_USAGE => &[COL_USAGE, "usage_rate"],
            COL_PART_ID => &[COL_PART_ID, "part_id"],
            _ => &[],
        };

        aliases
            .iter()
            .chain(std::iter::once(&key))
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require_string(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    /// 解析非负有限浮点数
    fn require_quantity(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<f64> {
        let value = self.require_string(row, key, row_number)?;
        let parsed = value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为数值: {}", value),
            })?;

        if parsed < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: key.to_string(),
                value: parsed,
            });
        }
        Ok(parsed)
    }
}
