// ==========================================
// 库存调拨平衡系统 - 输入校验
// ==========================================
// 职责: 分配前校验记录完整性（仓库号非空、数值有限）
// 红线: 不校验负数（由导入层保证非负）
// ==========================================

use crate::domain::{ExcessRecord, ShortageRecord};
use crate::engine::error::{EngineError, EngineResult, RecordKind};

pub struct InputValidator;

impl InputValidator {
    /// 校验缺货与富余记录，遇到第一条无效记录即返回错误
    pub fn validate(shortages: &[ShortageRecord], excesses: &[ExcessRecord]) -> EngineResult<()> {
        for shortage in shortages {
            Self::check_code(RecordKind::Shortage, shortage.row_number, &shortage.warehouse_code)?;
            Self::check_finite(
                RecordKind::Shortage,
                shortage.row_number,
                "quantity_needed",
                shortage.quantity_needed,
            )?;
        }

        for excess in excesses {
            Self::check_code(RecordKind::Excess, excess.row_number, &excess.warehouse_code)?;
            Self::check_finite(
                RecordKind::Excess,
                excess.row_number,
                "excess_quantity",
                excess.excess_quantity,
            )?;
            Self::check_finite(RecordKind::Excess, excess.row_number, "usage_rate", excess.usage_rate)?;
        }

        Ok(())
    }

    fn check_code(kind: RecordKind, row: usize, code: &str) -> EngineResult<()> {
        if code.trim().is_empty() {
            return Err(EngineError::InvalidRecord {
                kind,
                row,
                field: "warehouse_code".to_string(),
                message: "仓库号为空".to_string(),
            });
        }
        Ok(())
    }

    fn check_finite(kind: RecordKind, row: usize, field: &str, value: f64) -> EngineResult<()> {
        if !value.is_finite() {
            return Err(EngineError::InvalidRecord {
                kind,
                row,
                field: field.to_string(),
                message: format!("数值无效: {}", value),
            });
        }
        Ok(())
    }
}
