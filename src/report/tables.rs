// ==========================================
// 库存调拨平衡系统 - 报表表格
// ==========================================
// 四张表: Allocations / Unfulfilled Shortages / Transfers Made / Final Rolling Shortage
// 单元格统一渲染为字符串，供搜索、CSV 导出、文本输出共用
// ==========================================

use crate::domain::{format_quantity, CalculationMode, ShortageRecord};
use crate::engine::AllocationOutcome;
use crate::report::filter::row_matches;
use serde::{Deserialize, Serialize};

pub const ALLOCATIONS_TITLE: &str = "Allocations";
pub const UNFULFILLED_TITLE: &str = "Unfulfilled Shortages";
pub const TRANSFERS_TITLE: &str = "Transfers Made";
pub const FINAL_SHORTAGE_TITLE: &str = "Final Rolling Shortage";

/// 二维字符串表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按搜索词过滤行（空搜索词保留全部）
    pub fn filtered(&self, query: &str) -> ReportTable {
        ReportTable {
            title: self.title.clone(),
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row_matches(row, query))
                .cloned()
                .collect(),
        }
    }

    /// 取某列的全部值
    pub fn column(&self, header: &str) -> Vec<&str> {
        match self.headers.iter().position(|h| h == header) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|row| row.get(idx).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }
}

// ==========================================
// ReportTables - 一次分配的全部报表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTables {
    pub allocations: ReportTable,
    pub unfulfilled: ReportTable,
    pub transfers: ReportTable,
    pub final_shortages: ReportTable,
}

impl ReportTables {
    pub fn build(outcome: &AllocationOutcome) -> Self {
        let rolling = outcome.mode == CalculationMode::Rolling;

        let mut allocations =
            ReportTable::new(ALLOCATIONS_TITLE, &["From", "To", "Part ID", "Quantity"]);
        let mut transfers = ReportTable::new(TRANSFERS_TITLE, &["Transfer"]);
        for allocation in &outcome.allocations {
            allocations.push_row(vec![
                allocation.from_warehouse.clone(),
                allocation.to_warehouse.clone(),
                allocation.part_id.clone(),
                format_quantity(allocation.quantity),
            ]);
            transfers.push_row(vec![allocation.transfer_description()]);
        }

        let mut unfulfilled = ReportTable::new(UNFULFILLED_TITLE, &shortage_headers(rolling, false));
        for shortage in &outcome.unfulfilled {
            unfulfilled.push_row(shortage_cells(shortage, rolling));
        }

        let mut final_shortages =
            ReportTable::new(FINAL_SHORTAGE_TITLE, &shortage_headers(rolling, true));
        for shortage in &outcome.shortages {
            let mut cells = shortage_cells(shortage, rolling);
            cells.push(outcome.status_of(shortage).report_label().to_string());
            final_shortages.push_row(cells);
        }

        Self {
            allocations,
            unfulfilled,
            transfers,
            final_shortages,
        }
    }

    /// 输出顺序即页面/文件顺序
    pub fn all(&self) -> [&ReportTable; 4] {
        [
            &self.allocations,
            &self.unfulfilled,
            &self.transfers,
            &self.final_shortages,
        ]
    }

    pub fn filtered(&self, query: &str) -> Self {
        Self {
            allocations: self.allocations.filtered(query),
            unfulfilled: self.unfulfilled.filtered(query),
            transfers: self.transfers.filtered(query),
            final_shortages: self.final_shortages.filtered(query),
        }
    }
}

fn shortage_headers(rolling: bool, with_status: bool) -> Vec<&'static str> {
    let mut headers = vec!["Row", "Client Warehouse code", "Part ID", "Supply new needed"];
    if rolling {
        headers.push("Aggregate Needed");
        headers.push("Rolling Shortage");
    }
    if with_status {
        headers.push("Status");
    }
    headers
}

fn shortage_cells(shortage: &ShortageRecord, rolling: bool) -> Vec<String> {
    let mut cells = vec![
        shortage.row_number.to_string(),
        shortage.warehouse_code.clone(),
        shortage.part_id.clone().unwrap_or_default(),
        format_quantity(shortage.quantity_needed),
    ];
    if rolling {
        cells.push(optional_quantity(shortage.aggregate_quantity_needed));
        cells.push(optional_quantity(shortage.rolling_shortage));
    }
    cells
}

fn optional_quantity(value: Option<f64>) -> String {
    value.map(format_quantity).unwrap_or_default()
}
