// ==========================================
// 库存调拨平衡系统 - 文本报表渲染
// ==========================================
// 终端输出: 本地化章节标题 + 列对齐的纯文本表格
// ==========================================

use crate::domain::format_quantity;
use crate::engine::AllocationSummary;
use crate::i18n::{t, t_with_args};
use crate::report::tables::{
    ReportTable, ReportTables, ALLOCATIONS_TITLE, FINAL_SHORTAGE_TITLE, TRANSFERS_TITLE,
    UNFULFILLED_TITLE,
};
use std::fmt::Write;

/// 表标题 → 本地化章节名
fn section_title(table: &ReportTable) -> String {
    let key = match table.title.as_str() {
        ALLOCATIONS_TITLE => "report.section.allocations",
        UNFULFILLED_TITLE => "report.section.unfulfilled",
        TRANSFERS_TITLE => "report.section.transfers",
        FINAL_SHORTAGE_TITLE => "report.section.final_shortage",
        _ => return table.title.clone(),
    };
    t(key)
}

/// 渲染单张表（列宽按字符数对齐）
pub fn render_table(table: &ReportTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", section_title(table));

    if table.is_empty() {
        let _ = writeln!(out, "{}", t("report.no_records"));
        return out;
    }

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let _ = writeln!(out, "{}", format_line(&table.headers, &widths));
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", format_line(&separator, &widths));
    for row in &table.rows {
        let _ = writeln!(out, "{}", format_line(row, &widths));
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// 渲染汇总行
pub fn render_summary(summary: &AllocationSummary, mode: &str) -> String {
    let allocations = summary.allocation_count.to_string();
    let allocated = format_quantity(summary.total_allocated);
    let unfulfilled = summary.unfulfilled_rows.to_string();
    let excluded = summary.excluded_excess_rows.to_string();
    t_with_args(
        "report.summary",
        &[
            ("mode", mode),
            ("allocations", allocations.as_str()),
            ("allocated", allocated.as_str()),
            ("unfulfilled", unfulfilled.as_str()),
            ("excluded", excluded.as_str()),
        ],
    )
}

/// 渲染完整报表
pub fn render_report(tables: &ReportTables, summary: &AllocationSummary, mode: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_summary(summary, mode));
    for table in tables.all() {
        let _ = writeln!(out);
        out.push_str(&render_table(table));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, LOCALE_TEST_LOCK};

    #[test]
    fn test_render_table_aligns_columns() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let mut table = ReportTable::new(ALLOCATIONS_TITLE, &["From", "To", "Part ID", "Quantity"]);
        table.push_row(vec!["W3".into(), "W1".into(), "W1".into(), "80".into()]);
        let text = render_table(&table);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Allocations ==");
        assert_eq!(lines[1], "From | To | Part ID | Quantity");
        assert_eq!(lines[3], "W3   | W1 | W1      | 80");

        set_locale("zh-CN");
    }

    #[test]
    fn test_render_empty_table() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");

        let table = ReportTable::new(UNFULFILLED_TITLE, &["Row"]);
        let text = render_table(&table);
        assert!(text.contains("未满足缺货"));
        assert!(text.contains("无记录"));
    }
}
