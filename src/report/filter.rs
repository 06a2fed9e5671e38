// ==========================================
// 库存调拨平衡系统 - 报表搜索过滤
// ==========================================
// 规则: 任一单元格包含搜索词（不区分大小写）即保留该行
// ==========================================

/// 判断一行是否匹配搜索词
///
/// 空搜索词（或纯空白）匹配所有行
pub fn row_matches(row: &[String], query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.iter().any(|cell| cell.to_lowercase().contains(&needle))
}
