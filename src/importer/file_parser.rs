// ==========================================
// 库存调拨平衡系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls, 按工作表名读取) / CSV (.csv)
// 约定: 第一行为表头，单元格去首尾空白，全空白行跳过
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawRow};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path, _sheet: &str) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 列出工作簿中的工作表名
    pub fn sheet_names(&self, file_path: &Path) -> ImportResult<Vec<String>> {
        ensure_exists(file_path)?;
        let workbook = open_workbook_auto(file_path)?;
        Ok(workbook.sheet_names().to_vec())
    }
}

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path, sheet: &str) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(ImportError::SheetNotFound(sheet.to_string()));
        }

        let range = workbook.worksheet_range(sheet)?;

        // 表头（第一行）；空工作表视为无数据
        let mut rows = range.rows();
        let header_row = match rows.next() {
            Some(row) => row,
            None => return Ok(Vec::new()),
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path, sheet: &str) -> ImportResult<Vec<RawRow>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_sheet(file_path, sheet),
            "xlsx" | "xls" => ExcelParser.parse_sheet(file_path, sheet),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
