// ==========================================
// 示例数据生成器
// ==========================================
// 用途: 生成可直接运行的示例工作簿与 CSV 文件对
// 输出: sample.xlsx (Shortages / Excesses 两张表)
//       sample_shortages.csv / sample_excesses.csv
// 用法: generate_sample_data [输出目录]（默认当前目录）
// ==========================================

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::{Path, PathBuf};

const SHORTAGE_HEADER: &[&str] = &["Client Warehouse code", "Part ID", "Supply new needed"];
const EXCESS_HEADER: &[&str] = &[
    "Client Warehouse code",
    "Part ID",
    "Location Type",
    "EXCESS",
    "Avg Usage + Usage via dependents",
];

// (仓库, 零件, 需求量)
const SHORTAGES: &[(&str, &str, f64)] = &[
    ("WH-NORTH", "P-1001", 120.0),
    ("WH-SOUTH", "P-1001", 45.0),
    ("WH-EAST", "P-1001", 80.0),
    ("WH-NORTH", "P-2002", 30.0),
    ("WH-WEST", "P-2002", 12.5),
    ("WH-EAST", "P-3003", 60.0),
];

// (仓库, 零件, 库位类型, 富余量, 月均用量)
const EXCESSES: &[(&str, &str, &str, f64, f64)] = &[
    ("DC-CENTRAL", "P-1001", "MAIN", 150.0, 5.0),
    ("DC-COAST", "P-1001", "MAIN", 60.0, 0.0),
    ("DC-HILL", "P-1001", "OTHER", 500.0, 1.0),
    ("DC-CENTRAL", "P-2002", "MAIN", 25.0, 2.5),
    ("DC-COAST", "P-2002", "MAIN", 40.0, 8.0),
    ("DC-HILL", "P-3003", "MAIN", 20.0, 4.0),
];

fn write_workbook(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Shortages")?;
    for (col, header) in SHORTAGE_HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (idx, (warehouse, part, need)) in SHORTAGES.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *warehouse)?;
        sheet.write_string(row, 1, *part)?;
        sheet.write_number(row, 2, *need)?;
    }

    let sheet = workbook.add_worksheet().set_name("Excesses")?;
    for (col, header) in EXCESS_HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (idx, (warehouse, part, location, excess, usage)) in EXCESSES.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *warehouse)?;
        sheet.write_string(row, 1, *part)?;
        sheet.write_string(row, 2, *location)?;
        sheet.write_number(row, 3, *excess)?;
        sheet.write_number(row, 4, *usage)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv_pair(dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(dir.join("sample_shortages.csv"))?;
    writer.write_record(SHORTAGE_HEADER)?;
    for (warehouse, part, need) in SHORTAGES {
        writer.write_record([warehouse.to_string(), part.to_string(), need.to_string()])?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(dir.join("sample_excesses.csv"))?;
    writer.write_record(EXCESS_HEADER)?;
    for (warehouse, part, location, excess, usage) in EXCESSES {
        writer.write_record([
            warehouse.to_string(),
            part.to_string(),
            location.to_string(),
            excess.to_string(),
            usage.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    let workbook_path = dir.join("sample.xlsx");
    write_workbook(&workbook_path)?;
    println!("✓ 已生成 {}", workbook_path.display());

    write_csv_pair(&dir)?;
    println!("✓ 已生成 sample_shortages.csv / sample_excesses.csv");

    Ok(())
}
