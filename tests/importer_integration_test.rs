// ==========================================
// DatasetLoader 集成测试
// ==========================================
// 测试目标: 验证工作簿 / CSV 文件对到领域记录的完整导入流程
// ==========================================


use stock_rebalancer::importer::{DatasetLoader, ExcelParser, ImportError};
use stock_rebalancer::logging;
use test_helpers::{write_csv, write_standard_workbook, write_workbook, Cell};

#[test]
fn test_load_standard_workbook() {
    logging::init_test();
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_standard_workbook(temp_dir.path()).expect("Failed to write workbook");

    let dataset = DatasetLoader::new()
        .load_workbook(&path)
        .expect("Failed to load workbook");

    assert_eq!(dataset.shortages.len(), 2);
    assert_eq!(dataset.shortages[0].warehouse_code, "W1");
    assert_eq!(dataset.shortages[0].quantity_needed, 100.0);
    assert_eq!(dataset.shortages[0].part_id.as_deref(), Some("P-1"));
    assert_eq!(dataset.shortages[1].row_number, 2);

    assert_eq!(dataset.excesses.len(), 3);
    assert_eq!(dataset.excesses[0].usage_rate, 2.0);
    assert_eq!(dataset.excesses[2].location_type, "OTHER");
    assert_eq!(dataset.excesses[2].excess_quantity, 1000.0);
    assert!(dataset.source.ends_with("sample.xlsx"));
}

#[test]
fn test_workbook_sheet_names() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_standard_workbook(temp_dir.path()).expect("Failed to write workbook");

    let names = ExcelParser.sheet_names(&path).expect("Failed to list sheets");
    assert_eq!(names, vec!["Shortages".to_string(), "Excesses".to_string()]);
}

#[test]
fn test_workbook_missing_cell_reports_row_and_field() {
    use Cell::{Empty, Number, Text};

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken.xlsx");
    write_workbook(
        &path,
        &[vec![Text("W1"), Text("P-1"), Number(10.0)]],
        &[
            vec![Text("W2"), Text("P-1"), Text("MAIN"), Number(5.0), Number(1.0)],
            vec![Text("W3"), Text("P-1"), Text("MAIN"), Empty, Number(1.0)],
        ],
    )
    .expect("Failed to write workbook");

    let err = DatasetLoader::new().load_workbook(&path).unwrap_err();
    match err {
        ImportError::MissingField { row, field } => {
            assert_eq!(row, 2);
            assert_eq!(field, "EXCESS");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_workbook_negative_quantity_rejected() {
    use Cell::{Number, Text};

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("negative.xlsx");
    write_workbook(
        &path,
        &[vec![Text("W1"), Text("P-1"), Number(-3.0)]],
        &[],
    )
    .expect("Failed to write workbook");

    let err = DatasetLoader::new().load_workbook(&path).unwrap_err();
    assert!(matches!(err, ImportError::ValueRangeError { row: 1, .. }));
    assert!(err.to_string().contains("行 1"));
}

#[test]
fn test_workbook_with_headers_only_is_empty_dataset() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.xlsx");
    write_workbook(&path, &[], &[]).expect("Failed to write workbook");

    let dataset = DatasetLoader::new()
        .load_workbook(&path)
        .expect("Failed to load workbook");
    assert!(dataset.shortages.is_empty());
    assert!(dataset.excesses.is_empty());
}

#[test]
fn test_missing_file_and_unsupported_format() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = DatasetLoader::new()
        .load_workbook(temp_dir.path().join("absent.xlsx"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let txt = temp_dir.path().join("data.txt");
    std::fs::write(&txt, "hello").expect("Failed to write file");
    let err = DatasetLoader::new().load_workbook(&txt).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

#[test]
fn test_load_csv_pair_with_part_ids() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let shortages = write_csv(
        temp_dir.path(),
        "shortages.csv",
        &[
            "Client Warehouse code,Part ID,Supply new needed",
            "W1,P-1,100",
            "W1,P-2,12.5",
        ],
    )
    .expect("Failed to write csv");
    let excesses = write_csv(
        temp_dir.path(),
        "excesses.csv",
        &[
            "warehouse_code,part_id,location_type,excess_quantity,usage_rate",
            "W2,P-1,MAIN,40,2",
        ],
    )
    .expect("Failed to write csv");

    let dataset = DatasetLoader::new()
        .load_csv_pair(&shortages, &excesses)
        .expect("Failed to load csv pair");

    assert_eq!(dataset.shortages[1].part_id.as_deref(), Some("P-2"));
    assert_eq!(dataset.shortages[1].quantity_needed, 12.5);
    assert_eq!(dataset.excesses[0].warehouse_code, "W2");
    assert_eq!(dataset.excesses[0].priority_index, 0.0);
}

#[test]
fn test_csv_non_numeric_usage_rejected() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let shortages = write_csv(
        temp_dir.path(),
        "shortages.csv",
        &["Client Warehouse code,Supply new needed", "W1,10"],
    )
    .expect("Failed to write csv");
    let excesses = write_csv(
        temp_dir.path(),
        "excesses.csv",
        &[
            "Client Warehouse code,Location Type,EXCESS,Avg Usage + Usage via dependents",
            "W2,MAIN,40,fast",
        ],
    )
    .expect("Failed to write csv");

    let err = DatasetLoader::new()
        .load_csv_pair(&shortages, &excesses)
        .unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 1);
            assert_eq!(field, "Avg Usage + Usage via dependents");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
