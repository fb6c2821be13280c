//! Excel読み込みの統合テスト
//!
//! rust_xlsxwriter でテスト用のPOSデータを生成し、読み込み〜集計を確認する

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sales_ai_common::{RankingEntry, TimeSlot, Timestamp};
use sales_ai_rust::error::SalesAiError;
use sales_ai_rust::ingest::load_transactions;
use sales_ai_rust::pipeline::SalesReport;
use std::path::Path;
use tempfile::tempdir;

const HEADER: [&str; 4] = ["会計日時", "分類名称", "メニュー名称", "販売金額(税込)"];

/// 会計日時セルの書き方
enum Cell<'a> {
    Date(&'a str),
    Text(&'a str),
    Empty,
}

fn write_workbook(path: &Path, header: &[&str], rows: &[(Cell, &str, &str, f64)]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }

    for (i, (timestamp, category, item, amount)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        match timestamp {
            Cell::Date(raw) => {
                let dt = ExcelDateTime::parse_from_str(raw).unwrap();
                worksheet.write_datetime_with_format(row, 0, &dt, &date_format).unwrap();
            }
            Cell::Text(raw) => {
                worksheet.write_string(row, 0, *raw).unwrap();
            }
            Cell::Empty => {}
        }
        worksheet.write_string(row, 1, *category).unwrap();
        worksheet.write_string(row, 2, *item).unwrap();
        worksheet.write_number(row, 3, *amount).unwrap();
    }

    workbook.save(path).unwrap();
}

fn entry(category: &str, item: &str, amount: f64) -> RankingEntry {
    RankingEntry {
        category: category.to_string(),
        item_name: item.to_string(),
        amount,
    }
}

#[test]
fn test_load_date_cells_and_rank() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pos.xlsx");
    write_workbook(
        &path,
        &HEADER,
        &[
            (Cell::Date("2025-06-01 12:10:00"), "Drinks", "Beer", 500.0),
            (Cell::Date("2025-06-01 19:30:00"), "Drinks", "Beer", 300.0),
            (Cell::Date("2025-06-01 12:45:00"), "Food", "Ramen", 900.0),
        ],
    );

    let records = load_transactions(&path).expect("読み込み失敗");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].time_slot(), TimeSlot::Lunch);
    assert_eq!(records[1].time_slot(), TimeSlot::Dinner);

    let report = SalesReport::from_records(records);
    assert_eq!(
        report.rankings.lunch.entries(),
        &[entry("Drinks", "Beer", 500.0), entry("Food", "Ramen", 900.0)]
    );
    assert_eq!(report.rankings.dinner.entries(), &[entry("Drinks", "Beer", 300.0)]);
    assert_eq!(
        report.rankings.overall.entries(),
        &[entry("Drinks", "Beer", 800.0), entry("Food", "Ramen", 900.0)]
    );
}

#[test]
fn test_text_and_unreadable_timestamps() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pos.xlsx");
    write_workbook(
        &path,
        &HEADER,
        &[
            (Cell::Text("2025/06/01 11:00"), "定食", "牛たん定食", 1980.0),
            (Cell::Text("日時不明"), "定食", "牛たん定食", 1980.0),
            (Cell::Empty, "一品", "とろろ", 300.0),
            (Cell::Text("2025/06/01 15:00"), "一品", "とろろ", 300.0),
        ],
    );

    let report = SalesReport::load(&path).expect("読み込み失敗");
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.records[1].timestamp, Timestamp::Invalid("日時不明".to_string()));
    assert_eq!(report.records[2].timestamp, Timestamp::Missing);

    assert_eq!(report.rankings.lunch.entries(), &[entry("定食", "牛たん定食", 1980.0)]);
    assert!(report.rankings.dinner.is_empty());
    assert_eq!(
        report.rankings.overall.entries(),
        &[entry("一品", "とろろ", 600.0), entry("定食", "牛たん定食", 3960.0)]
    );
}

#[test]
fn test_header_only() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.xlsx");
    write_workbook(&path, &HEADER, &[]);

    let report = SalesReport::load(&path).expect("読み込み失敗");
    assert!(report.records.is_empty());
    assert!(report.rankings.overall.is_empty());
}

#[test]
fn test_missing_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pos.xlsx");
    write_workbook(&path, &["会計日時", "分類", "メニュー名称", "販売金額(税込)"], &[]);

    let err = load_transactions(&path).unwrap_err();
    match err {
        SalesAiError::MissingColumns(missing) => assert_eq!(missing, vec!["分類名称".to_string()]),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_non_numeric_amount() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pos.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, name) in HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    worksheet.write_string(1, 0, "2025/06/01 12:00").unwrap();
    worksheet.write_string(1, 1, "ドリンク").unwrap();
    worksheet.write_string(1, 2, "生ビール").unwrap();
    worksheet.write_string(1, 3, "無料").unwrap();
    workbook.save(&path).unwrap();

    let err = load_transactions(&path).unwrap_err();
    assert!(matches!(err, SalesAiError::InputFormat(_)));
    assert!(err.to_string().contains("2行目"));
}

#[test]
fn test_nonexistent_file() {
    let err = load_transactions(Path::new("/nonexistent/pos-12345.xlsx")).unwrap_err();
    assert!(matches!(err, SalesAiError::FileNotFound(_)));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("pos.csv");
    std::fs::write(&path, "会計日時,分類名称,メニュー名称,販売金額(税込)\n").unwrap();

    let err = load_transactions(&path).unwrap_err();
    assert!(matches!(err, SalesAiError::InputFormat(_)));
}

#[test]
fn test_broken_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    let err = load_transactions(&path).unwrap_err();
    assert!(matches!(err, SalesAiError::Spreadsheet(_)));
}
