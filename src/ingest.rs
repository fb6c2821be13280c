//! POSデータ（Excel）読み込みモジュール
//!
//! 1枚目のシートの1行目をヘッダーとし、必須4列を TransactionRecord に変換する。
//! 会計日時が読み取れない行もエラーにせず残す（時間帯は「不明」扱い）。

use crate::error::{Result, SalesAiError};
use calamine::{open_workbook_auto, Data, Reader};
use sales_ai_common::{Timestamp, TransactionRecord};
use std::path::Path;

pub const COLUMN_TIMESTAMP: &str = "会計日時";
pub const COLUMN_CATEGORY: &str = "分類名称";
pub const COLUMN_ITEM: &str = "メニュー名称";
pub const COLUMN_AMOUNT: &str = "販売金額(税込)";

pub const REQUIRED_COLUMNS: [&str; 4] = [COLUMN_TIMESTAMP, COLUMN_CATEGORY, COLUMN_ITEM, COLUMN_AMOUNT];

const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx"];

/// 必須列の位置
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    timestamp: usize,
    category: usize,
    item: usize,
    amount: usize,
}

impl ColumnIndex {
    fn from_header(header: &[Data]) -> Result<Self> {
        let names: Vec<String> = header.iter().map(header_name).collect();
        let find = |column: &str| names.iter().position(|n| n == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SalesAiError::MissingColumns(missing));
        }

        Ok(Self {
            timestamp: find(COLUMN_TIMESTAMP).unwrap_or_default(),
            category: find(COLUMN_CATEGORY).unwrap_or_default(),
            item: find(COLUMN_ITEM).unwrap_or_default(),
            amount: find(COLUMN_AMOUNT).unwrap_or_default(),
        })
    }
}

/// Excelファイルから会計データを読み込む
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    if !path.exists() {
        return Err(SalesAiError::FileNotFound(path.display().to_string()));
    }

    let supported = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(SalesAiError::InputFormat(format!(
            "Excelファイル（.xlsx）のみ対応しています: {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SalesAiError::InputFormat("シートがありません".into()))??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| SalesAiError::InputFormat("シートが空です".into()))?;
    let columns = ColumnIndex::from_header(header)?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0) + 1;
    let mut records = Vec::new();

    for (offset, row) in rows.enumerate() {
        // Excel上の行番号（ヘッダーの次の行から）
        let row_number = first_row + offset + 1;
        if let Some(record) = parse_row(row, &columns, row_number)? {
            records.push(record);
        }
    }

    tracing::debug!(path = %path.display(), records = records.len(), "transactions loaded");
    Ok(records)
}

fn parse_row(row: &[Data], columns: &ColumnIndex, row_number: usize) -> Result<Option<TransactionRecord>> {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);

    let timestamp = cell(columns.timestamp);
    let category = cell(columns.category);
    let item = cell(columns.item);
    let amount = cell(columns.amount);

    if [timestamp, category, item, amount].iter().all(|c| is_blank(c)) {
        return Ok(None);
    }

    let timestamp = timestamp_from_cell(timestamp);
    if let Timestamp::Invalid(raw) = &timestamp {
        tracing::debug!(row = row_number, value = %raw, "unreadable timestamp");
    }

    Ok(Some(TransactionRecord {
        timestamp,
        category: text_from_cell(category),
        item_name: text_from_cell(item),
        amount: amount_from_cell(amount, row_number)?,
    }))
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// 会計日時セル。日付書式のセル・ISO文字列・テキストを受け付け、それ以外は読み取り不可
fn timestamp_from_cell(cell: &Data) -> Timestamp {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Timestamp::DateTime)
            .unwrap_or_else(|| Timestamp::Invalid(cell.to_string())),
        Data::DateTimeIso(s) | Data::String(s) => Timestamp::parse(s),
        Data::Empty => Timestamp::Missing,
        other => Timestamp::Invalid(other.to_string()),
    }
}

fn text_from_cell(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn amount_from_cell(cell: &Data, row_number: usize) -> Result<f64> {
    match cell {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::Empty => Ok(0.0),
        Data::String(s) if s.trim().is_empty() => Ok(0.0),
        Data::String(s) => s.trim().replace(',', "").parse::<f64>().map_err(|_| {
            SalesAiError::InputFormat(format!(
                "{}行目の{}が数値ではありません: {}",
                row_number, COLUMN_AMOUNT, s
            ))
        }),
        other => Err(SalesAiError::InputFormat(format!(
            "{}行目の{}が数値ではありません: {}",
            row_number, COLUMN_AMOUNT, other
        ))),
    }
}
