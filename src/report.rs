//! ターミナル表示（データプレビュー・ランキング表・AI回答）

use crate::error::SalesAiError;
use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use indicatif::ProgressBar;
use sales_ai_common::ranking::{format_amount, RANKING_COLUMNS};
use sales_ai_common::{Ranking, RankingSet, TimeSlot, TransactionRecord};
use std::future::Future;
use std::time::Duration;

pub const PREVIEW_ROWS: usize = 5;

/// 先頭数行のプレビュー（判定した時間帯つき）
pub fn preview_table(records: &[TransactionRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["会計日時", "分類名称", "メニュー名称", "販売金額(税込)", "時間帯"]);

    for record in records.iter().take(limit) {
        table.add_row([
            record.timestamp.to_string(),
            record.category.clone(),
            record.item_name.clone(),
            format_amount(record.amount),
            record.time_slot().to_string(),
        ]);
    }

    table
}

pub fn ranking_table(ranking: &Ranking) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(RANKING_COLUMNS);

    for entry in ranking {
        table.add_row([
            entry.category.clone(),
            entry.item_name.clone(),
            format_amount(entry.amount),
        ]);
    }

    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table
}

/// 時間帯別・全体ランキングの表示用テキスト
///
/// データのない時間帯は表の代わりにお知らせ行を出す
pub fn format_rankings(rankings: &RankingSet) -> String {
    let mut sections = Vec::new();

    for slot in TimeSlot::RANKED {
        let mut section = format!("## ⏰ {}タイム売上ランキング\n", slot);
        match rankings.for_slot(slot) {
            Some(ranking) if !ranking.is_empty() => {
                section.push_str(&ranking_table(ranking).to_string());
            }
            _ => section.push_str(&format!("ℹ {}タイムのデータはありません。", slot)),
        }
        sections.push(section);
    }

    let mut overall = String::from("## 🏆 分類別メニュー売上ランキング（全時間帯・合計金額順）\n");
    if rankings.overall.is_empty() {
        overall.push_str("ℹ 集計できるデータがありません。");
    } else {
        overall.push_str(&ranking_table(&rankings.overall).to_string());
    }
    sections.push(overall);

    sections.join("\n\n")
}

pub fn print_preview(records: &[TransactionRecord]) {
    println!("📋 読み込んだデータのプレビュー（{}件中 先頭{}件）", records.len(), records.len().min(PREVIEW_ROWS));
    println!("{}\n", preview_table(records, PREVIEW_ROWS));
}

pub fn print_rankings(rankings: &RankingSet) {
    println!("{}\n", format_rankings(rankings));
}

/// AIの回答を加工せずに表示
pub fn print_ai_text(title: &str, text: &str) {
    println!("### {}\n", title);
    println!("{}\n", text.trim_end());
}

/// 待ち時間中にスピナーを表示
/// エラーの表示文（Display形式）
pub fn format_error(error: &SalesAiError) -> String {
    format!("❌ {}", error)
}

pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let output = future.await;

    spinner.finish_and_clear();
    output
}
