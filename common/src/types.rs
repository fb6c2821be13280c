//! 売上データと補完リクエストの型定義
//!
//! - TransactionRecord: Excel 1行分の会計データ
//! - RankingEntry: (分類, メニュー) ごとの集計結果
//! - CompletionRequest: AI補完APIへ送るリクエスト

use crate::time_slot::{classify, TimeSlot, Timestamp};
use serde::Serialize;

/// 会計データ1行
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub timestamp: Timestamp,   // 会計日時
    pub category: String,       // 分類名称
    pub item_name: String,      // メニュー名称
    pub amount: f64,            // 販売金額(税込)
}

impl TransactionRecord {
    pub fn new(
        timestamp: Timestamp,
        category: impl Into<String>,
        item_name: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            timestamp,
            category: category.into(),
            item_name: item_name.into(),
            amount,
        }
    }

    /// 会計日時から判定した時間帯
    pub fn time_slot(&self) -> TimeSlot {
        classify(&self.timestamp)
    }
}

/// ランキング1行
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub category: String,
    pub item_name: String,
    pub amount: f64,
}

/// メッセージの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// 役割付きメッセージ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// レスポンス形式の指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
}

/// AI補完APIへのリクエスト（OpenAI chat completions 形式）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}
