//! AI補完API連携
//!
//! 失敗時はリトライもフォールバックもせず、そのままエラーを返す。

mod openai;

pub use openai::OpenAiClient;

use crate::error::Result;
use async_trait::async_trait;
use sales_ai_common::CompletionRequest;

/// テキスト補完サービス
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// リクエストを送り、返ってきたテキストをそのまま返す
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
