//! OpenAI互換 chat completions クライアント

use super::CompletionClient;
use crate::config::Config;
use crate::error::{Result, SalesAiError};
use async_trait::async_trait;
use sales_ai_common::CompletionRequest;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout_seconds: u64,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| SalesAiError::Config(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_seconds,
        })
    }

    /// 設定からクライアントを作る（APIキー未設定ならエラー）
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Self::new(config.base_url.clone(), api_key, config.timeout_seconds)
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    fn map_transport_error(&self, error: reqwest::Error) -> SalesAiError {
        if error.is_timeout() {
            SalesAiError::Timeout(self.timeout_seconds)
        } else {
            SalesAiError::ApiCall(error.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = self.completions_url();

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion failed");

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(SalesAiError::ApiAuth(format!("HTTP {}: {}", status, body)));
            }
            return Err(SalesAiError::ApiCall(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| SalesAiError::ApiParse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(SalesAiError::EmptyCompletion)?;

        tracing::debug!(chars = text.chars().count(), "chat completion received");
        Ok(text)
    }
}
