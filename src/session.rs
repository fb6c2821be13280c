//! 対話セッション
//!
//! セッション中に保持する状態は直近のAI要約だけ。要約は成功時のみ上書きし、
//! 失敗しても前回の要約は残る。新メニュー提案には保持中の要約を明示的に渡す。

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::{Result, SalesAiError};
use crate::pipeline::{self, SalesReport};
use crate::report;
use dialoguer::Select;
use sales_ai_common::{ExclusionList, MenuProposalRequest, ProposalContext, StoreProfile};

pub struct SessionContext {
    pub report: SalesReport,
    pub store: StoreProfile,
    pub exclusions: ExclusionList,
    summary: Option<String>,
}

impl SessionContext {
    pub fn new(report: SalesReport, store: StoreProfile, exclusions: ExclusionList) -> Self {
        Self {
            report,
            store,
            exclusions,
            summary: None,
        }
    }

    /// 直近のAI要約
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// 方向性を要約し、成功したら保持中の要約を置き換える
    pub async fn summarize<C>(&mut self, client: &C, model: &str) -> Result<String>
    where
        C: CompletionClient + ?Sized,
    {
        let text = pipeline::request_summary(client, model, &self.report.rankings).await?;
        self.summary = Some(text.clone());
        Ok(text)
    }

    /// 要約を前提にした新メニュー提案リクエスト
    pub fn proposal_request(&self, summary: &str) -> MenuProposalRequest {
        MenuProposalRequest {
            store: self.store.clone(),
            context: ProposalContext::Direction {
                summary: summary.to_string(),
            },
            exclusions: self.exclusions.clone(),
            alcohol_pairing: None,
        }
    }

    /// 保持中の要約で新メニューを提案
    pub async fn propose_menu<C>(&self, client: &C, model: &str) -> Result<String>
    where
        C: CompletionClient + ?Sized,
    {
        let summary = self.summary().ok_or(SalesAiError::SummaryNotGenerated)?;
        let request = self.proposal_request(summary);
        pipeline::request_menu_proposal(client, model, &request).await
    }
}

/// メニューの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Summarize,
    ProposeMenu,
    ShowRankings,
    Quit,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::Summarize => "AIでお店の方向性を要約する",
            SessionAction::ProposeMenu => "この方向性で新メニューAI提案を出す",
            SessionAction::ShowRankings => "ランキングを再表示",
            SessionAction::Quit => "終了",
        }
    }
}

/// 選択できる操作（要約済みのときだけ新メニュー提案を出す）
pub fn available_actions(has_summary: bool) -> Vec<SessionAction> {
    let mut actions = vec![SessionAction::Summarize];
    if has_summary {
        actions.push(SessionAction::ProposeMenu);
    }
    actions.push(SessionAction::ShowRankings);
    actions.push(SessionAction::Quit);
    actions
}

/// 対話ループ。AI呼び出しの失敗はその操作だけを中断して表示する
pub async fn run_interactive<C>(ctx: &mut SessionContext, client: &C, config: &Config) -> Result<()>
where
    C: CompletionClient + ?Sized,
{
    loop {
        let actions = available_actions(ctx.summary().is_some());
        let labels: Vec<&str> = actions.iter().map(SessionAction::label).collect();

        let selected = Select::new()
            .with_prompt("操作を選んでください")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| SalesAiError::CliExecution(e.to_string()))?;

        match actions[selected] {
            SessionAction::Summarize => {
                let result = report::with_spinner(
                    "AIが売上傾向を要約中...",
                    ctx.summarize(client, &config.summary_model),
                )
                .await;
                match result {
                    Ok(text) => report::print_ai_text("🧭 お店のメニュー方向性・現場指針（AI要約）", &text),
                    Err(e) => print_action_error(&e, ctx.summary().is_some()),
                }
            }
            SessionAction::ProposeMenu => {
                let result = report::with_spinner(
                    "AIが新メニューを考案中...",
                    ctx.propose_menu(client, &config.proposal_model),
                )
                .await;
                match result {
                    Ok(text) => report::print_ai_text("🍳 このお店に最適な新メニューAI提案（3品）", &text),
                    Err(e) => print_action_error(&e, ctx.summary().is_some()),
                }
            }
            SessionAction::ShowRankings => report::print_rankings(&ctx.report.rankings),
            SessionAction::Quit => {
                println!("セッションを終了します");
                return Ok(());
            }
        }
    }
}

fn print_action_error(error: &SalesAiError, has_summary: bool) {
    tracing::warn!(error = %error, "session action failed");
    println!("{}\n", action_error_message(error, has_summary));
}

/// 操作失敗時の表示。API呼び出しの失敗では保持中の要約が残ることも伝える
fn action_error_message(error: &SalesAiError, has_summary: bool) -> String {
    let mut message = report::format_error(error);
    if has_summary && error.is_remote() {
        message.push_str("\n  （前回の要約は保持されています）");
    }
    message
}
