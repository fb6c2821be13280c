//! 売上データ読み込みからAI呼び出しまでの処理
//!
//! - SalesReport: Excel読み込み + ランキング集計
//! - request_summary: お店の方向性の要約
//! - request_menu_proposal: 新メニュー3品の提案

use crate::completion::CompletionClient;
use crate::error::Result;
use crate::ingest;
use sales_ai_common::{build_menu_request, build_summary_request, MenuProposalRequest, RankingSet, TransactionRecord};
use std::path::Path;

/// 読み込んだ会計データと集計結果
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub records: Vec<TransactionRecord>,
    pub rankings: RankingSet,
}

impl SalesReport {
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        let rankings = RankingSet::from_records(&records);
        Self { records, rankings }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let records = ingest::load_transactions(path)?;
        Ok(Self::from_records(records))
    }
}

/// ランキングからお店の方向性を要約させる
pub async fn request_summary<C>(client: &C, model: &str, rankings: &RankingSet) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let request = build_summary_request(rankings, model);
    tracing::info!(model, "requesting store direction summary");
    client.complete(&request).await
}

/// 新メニュー3品を提案させる
pub async fn request_menu_proposal<C>(
    client: &C,
    model: &str,
    proposal: &MenuProposalRequest,
) -> Result<String>
where
    C: CompletionClient + ?Sized,
{
    let request = build_menu_request(proposal, model);
    tracing::info!(model, category = %proposal.store.category, "requesting menu proposal");
    client.complete(&request).await
}
