//! プロンプト生成モジュール
//!
//! - build_summary_request: 売上ランキングからお店の方向性を要約させる
//! - build_menu_request: 新メニュー3品を提案させる（方向性ベース / 食材ベース共通）

use crate::error::{Error, Result};
use crate::ranking::{RankingSet, OVERALL_PROMPT_TOP_N, SLOT_PROMPT_TOP_N};
use crate::types::{ChatMessage, CompletionRequest, ResponseFormat};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// 要約用のシステムメッセージ
pub const SUMMARY_SYSTEM_PROMPT: &str =
    "あなたは飲食店の売上分析とレシピ開発を専門とするプロのAIシェフです。";

/// メニュー提案用のシステムメッセージ
pub const MENU_SYSTEM_PROMPT: &str =
    "あなたは業務用レシピ提案のプロAIシェフです。与えられた店舗条件に合わせ、季節・価格・エリアも考慮して日本語で提案してください。";

/// 除外リストの初期値
pub const DEFAULT_EXCLUSIONS: &str = "牛たん,麦飯,とろろ,テールスープ,牛たん丼";

/// お店カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreCategory {
    Italian,
    Japanese,
    Chinese,
    French,
    Izakaya,
    Kushiyaki,
    #[default]
    Other,
}

impl StoreCategory {
    pub const ALL: [StoreCategory; 7] = [
        StoreCategory::Italian,
        StoreCategory::Japanese,
        StoreCategory::Chinese,
        StoreCategory::French,
        StoreCategory::Izakaya,
        StoreCategory::Kushiyaki,
        StoreCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StoreCategory::Italian => "イタリアン",
            StoreCategory::Japanese => "和食",
            StoreCategory::Chinese => "中華",
            StoreCategory::French => "フレンチ",
            StoreCategory::Izakaya => "居酒屋",
            StoreCategory::Kushiyaki => "串焼き（牛タン）",
            StoreCategory::Other => "その他",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            StoreCategory::Italian => "italian",
            StoreCategory::Japanese => "japanese",
            StoreCategory::Chinese => "chinese",
            StoreCategory::French => "french",
            StoreCategory::Izakaya => "izakaya",
            StoreCategory::Kushiyaki => "kushiyaki",
            StoreCategory::Other => "other",
        }
    }
}

impl FromStr for StoreCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        let lower = key.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == key || c.alias() == lower)
            .or(match key {
                "串焼き" | "牛タン" => Some(StoreCategory::Kushiyaki),
                _ => None,
            })
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for StoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 新メニュー提案で除外する食材・既存商品
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    items: Vec<String>,
}

impl ExclusionList {
    /// カンマ区切りの入力を分解（空白は除去、空要素は無視）
    pub fn parse(input: &str) -> Self {
        let compact: String = input
            .chars()
            .filter(|c| *c != ' ' && *c != '\u{3000}')
            .collect();
        let items = compact
            .split(',')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ExclusionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            f.write_str("なし")
        } else {
            f.write_str(&self.items.join("、"))
        }
    }
}

/// お店の基本情報
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreProfile {
    pub category: StoreCategory,
    pub area: String,
}

/// 提案の前提となる情報
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalContext {
    /// AI要約で得たお店の方向性
    Direction { summary: String },
    /// 手持ちの食材から考える
    Ingredients {
        ingredients: String,
        average_price: u32,
        date: NaiveDate,
    },
}

/// 新メニュー提案リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct MenuProposalRequest {
    pub store: StoreProfile,
    pub context: ProposalContext,
    pub exclusions: ExclusionList,
    pub alcohol_pairing: Option<String>,
}

/// 要約リクエストを生成
///
/// ランチ・ディナーは上位10件、全体は上位20件をテキスト表で渡す
pub fn build_summary_request(rankings: &RankingSet, model: &str) -> CompletionRequest {
    let lunch = rankings.lunch.top(SLOT_PROMPT_TOP_N).to_prompt_text();
    let dinner = rankings.dinner.top(SLOT_PROMPT_TOP_N).to_prompt_text();
    let overall = rankings.overall.top(OVERALL_PROMPT_TOP_N).to_prompt_text();

    let user = format!(
        r#"以下の売上ランキングをもとに、Markdownの番号付きリストで次の観点ごとに現場目線の分析コメントをまとめてください。

1. 主力商品・カテゴリ：売上の柱になっている分類やメニュー
2. 時間帯ごとの傾向：ランチとディナーで売れ筋や客層に違いはあるか
3. 副菜・おつまみ・デザート：サイドメニューや甘味の強みと人気の理由
4. 利用シーン・顧客層：飲み中心か食事中心か、一人客かグループか
5. 総合評価と戦略アドバイス：お店の強み、今後の方向性、課題

お酒の売れ筋についても必ず触れてください。

【ランチランキング】
{lunch}

【ディナーランキング】
{dinner}

【全体傾向（参考）】
{overall}
"#
    );

    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ],
        response_format: Some(ResponseFormat::Text),
    }
}

/// 新メニュー提案リクエストを生成
pub fn build_menu_request(request: &MenuProposalRequest, model: &str) -> CompletionRequest {
    let store = &request.store;

    let (premise, response_format) = match &request.context {
        ProposalContext::Direction { summary } => (
            format!("【お店の方向性・指針】\n{summary}"),
            None,
        ),
        ProposalContext::Ingredients { ingredients, average_price, date } => (
            format!(
                "【使用する食材】{ingredients}\n【平均メニュー価格】{average_price}円\n【日付（季節性）】{}",
                date.format("%Y/%m/%d")
            ),
            Some(ResponseFormat::Text),
        ),
    };

    let pairing = match request.alcohol_pairing.as_deref() {
        Some(p) => format!(
            "\n【お酒ペアリング】{p}\n各メニューにこのお酒とのペアリング提案を添えてください。"
        ),
        None => String::new(),
    };

    let user = format!(
        r#"下記のお店の条件にぴったり合う「新しい売れ筋メニュー」を必ず3品、実務レベルで考案してください。
次の食材・既存商品は提案に使わないでください。
【除外リスト】{exclusions}

{premise}
【お店カテゴリ】{category}
【エリア】{area}{pairing}

各メニューには以下を必ず含めてください：
- 料理名
- 説明（特徴やおすすめポイント）
- 材料と分量
- 調理方法（3〜5ステップ）
- 1人前の原価計算
- 販売価格の目安（原価率30%想定）
- 参考にしたWebページのURL（公式サイトやレシピサイト等、あれば）

出力はMarkdown形式で。必ず3品、独自性があり現場に刺さる提案を重視してください。
"#,
        exclusions = request.exclusions,
        category = store.category,
        area = store.area,
    );

    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(MENU_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ],
        response_format,
    }
}
