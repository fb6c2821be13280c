use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sales_ai_common::{StoreCategory, DEFAULT_EXCLUSIONS};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sales-ai")]
#[command(about = "売上ランキング抽出AI for 飲食店", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelを読み込み、時間帯別・全体の売上ランキングを表示
    Ranking {
        /// POSデータのExcelファイル（.xlsx）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// ランキングを表示し、AIでお店の方向性を要約
    Summary {
        /// POSデータのExcelファイル（.xlsx）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 要約テキストをもとに新メニューを3品提案
    Propose {
        /// AI要約のテキストファイル
        #[arg(short, long)]
        summary_file: PathBuf,

        #[command(flatten)]
        store: StoreArgs,

        /// 除外したい食材・既存商品（カンマ区切り）
        #[arg(short, long, default_value = DEFAULT_EXCLUSIONS)]
        exclude: String,
    },

    /// 対話モード（ランキング → AI要約 → 新メニュー提案）
    Session {
        /// POSデータのExcelファイル（.xlsx）
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        store: StoreArgs,

        /// 除外したい食材・既存商品（カンマ区切り）
        #[arg(short, long, default_value = DEFAULT_EXCLUSIONS)]
        exclude: String,
    },

    /// 食材と店舗条件からレシピを3品提案
    Recipe {
        /// 食材名・量・価格（例: "トマト2個150円, 太刀魚1尾800円"）
        #[arg(short, long)]
        ingredients: String,

        #[command(flatten)]
        store: StoreArgs,

        /// 平均メニュー価格（円）
        #[arg(long, default_value = "1200")]
        avg_price: u32,

        /// お酒ペアリング
        #[arg(long)]
        alcohol: Option<String>,

        /// 日付（YYYY-MM-DD、省略時は今日）
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// 除外したい食材（カンマ区切り）
        #[arg(short, long, default_value = "")]
        exclude: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// 設定ファイル（APIキー・モデル名）を使うコマンドか
    pub fn requires_config(&self) -> bool {
        !matches!(self, Commands::Ranking { .. })
    }
}

/// お店の情報
#[derive(clap::Args, Clone, Debug)]
pub struct StoreArgs {
    /// お店カテゴリ（イタリアン/和食/中華/フレンチ/居酒屋/串焼き（牛タン）/その他）
    #[arg(short, long, default_value = "その他", value_parser = parse_category)]
    pub category: StoreCategory,

    /// お店のエリア（例: 渋谷、仙台駅前）
    #[arg(short, long, default_value = "")]
    pub area: String,
}

fn parse_category(s: &str) -> Result<StoreCategory, String> {
    s.parse::<StoreCategory>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .map_err(|_| format!("Invalid date: {}. Use YYYY-MM-DD", s))
}
