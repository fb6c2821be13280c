use clap::Parser;
use sales_ai_common::{ExclusionList, MenuProposalRequest, ProposalContext, StoreProfile};
use sales_ai_rust::{cli, config, error, logging, pipeline, report, session};
use sales_ai_rust::completion::OpenAiClient;
use cli::{Cli, Commands, StoreArgs};
use config::Config;
use error::Result;
use pipeline::SalesReport;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}", report::format_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    // ランキング表示は設定ファイルを読まない
    let config = if command.requires_config() {
        Config::load()?
    } else {
        Config::default()
    };

    match command {
        Commands::Ranking { file } => {
            println!("📊 sales-ai - 売上ランキング\n");

            let sales = load_report(&file)?;
            report::print_rankings(&sales.rankings);
        }

        Commands::Summary { file } => {
            println!("🧭 sales-ai - AI要約\n");

            let client = OpenAiClient::from_config(&config)?;
            let sales = load_report(&file)?;
            report::print_rankings(&sales.rankings);

            let summary = report::with_spinner(
                "AIが売上傾向を要約中...",
                pipeline::request_summary(&client, &config.summary_model, &sales.rankings),
            )
            .await?;
            report::print_ai_text("🧭 お店のメニュー方向性・現場指針（AI要約）", &summary);
        }

        Commands::Propose { summary_file, store, exclude } => {
            println!("🍳 sales-ai - 新メニューAI提案\n");

            let client = OpenAiClient::from_config(&config)?;
            let summary = std::fs::read_to_string(&summary_file).map_err(|e| {
                error::SalesAiError::FileNotFound(format!("{} ({})", summary_file.display(), e))
            })?;

            let request = MenuProposalRequest {
                store: store_profile(&store),
                context: ProposalContext::Direction { summary },
                exclusions: ExclusionList::parse(&exclude),
                alcohol_pairing: None,
            };
            let proposal = report::with_spinner(
                "AIが新メニューを考案中...",
                pipeline::request_menu_proposal(&client, &config.proposal_model, &request),
            )
            .await?;
            report::print_ai_text("🍳 このお店に最適な新メニューAI提案（3品）", &proposal);
        }

        Commands::Session { file, store, exclude } => {
            println!("🍽 sales-ai - 売上ランキング抽出AI\n");

            let client = OpenAiClient::from_config(&config)?;
            let sales = load_report(&file)?;
            report::print_rankings(&sales.rankings);

            let mut ctx = session::SessionContext::new(
                sales,
                store_profile(&store),
                ExclusionList::parse(&exclude),
            );
            session::run_interactive(&mut ctx, &client, &config).await?;
        }

        Commands::Recipe { ingredients, store, avg_price, alcohol, date, exclude } => {
            println!("🍳 sales-ai - レシピ提案\n");

            let client = OpenAiClient::from_config(&config)?;
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

            let request = MenuProposalRequest {
                store: store_profile(&store),
                context: ProposalContext::Ingredients {
                    ingredients,
                    average_price: avg_price,
                    date,
                },
                exclusions: ExclusionList::parse(&exclude),
                alcohol_pairing: alcohol,
            };
            let recipes = report::with_spinner(
                "AIがレシピを検索中...",
                pipeline::request_menu_proposal(&client, &config.proposal_model, &request),
            )
            .await?;
            report::print_ai_text("🍳 おすすめ新メニュー（3品）", &recipes);
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.base_url);
                println!("  要約モデル: {}", config.summary_model);
                println!("  提案モデル: {}", config.proposal_model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn load_report(file: &std::path::Path) -> Result<SalesReport> {
    println!("[1/2] Excelを読み込み中...");
    let sales = SalesReport::load(file)?;
    println!("✔ {}件の会計データを読み込みました\n", sales.records.len());

    report::print_preview(&sales.records);
    println!("[2/2] ランキングを集計しました\n");
    Ok(sales)
}

fn store_profile(store: &StoreArgs) -> StoreProfile {
    StoreProfile {
        category: store.category,
        area: store.area.clone(),
    }
}
