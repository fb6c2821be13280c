use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。環境変数 OPENAI_API_KEY か `sales-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力ファイルの形式が不正です: {0}")]
    InputFormat(String),

    #[error("必須列がありません: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Excel読み込みエラー: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("API認証エラー: {0}")]
    ApiAuth(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("APIから回答が返りませんでした")]
    EmptyCompletion,

    #[error("APIがタイムアウトしました（{0}秒）")]
    Timeout(u64),

    #[error("先に「AIでお店の方向性を要約する」を実行してください")]
    SummaryNotGenerated,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] sales_ai_common::Error),
}

impl SalesAiError {
    /// AI補完APIの呼び出しに起因するエラーか
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SalesAiError::MissingApiKey
                | SalesAiError::ApiCall(_)
                | SalesAiError::ApiAuth(_)
                | SalesAiError::ApiParse(_)
                | SalesAiError::EmptyCompletion
                | SalesAiError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SalesAiError>;
