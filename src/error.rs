use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryCliError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`vision-query config --set-api-key YOUR_KEY` で設定するか GOOGLE_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("問い合わせ失敗: {0}")]
    Query(#[from] vision_query_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QueryCliError>;
