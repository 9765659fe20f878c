//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 送信〜描画サイクルで起こる失敗は全てここに集約し、
/// [`Error::failure_report`] で画面表示用の3要素に変換する。
#[derive(Error, Debug)]
pub enum Error {
    /// 接続失敗など、レスポンス自体が得られなかった
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx以外のステータス
    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// 本文がJSONとして読めない
    #[error("Malformed JSON: {message}")]
    MalformedJson { message: String, body: String },

    /// JSONだが `results` が文字列配列でない
    #[error("Unexpected response shape: {detail}")]
    ResponseShape { detail: String, body: String },

    /// Vision APIレスポンスの整形失敗
    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// エラー表示に使う3要素（ステータス文言・例外内容・生レスポンス）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailureReport {
    pub status_text: String,
    pub error_thrown: String,
    pub body: String,
}

impl Error {
    /// 画面表示用の要素に分解
    pub fn failure_report(&self) -> FailureReport {
        match self {
            Error::Network(message) => FailureReport {
                status_text: "error".into(),
                error_thrown: message.clone(),
                body: String::new(),
            },
            Error::Status { status, status_text, body } => FailureReport {
                status_text: status_text.clone(),
                error_thrown: format!("HTTP {}", status),
                body: body.clone(),
            },
            Error::MalformedJson { message, body } => FailureReport {
                status_text: "parsererror".into(),
                error_thrown: format!("SyntaxError: {}", message),
                body: body.clone(),
            },
            Error::ResponseShape { detail, body } => FailureReport {
                status_text: "parsererror".into(),
                error_thrown: format!("ResponseShapeError: {}", detail),
                body: body.clone(),
            },
            Error::Annotation(message) => FailureReport {
                status_text: "error".into(),
                error_thrown: message.clone(),
                body: String::new(),
            },
            Error::Json(e) => FailureReport {
                status_text: "parsererror".into(),
                error_thrown: format!("SyntaxError: {}", e),
                body: String::new(),
            },
        }
    }
}
