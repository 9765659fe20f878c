//! 中継APIクライアント
//!
//! ブラウザ版と同じフォーム本文を1回だけPOSTする。リトライしない。

use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use vision_query_common::{
    encode_form, interpret_response, Error, InferenceRequest, InferenceResponse,
    FORM_CONTENT_TYPE,
};

pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 問い合わせを送信
    ///
    /// 失敗は全て [`Error`] で返り、`failure_report()` でそのまま表示できる。
    pub async fn query(&self, request: &InferenceRequest) -> Result<InferenceResponse, Error> {
        let body = encode_form(request);
        debug!(endpoint = %self.endpoint, %body, "POST");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "response");

        interpret_response(status.as_u16(), &status_text, text)
    }
}
