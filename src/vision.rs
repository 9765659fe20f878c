//! Cloud Vision APIの直接呼び出し
//!
//! 中継APIを介さず `images:annotate` を叩き、中継APIと同じ形式の結果文字列に整形する。

use serde_json::Value;
use tracing::debug;
use vision_query_common::{
    annotate::VISION_ANNOTATE_URL, build_annotate_request, describe_annotations, Error,
    FeatureSelection,
};

use crate::error::Result;

pub struct VisionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), VISION_ANNOTATE_URL, api_key)
    }

    pub fn with_http(http: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// 画像を解析して結果文字列を返す
    pub async fn annotate(
        &self,
        image_uri: &str,
        features: &FeatureSelection,
        max_results: u32,
    ) -> Result<Vec<String>> {
        let body = build_annotate_request(image_uri, features, max_results);
        debug!(url = %self.url, image_uri, features = ?features.as_slice(), "annotate");

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: text,
            }
            .into());
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| Error::MalformedJson {
            message: e.to_string(),
            body: text.clone(),
        })?;
        Ok(describe_annotations(&value, features)?)
    }
}
