//! サブコマンドの処理本体
//!
//! 各関数は表示する文字列を返し、出力は呼び出し側で行う。

use std::path::Path;

use serde_json::Value;
use tracing::info;
use vision_query_common::{
    describe_annotations, parse_response, render_results, Feature, FeatureSelection,
    InferenceRequest,
};

use crate::client::RelayClient;
use crate::config::Config;
use crate::error::{QueryCliError, Result};
use crate::vision::VisionClient;

/// 指定が無ければ設定の既定機能を使う
pub fn resolve_features(args: &[String], config: &Config) -> FeatureSelection {
    if args.is_empty() {
        config.default_features.iter().collect()
    } else {
        args.iter().collect()
    }
}

/// 結果を出力形式に整形（テキストは1行1件）
pub fn format_results(results: &[String], html: bool) -> String {
    if html {
        render_results(results)
    } else {
        results.join("\n")
    }
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(QueryCliError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

pub async fn query(client: &RelayClient, uri: &str, features: FeatureSelection, html: bool) -> Result<String> {
    let request = InferenceRequest::new(uri, features);
    info!(endpoint = client.endpoint(), uri, "querying relay");
    let response = client.query(&request).await?;
    Ok(format_results(&response.results, html))
}

pub async fn annotate(
    client: &VisionClient,
    uri: &str,
    features: &FeatureSelection,
    max_results: u32,
    html: bool,
) -> Result<String> {
    let results = client.annotate(uri, features, max_results).await?;
    Ok(format_results(&results, html))
}

/// 保存済みのannotateレスポンスを整形
pub fn describe(input: &Path, features: &FeatureSelection, html: bool) -> Result<String> {
    let content = read_input(input)?;
    let value: Value = serde_json::from_str(&content)?;
    let results = describe_annotations(&value, features)?;
    Ok(format_results(&results, html))
}

/// 保存済みの中継レスポンスをグリッドに
pub fn render(input: &Path) -> Result<String> {
    let content = read_input(input)?;
    let response = parse_response(&content)?;
    Ok(render_results(&response.results))
}

/// 機能カタログ（ID と表示名）
pub fn list_features() -> String {
    Feature::ALL
        .iter()
        .map(|f| format!("{:<24}{}", f.id(), f.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 設定の表示用文字列（APIキーは伏せる）
pub fn show_config(config: &Config) -> String {
    let api_key = match &config.api_key {
        Some(key) if key.chars().count() > 4 => {
            format!("{}****", key.chars().take(4).collect::<String>())
        }
        Some(_) => "****".to_string(),
        None => "(未設定)".to_string(),
    };
    format!(
        "endpoint: {}\napi_key: {}\ndefault_features: {}\nmax_results: {}",
        config.endpoint,
        api_key,
        config.default_features.join(", "),
        config.max_results
    )
}
