use crate::error::{QueryCliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vision_query_common::{annotate::DEFAULT_MAX_RESULTS, DEFAULT_ENDPOINT};

/// APIキーを渡す環境変数
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub default_features: Vec<String>,
    pub max_results: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: None,
            default_features: vec!["LABEL_DETECTION".into()],
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QueryCliError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("vision-query").join("config.json"))
    }

    /// 環境変数を優先してAPIキーを取得
    pub fn get_api_key(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or(QueryCliError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        if endpoint.trim().is_empty() {
            return Err(QueryCliError::Config("エンドポイントが空です".into()));
        }
        self.endpoint = endpoint;
        Ok(())
    }
}
