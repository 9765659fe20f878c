//! 問い合わせの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Feature: 解析機能のカタログ
//! - FeatureSelection: チェックされた機能IDの並び
//! - InferenceRequest / InferenceResponse: 中継APIとのやり取り

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vision APIの解析機能
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    LabelDetection,
    FaceDetection,
    LandmarkDetection,
    LogoDetection,
    TextDetection,
    WebDetection,
    SafeSearchDetection,
}

impl Feature {
    /// チェックボックスの表示順
    pub const ALL: [Feature; 7] = [
        Feature::LabelDetection,
        Feature::FaceDetection,
        Feature::LandmarkDetection,
        Feature::LogoDetection,
        Feature::TextDetection,
        Feature::WebDetection,
        Feature::SafeSearchDetection,
    ];

    /// 送信に使う識別子（チェックボックスのid）
    pub fn id(&self) -> &'static str {
        match self {
            Feature::LabelDetection => "LABEL_DETECTION",
            Feature::FaceDetection => "FACE_DETECTION",
            Feature::LandmarkDetection => "LANDMARK_DETECTION",
            Feature::LogoDetection => "LOGO_DETECTION",
            Feature::TextDetection => "TEXT_DETECTION",
            Feature::WebDetection => "WEB_DETECTION",
            Feature::SafeSearchDetection => "SAFE_SEARCH_DETECTION",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::LabelDetection => "Labels",
            Feature::FaceDetection => "Faces",
            Feature::LandmarkDetection => "Landmarks",
            Feature::LogoDetection => "Logos",
            Feature::TextDetection => "Text",
            Feature::WebDetection => "Web entities",
            Feature::SafeSearchDetection => "Safe search",
        }
    }

    /// Vision APIレスポンス中のキー
    pub fn annotation_key(&self) -> &'static str {
        match self {
            Feature::LabelDetection => "labelAnnotations",
            Feature::FaceDetection => "faceAnnotations",
            Feature::LandmarkDetection => "landmarkAnnotations",
            Feature::LogoDetection => "logoAnnotations",
            Feature::TextDetection => "fullTextAnnotation",
            Feature::WebDetection => "webDetection",
            Feature::SafeSearchDetection => "safeSearchAnnotation",
        }
    }

    pub fn from_id(id: &str) -> Option<Feature> {
        Self::ALL.iter().copied().find(|f| f.id() == id)
    }

    pub fn from_annotation_key(key: &str) -> Option<Feature> {
        Self::ALL.iter().copied().find(|f| f.annotation_key() == key)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// チェックされた機能IDの並び（DOM順）
///
/// IDはカタログ外の文字列でもそのまま送る。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSelection(Vec<String>);

impl FeatureSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(id, checked)` の並びから選択を組み立てる
    ///
    /// 未チェックと重複は除外し、順序は保つ。
    pub fn from_checked<'a, I>(controls: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut selection = Self::new();
        for (id, checked) in controls {
            if checked {
                selection.push(id);
            }
        }
        selection
    }

    /// 重複は無視
    pub fn push(&mut self, id: &str) {
        if !self.contains(id) {
            self.0.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|f| f == id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for FeatureSelection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.push(id.as_ref());
        }
        selection
    }
}

/// 中継APIへのリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceRequest {
    image_uri: String,
    features: FeatureSelection,
}

impl InferenceRequest {
    pub fn new(image_uri: impl Into<String>, features: FeatureSelection) -> Self {
        Self {
            image_uri: image_uri.into(),
            features,
        }
    }

    pub fn image_uri(&self) -> &str {
        &self.image_uri
    }

    pub fn features(&self) -> &FeatureSelection {
        &self.features
    }
}

/// 中継APIのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub results: Vec<String>,
}
