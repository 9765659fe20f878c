//! Cloud Vision `images:annotate` 連携
//!
//! 中継APIが返す結果文字列はVision APIのレスポンスを整形したもの。
//! 同じ整形をここで行い、CLIから直接呼び出し・オフライン整形に使う。

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::{Feature, FeatureSelection};

/// Vision API エンドポイント（`?key=` を付けて使う）
pub const VISION_ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// 機能ごとの最大件数の既定値
pub const DEFAULT_MAX_RESULTS: u32 = 1000;

/// annotateリクエスト
#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: Image,
    features: Vec<FeatureRequest>,
}

#[derive(Debug, Serialize)]
struct Image {
    source: ImageSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSource {
    image_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRequest {
    #[serde(rename = "type")]
    feature_type: String,
    max_results: u32,
}

/// 1画像分のannotateリクエストを組み立てる
pub fn build_annotate_request(
    image_uri: &str,
    features: &FeatureSelection,
    max_results: u32,
) -> AnnotateRequest {
    AnnotateRequest {
        requests: vec![AnnotateImageRequest {
            image: Image {
                source: ImageSource {
                    image_uri: image_uri.to_string(),
                },
            },
            features: features
                .iter()
                .map(|f| FeatureRequest {
                    feature_type: f.to_string(),
                    max_results,
                })
                .collect(),
        }],
    }
}

/// 人が読む列挙に整形（"a, b and c"）
pub fn pretty_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut joined = String::new();
    for (i, item) in items.iter().enumerate() {
        joined.push_str(item.as_ref());
        if i + 2 < items.len() {
            joined.push_str(", ");
        } else if i + 2 == items.len() {
            joined.push_str(" and ");
        }
    }
    joined
}

/// `FACE_DETECTION` -> `face detection`
fn humanize(identifier: &str) -> String {
    identifier
        .to_lowercase()
        .split('_')
        .collect::<Vec<_>>()
        .join(" ")
}

/// annotateレスポンスを結果文字列に整形
///
/// 先頭画像の結果のうち、要求された機能だけをレスポンスのキー順に整形する。
/// 結果が無かった機能は最後に "No results for ..." としてまとめる。
///
/// # Arguments
/// * `response` - `images:annotate` のレスポンスJSON
/// * `requested` - 要求した機能ID（選択順）
pub fn describe_annotations(response: &Value, requested: &FeatureSelection) -> Result<Vec<String>> {
    let annotations = response
        .get("responses")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Annotation("`responses[0]` が見つかりません".into()))?;

    let mut remaining: Vec<String> = requested.iter().map(str::to_string).collect();
    let mut parsed = Vec::new();

    for (key, annotation) in annotations {
        let Some(feature) = Feature::from_annotation_key(key) else {
            continue;
        };
        if let Some(pos) = remaining.iter().position(|f| f == feature.id()) {
            parsed.push(describe_feature(feature, annotation)?);
            remaining.remove(pos);
        }
    }

    if !remaining.is_empty() {
        let names: Vec<String> = remaining.iter().map(|f| humanize(f)).collect();
        parsed.push(format!("No results for {}", pretty_list(&names)));
    }

    Ok(parsed)
}

fn describe_feature(feature: Feature, annotation: &Value) -> Result<String> {
    let text = match feature {
        Feature::FaceDetection => describe_faces(as_list(feature, annotation)?),
        Feature::LabelDetection => format!(
            "<b>Label results detected:</b> {}",
            descriptions(as_list(feature, annotation)?)
        ),
        Feature::LandmarkDetection => format!(
            "<b>Landmark results detected:</b> {}",
            descriptions(as_list(feature, annotation)?)
        ),
        Feature::LogoDetection => format!(
            "<b>Logo results detected:</b> {}",
            descriptions(as_list(feature, annotation)?)
        ),
        Feature::TextDetection => {
            let text = annotation
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::Annotation("fullTextAnnotation.text がありません".into()))?;
            format!("<b>Text results detected:</b> <blockquote>{}</blockquote>", text)
        }
        Feature::WebDetection => {
            let entities = annotation
                .get("webEntities")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            format!("<b>Web results detected:</b> {}", descriptions(entities))
        }
        Feature::SafeSearchDetection => describe_safe_search(as_object(feature, annotation)?),
    };
    Ok(text)
}

fn as_list(feature: Feature, annotation: &Value) -> Result<&[Value]> {
    annotation
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::Annotation(format!("{} が配列ではありません", feature.annotation_key())))
}

fn as_object(feature: Feature, annotation: &Value) -> Result<&Map<String, Value>> {
    annotation
        .as_object()
        .ok_or_else(|| Error::Annotation(format!("{} がオブジェクトではありません", feature.annotation_key())))
}

/// `description` を持つ要素だけ列挙
fn descriptions(items: &[Value]) -> String {
    let names: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("description").and_then(Value::as_str))
        .collect();
    pretty_list(&names)
}

fn describe_faces(faces: &[Value]) -> String {
    let states: Vec<String> = faces
        .iter()
        .map(|face| format!("one {}", face_state(face)))
        .collect();
    format!("<b>{} face results detected:</b> {}", faces.len(), pretty_list(&states))
}

/// 最も確からしい表情を1つ選ぶ
fn face_state(face: &Value) -> String {
    let Some(fields) = face.as_object() else {
        return "unknown".into();
    };
    let levels = [
        ("VERY_LIKELY", "very likely to be "),
        ("LIKELY", "likely to be "),
        ("POSSIBLE", "possibly "),
    ];
    for (level, phrase) in levels {
        let hit = fields
            .iter()
            .find(|(_, value)| value.as_str() == Some(level));
        if let Some((key, _)) = hit {
            let state = key.strip_suffix("Likelihood").unwrap_or(key);
            return format!("{}{}", phrase, state);
        }
    }
    "unknown".into()
}

fn describe_safe_search(annotation: &Map<String, Value>) -> String {
    let entries: Vec<String> = annotation
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_str()
                .map(|likelihood| format!("{}: <i>{}</i>", key, humanize(likelihood)))
        })
        .collect();
    format!("<b>Safe search results detected:</b> {}", pretty_list(&entries))
}
