//! 中継APIのワイヤ形式
//!
//! リクエストはフォームエンコード、レスポンスは `{"results": [...]}` のJSON。
//! レスポンスは `text/plain` で返ることがあるため本文を文字列として受けて自前でパースする。

use serde_json::Value;
use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::types::{InferenceRequest, InferenceResponse};

/// 既定の中継エンドポイント
pub const DEFAULT_ENDPOINT: &str = "https://intro-to-ml-apis-testing.appspot.com/request";

/// リクエスト本文のContent-Type
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// 画像URIのフィールド名
pub const URI_FIELD: &str = "uri";

/// 機能IDのフィールド名（配列として繰り返す）
pub const FEATURES_FIELD: &str = "features[]";

/// リクエストをフォーム本文にエンコード
///
/// `uri=...` の後に機能ごとに `features[]=...` を選択順に並べる。
/// 機能が空なら `features[]` は送らない。
///
/// # Examples
/// ```
/// use vision_query_common::{encode_form, FeatureSelection, InferenceRequest};
///
/// let features: FeatureSelection = ["LABEL_DETECTION"].into_iter().collect();
/// let body = encode_form(&InferenceRequest::new("http://a/b.jpg", features));
/// assert_eq!(body, "uri=http%3A%2F%2Fa%2Fb.jpg&features%5B%5D=LABEL_DETECTION");
/// ```
pub fn encode_form(request: &InferenceRequest) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(URI_FIELD, request.image_uri());
    for feature in request.features().iter() {
        serializer.append_pair(FEATURES_FIELD, feature);
    }
    serializer.finish()
}

/// 2xxレスポンス本文をパース
///
/// # Returns
/// * `Ok(InferenceResponse)` - `results` が文字列配列
/// * `Err(Error::MalformedJson)` - JSONとして読めない
/// * `Err(Error::ResponseShape)` - `results` が無い、または形が違う
pub fn parse_response(body: &str) -> Result<InferenceResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::MalformedJson {
        message: e.to_string(),
        body: body.to_string(),
    })?;

    let shape_error = |detail: String| Error::ResponseShape {
        detail,
        body: body.to_string(),
    };

    let results = value
        .get("results")
        .ok_or_else(|| shape_error("missing field `results`".into()))?
        .as_array()
        .ok_or_else(|| shape_error("`results` is not a list".into()))?;

    let results = results
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| shape_error(format!("`results[{}]` is not a string", i)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(InferenceResponse { results })
}

/// ステータスと本文から結果を判定
///
/// フェッチ層（reqwest / web-sys）に依存しない共通の判定。
pub fn interpret_response(status: u16, status_text: &str, body: String) -> Result<InferenceResponse> {
    if !(200..300).contains(&status) {
        return Err(Error::Status {
            status,
            status_text: status_text.to_string(),
            body,
        });
    }
    parse_response(&body)
}
