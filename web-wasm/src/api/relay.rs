//! 中継API呼び出し（fetch）
//!
//! 1回のPOSTのみ。タイムアウト・リトライは行わない。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use vision_query_common::{
    encode_form, interpret_response, Error, InferenceRequest, InferenceResponse,
    FORM_CONTENT_TYPE,
};

/// 問い合わせを送信して結果を受け取る
///
/// # Arguments
/// * `endpoint` - 中継APIのURL
/// * `request` - 画像URIと機能ID
///
/// # Returns
/// * `Ok(InferenceResponse)` - 2xxかつ `results` が文字列配列
/// * `Err(Error)` - 通信失敗・非2xx・JSON不正・形式不正
pub async fn post_query(endpoint: &str, request: &InferenceRequest) -> Result<InferenceResponse, Error> {
    let body = encode_form(request);

    let mut opts = RequestInit::new();
    opts.method("POST");
    opts.mode(RequestMode::Cors);
    opts.body(Some(&JsValue::from_str(&body)));

    let fetch_request = Request::new_with_str_and_init(endpoint, &opts).map_err(network_error)?;
    fetch_request
        .headers()
        .set("Content-Type", FORM_CONTENT_TYPE)
        .map_err(network_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Network("window が取得できません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    let status = resp.status();
    let status_text = resp.status_text();

    let text = JsFuture::from(resp.text().map_err(network_error)?)
        .await
        .map_err(network_error)?
        .as_string()
        .unwrap_or_default();

    interpret_response(status, &status_text, text)
}

fn network_error(value: JsValue) -> Error {
    Error::Network(describe_js_error(&value))
}

/// 例外値を表示用の文字列に
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
