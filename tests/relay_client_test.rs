//! 中継API・Vision APIクライアントのテスト
//!
//! ローカルのTCPリスナーを1回だけ応答するスタブとして使う

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use vision_query::client::RelayClient;
use vision_query::error::QueryCliError;
use vision_query::vision::VisionClient;
use vision_query_common::{Error, FeatureSelection, InferenceRequest};

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build client")
}

/// リクエスト全体（ヘッダ+本文）を読み切る
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// 1回だけ応答するスタブサーバ。受け取ったリクエストを返す
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}/request", addr), handle)
}

fn request(uri: &str, features: &[&str]) -> InferenceRequest {
    InferenceRequest::new(uri, features.iter().collect::<FeatureSelection>())
}

#[tokio::test]
async fn test_query_success_sends_form_body() {
    let (endpoint, server) = serve_once("200 OK", r#"{"results": ["<b>Label results detected:</b> cat"]}"#).await;
    let client = RelayClient::with_http(http_client(), endpoint);

    let response = client
        .query(&request("https://example.com/cat.jpg", &["LABEL_DETECTION", "FACE_DETECTION"]))
        .await
        .unwrap();
    assert_eq!(response.results, vec!["<b>Label results detected:</b> cat"]);

    let received = server.await.unwrap();
    assert!(received.starts_with("POST /request"));
    assert!(received
        .to_ascii_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(received.ends_with(
        "uri=https%3A%2F%2Fexample.com%2Fcat.jpg&features%5B%5D=LABEL_DETECTION&features%5B%5D=FACE_DETECTION"
    ));
}

#[tokio::test]
async fn test_query_not_found_keeps_status_and_body() {
    let (endpoint, server) = serve_once("404 Not Found", "<p>no such page</p>").await;
    let client = RelayClient::with_http(http_client(), endpoint);

    let err = client.query(&request("x", &[])).await.unwrap_err();
    server.await.unwrap();

    match &err {
        Error::Status { status, status_text, body } => {
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(body, "<p>no such page</p>");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let message = vision_query_common::render_error(&err.failure_report());
    assert!(message.contains("Not Found"));
    assert!(message.contains("<p>no such page</p>"));
}

#[tokio::test]
async fn test_query_malformed_json() {
    let (endpoint, server) = serve_once("200 OK", "Internal oops").await;
    let client = RelayClient::with_http(http_client(), endpoint);

    let err = client.query(&request("x", &["TEXT_DETECTION"])).await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(err, Error::MalformedJson { ref body, .. } if body == "Internal oops"));
    assert!(err.failure_report().error_thrown.starts_with("SyntaxError"));
}

#[tokio::test]
async fn test_query_missing_results_field() {
    let (endpoint, server) = serve_once("200 OK", r#"{"result": []}"#).await;
    let client = RelayClient::with_http(http_client(), endpoint);

    let err = client.query(&request("x", &[])).await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(err, Error::ResponseShape { .. }));
}

#[tokio::test]
async fn test_query_connection_refused() {
    // 一度バインドして閉じたポートに送る
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RelayClient::with_http(http_client(), format!("http://{}/request", addr));
    let err = client.query(&request("x", &[])).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert!(err.failure_report().body.is_empty());
}

#[tokio::test]
async fn test_annotate_formats_vision_response() {
    let body = r#"{"responses": [{"labelAnnotations": [{"description": "cat"}, {"description": "pet"}]}]}"#;
    let (url, server) = serve_once("200 OK", body).await;
    let client = VisionClient::with_http(http_client(), url, "test-key");

    let features: FeatureSelection = ["LABEL_DETECTION", "LOGO_DETECTION"].into_iter().collect();
    let results = client.annotate("gs://b/cat.jpg", &features, 5).await.unwrap();
    assert_eq!(
        results,
        vec![
            "<b>Label results detected:</b> cat and pet".to_string(),
            "No results for logo detection".to_string(),
        ]
    );

    let received = server.await.unwrap();
    assert!(received.starts_with("POST /request?key=test-key"));
    assert!(received.contains(r#""imageUri":"gs://b/cat.jpg""#));
    assert!(received.contains(r#""maxResults":5"#));
}

#[tokio::test]
async fn test_annotate_http_error() {
    let (url, server) = serve_once("403 Forbidden", r#"{"error": {"message": "API key not valid"}}"#).await;
    let client = VisionClient::with_http(http_client(), url, "bad-key");

    let features: FeatureSelection = ["LABEL_DETECTION"].into_iter().collect();
    let err = client.annotate("x", &features, 1).await.unwrap_err();
    server.await.unwrap();
    match err {
        QueryCliError::Query(Error::Status { status, body, .. }) => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
