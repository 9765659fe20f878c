//! サブコマンド処理とCLI引数のテスト

use clap::Parser;
use tempfile::tempdir;
use vision_query::cli::{Cli, Commands};
use vision_query::commands;
use vision_query::config::Config;
use vision_query::error::QueryCliError;
use vision_query_common::Error;

#[test]
fn test_resolve_features_uses_config_default() {
    let config = Config::default();
    let features = commands::resolve_features(&[], &config);
    assert_eq!(features.as_slice(), &["LABEL_DETECTION"]);

    let args = vec!["TEXT_DETECTION".to_string(), "TEXT_DETECTION".to_string()];
    let features = commands::resolve_features(&args, &config);
    assert_eq!(features.as_slice(), &["TEXT_DETECTION"]);
}

#[test]
fn test_format_results_text_and_html() {
    let results = vec!["A".to_string(), "B".to_string()];
    assert_eq!(commands::format_results(&results, false), "A\nB");

    let html = commands::format_results(&results, true);
    assert!(html.starts_with(r#"<div class="grid eee">"#));
    assert_eq!(html.matches(r#"<div class="column third">"#).count(), 2);
}

#[test]
fn test_render_saved_response() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("response.json");
    std::fs::write(&path, r#"{"results": ["A", "B", "C", "D"]}"#).unwrap();

    let html = commands::render(&path).unwrap();
    assert_eq!(html.matches("<div class=\"grid ").count(), 2);
    assert!(html.contains(r#"<div class="grid fff"><div class="column third"><div class="module lighter">D</div></div></div>"#));
}

#[test]
fn test_render_missing_results_field() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("response.json");
    std::fs::write(&path, r#"{"status": "ok"}"#).unwrap();

    let err = commands::render(&path).unwrap_err();
    assert!(matches!(err, QueryCliError::Query(Error::ResponseShape { .. })));
}

#[test]
fn test_render_nonexistent_file() {
    let err = commands::render(std::path::Path::new("/nonexistent/response.json")).unwrap_err();
    assert!(matches!(err, QueryCliError::FileNotFound(_)));
}

#[test]
fn test_describe_saved_annotation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotate.json");
    std::fs::write(
        &path,
        r#"{"responses": [{"landmarkAnnotations": [{"description": "Tokyo Tower"}]}]}"#,
    )
    .unwrap();

    let features = ["LANDMARK_DETECTION", "WEB_DETECTION"].into_iter().collect();
    let text = commands::describe(&path, &features, false).unwrap();
    assert_eq!(
        text,
        "<b>Landmark results detected:</b> Tokyo Tower\nNo results for web detection"
    );
}

#[test]
fn test_list_features_contains_catalog() {
    let listing = commands::list_features();
    assert_eq!(listing.lines().count(), 7);
    assert!(listing.contains("SAFE_SEARCH_DETECTION"));
}

#[test]
fn test_show_config_masks_api_key() {
    let mut config = Config::default();
    config.set_api_key("AIzaSecretValue".into());
    let shown = commands::show_config(&config);
    assert!(shown.contains("AIza****"));
    assert!(!shown.contains("SecretValue"));
}

#[test]
fn test_cli_parse_query() {
    let cli = Cli::try_parse_from([
        "vision-query",
        "query",
        "https://example.com/a.jpg",
        "-f",
        "LABEL_DETECTION",
        "--feature",
        "FACE_DETECTION",
        "--html",
    ])
    .unwrap();

    match cli.command {
        Commands::Query { uri, features, endpoint, html } => {
            assert_eq!(uri, "https://example.com/a.jpg");
            assert_eq!(features, vec!["LABEL_DETECTION", "FACE_DETECTION"]);
            assert_eq!(endpoint, None);
            assert!(html);
        }
        _ => panic!("expected query command"),
    }
}

#[test]
fn test_cli_parse_global_verbose() {
    let cli = Cli::try_parse_from(["vision-query", "features", "-v"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Features));
}

#[test]
fn test_cli_render_requires_input() {
    assert!(Cli::try_parse_from(["vision-query", "render"]).is_err());
}
