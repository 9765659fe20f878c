//! 表示マークアップの組み立て
//!
//! 結果文字列は信頼済みHTML断片としてエスケープせずに埋め込む。

use crate::error::FailureReport;

/// 1行あたりのセル数
pub const CELLS_PER_ROW: usize = 3;

/// 応答待ちの表示
pub const WORKING_PLACEHOLDER: &str = "Working...";

const FIRST_ROW_OPEN: &str = r#"<div class="grid eee">"#;
const ROW_OPEN: &str = r#"<div class="grid fff">"#;
const CELL_OPEN: &str = r#"<div class="column third"><div class="module lighter">"#;
const CELL_CLOSE: &str = "</div></div>";

/// 結果をグリッドに組み立てる
///
/// 3件ごとに行コンテナで包み、各結果はセルで包む。
/// 先頭行のみ `grid eee`、以降は `grid fff`。空なら空文字列。
pub fn render_results(results: &[String]) -> String {
    let mut html = String::new();
    for (row_index, row) in results.chunks(CELLS_PER_ROW).enumerate() {
        html.push_str(if row_index == 0 { FIRST_ROW_OPEN } else { ROW_OPEN });
        for result in row {
            html.push_str(CELL_OPEN);
            html.push_str(result);
            html.push_str(CELL_CLOSE);
        }
        html.push_str("</div>");
    }
    html
}

/// エラーメッセージを組み立てる
pub fn render_error(report: &FailureReport) -> String {
    format!(
        "Error, status = {}, error thrown: {}<br><br>{}",
        report.status_text, report.error_thrown, report.body
    )
}

/// 画像プレビュー
///
/// URIは属性値として最低限エスケープする。
pub fn render_image_preview(image_uri: &str) -> String {
    format!(
        r#"<div class="module darker"><img src="{}" alt="Requested image" style="height: 100%; width: 100%; object-fit: contain;"></div>"#,
        escape_attribute(image_uri)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
