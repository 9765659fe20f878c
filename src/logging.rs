//! ログ初期化
//!
//! stderrへ出力する。`RUST_LOG` があればそれを優先し、無ければ `-v` で debug。

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vision_query={},vision_query_common={}", default_level, default_level)));

    // 二重初期化（テスト等）は無視
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
