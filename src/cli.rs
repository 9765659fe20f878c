use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vision-query")]
#[command(about = "画像URIをVision APIに問い合わせて結果を表示するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 中継APIに問い合わせて結果を表示
    Query {
        /// 画像URI
        uri: String,

        /// 機能ID（複数指定可、未指定なら設定の既定値）
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// 中継APIのURL（未指定なら設定値）
        #[arg(long)]
        endpoint: Option<String>,

        /// グリッドHTMLで出力
        #[arg(long)]
        html: bool,
    },

    /// Vision APIを直接呼び出して結果を表示
    Annotate {
        /// 画像URI
        uri: String,

        /// 機能ID（複数指定可、未指定なら設定の既定値）
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// 機能ごとの最大件数（未指定なら設定値）
        #[arg(long)]
        max_results: Option<u32>,

        /// グリッドHTMLで出力
        #[arg(long)]
        html: bool,
    },

    /// 保存済みのVision APIレスポンスを整形
    Describe {
        /// annotateレスポンスJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 要求した機能ID
        #[arg(short, long = "feature")]
        features: Vec<String>,

        /// グリッドHTMLで出力
        #[arg(long)]
        html: bool,
    },

    /// 保存済みの中継APIレスポンスをグリッドHTMLに変換
    Render {
        /// `{"results": [...]}` 形式のJSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 利用できる機能IDの一覧
    Features,

    /// 設定管理
    Config {
        /// 中継APIのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Vision APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定の機能IDを設定（複数指定可）
        #[arg(long = "set-default-feature")]
        set_default_features: Vec<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
