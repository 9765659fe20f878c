use clap::Parser;
use vision_query::{cli, client, commands, config, error, logging, vision};
use cli::{Cli, Commands};
use config::Config;
use error::{QueryCliError, Result};
use vision_query_common::render_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        // 問い合わせ失敗はブラウザ版と同じエラー表示も出す
        if let QueryCliError::Query(inner) = &e {
            println!("{}", render_error(&inner.failure_report()));
        }
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Query { uri, features, endpoint, html } => {
            let features = commands::resolve_features(&features, &config);
            let endpoint = endpoint.unwrap_or_else(|| config.endpoint.clone());
            let relay = client::RelayClient::new(endpoint);
            println!("{}", commands::query(&relay, &uri, features, html).await?);
        }

        Commands::Annotate { uri, features, max_results, html } => {
            let features = commands::resolve_features(&features, &config);
            let api_key = config.get_api_key()?;
            let max_results = max_results.unwrap_or(config.max_results);
            let vision = vision::VisionClient::new(api_key);
            println!("{}", commands::annotate(&vision, &uri, &features, max_results, html).await?);
        }

        Commands::Describe { input, features, html } => {
            let features = commands::resolve_features(&features, &config);
            println!("{}", commands::describe(&input, &features, html)?);
        }

        Commands::Render { input } => {
            println!("{}", commands::render(&input)?);
        }

        Commands::Features => {
            println!("{}", commands::list_features());
        }

        Commands::Config { set_endpoint, set_api_key, set_default_features, show } => {
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                changed = true;
            }
            if let Some(key) = set_api_key {
                config.set_api_key(key);
                changed = true;
            }
            if !set_default_features.is_empty() {
                config.default_features = set_default_features;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存: {}", Config::config_path()?.display());
            }
            if show || !changed {
                println!("{}", commands::show_config(&config));
            }
        }
    }

    Ok(())
}
