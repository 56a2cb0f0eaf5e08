use anyhow::Context;
use clap::Parser;
use news_analyzer::domain::ports::ConfigProvider;
use news_analyzer::server::{serve, AppState};
use news_analyzer::utils::{logger, validation::Validate};
use news_analyzer::{AnalysisEngine, CliConfig, NewsPipeline, TomlConfig};
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "0.0.0.0:8000";

#[derive(Parser)]
#[command(name = "news-api")]
#[command(about = "REST backend serving company news analysis")]
struct Args {
    /// Address to listen on (defaults to the config file's, else 0.0.0.0:8000)
    #[arg(short, long)]
    bind: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(flatten)]
    settings: CliConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let file_config = match args.config.as_deref() {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?,
        ),
        None => None,
    };
    logger::init_server_logger(file_config.as_ref().and_then(|c| c.log_level()));

    match file_config {
        Some(config) => {
            let bind = args
                .bind
                .clone()
                .unwrap_or_else(|| config.bind_address().to_string());
            let monitor = config.monitoring_enabled();
            start(&bind, config, monitor).await?;
        }
        None => {
            let bind = args.bind.clone().unwrap_or_else(|| DEFAULT_BIND.to_string());
            let monitor = args.settings.monitor;
            start(&bind, args.settings, monitor).await?;
        }
    }

    Ok(())
}

async fn start<C>(bind: &str, config: C, monitor_enabled: bool) -> anyhow::Result<()>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate().map_err(|e| {
        tracing::error!("Configuration validation failed: {}", e);
        anyhow::anyhow!("{} ({})", e.user_friendly_message(), e.recovery_suggestion())
    })?;

    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", bind))?;

    let pipeline = NewsPipeline::from_config(config).context("failed to build HTTP client")?;
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    serve(addr, AppState::new(engine))
        .await
        .context("server error")?;
    Ok(())
}
