use clap::Parser;
use news_analyzer::domain::ports::ConfigProvider;
use news_analyzer::utils::error::ErrorSeverity;
use news_analyzer::utils::{logger, validation::Validate};
use news_analyzer::{AnalysisEngine, CliConfig, NewsPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "news-analyzer")]
#[command(about = "Fetch recent news about a company and analyze sentiment and topics")]
struct Args {
    /// Company to search for
    company: String,

    /// TOML configuration file; replaces the analysis flags below
    #[arg(short, long)]
    config: Option<String>,

    #[command(flatten)]
    settings: CliConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.settings.verbose);
    tracing::info!("Starting news-analyzer");

    let exit_code = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            let monitor = args.settings.monitor || config.monitoring_enabled();
            run(&args.company, config, monitor).await
        }
        None => {
            if args.settings.verbose {
                tracing::debug!("CLI config: {:?}", args.settings);
            }
            let monitor = args.settings.monitor;
            run(&args.company, args.settings, monitor).await
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<C>(company: &str, config: C, monitor_enabled: bool) -> i32
where
    C: ConfigProvider + Validate + 'static,
{
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return 1;
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = match NewsPipeline::from_config(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            return 3;
        }
    };
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run(company).await {
        Ok(output_path) => {
            tracing::info!("✅ Analysis completed successfully!");
            println!("✅ Analysis completed successfully!");
            println!("📁 Report saved to: {}", output_path);
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依嚴重程度決定退出碼
            match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    }
}
