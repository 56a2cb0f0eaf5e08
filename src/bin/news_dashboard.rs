use clap::Parser;
use news_analyzer::utils::logger;
use news_analyzer::{render_report, AnalyzerError, DashboardClient};

#[derive(Parser)]
#[command(name = "news-dashboard")]
#[command(about = "Show the news analysis for a company (backend URL from API_BASE)")]
struct Args {
    /// Company to analyze
    company: String,

    /// Print the raw JSON report instead of the formatted view
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let client = DashboardClient::from_env();
    tracing::debug!("Using backend at {}", client.base_url());

    match client.analyze(&args.company).await {
        Ok(report) if args.json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => print!("{}", render_report(&report)),
        Err(AnalyzerError::BackendError { status, detail }) => {
            eprintln!("❌ Backend returned {}: {}", status, detail);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }

    Ok(())
}
