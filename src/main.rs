use aso_scout::Aggregator;
use aso_scout::config::{AppConfig, ConfigError, load_config};
use aso_scout::model::AnalysisReport;

use clap::Parser;
use futures::future::join_all;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Analyze Play Store listings and print ASO reports as JSON.
#[derive(Debug, Parser)]
#[command(name = "aso-scout", version)]
struct Cli {
    /// Path to the JSON config file. Defaults apply when it does not exist.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Print the canned demo report instead of failing.
    #[arg(long)]
    demo_on_failure: bool,

    /// Single-line JSON output.
    #[arg(long)]
    compact: bool,

    /// Package ids, e.g. com.whatsapp
    #[arg(required = true)]
    packages: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config {} not found, using defaults", cli.config.display());
            AppConfig::default()
        }
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::from(2);
        }
    };

    let aggregator = match Aggregator::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to initialize analyzer: {}", e);
            return ExitCode::from(2);
        }
    };

    info!("Packages to analyze: {}", cli.packages.len());
    let demo_on_failure = cli.demo_on_failure;
    let tasks = cli.packages.iter().map(|pkg| {
        let aggregator = &aggregator;
        async move {
            if demo_on_failure {
                Ok(aggregator.analyze_or_demo(pkg).await)
            } else {
                aggregator.analyze(pkg).await
            }
        }
    });
    let results = join_all(tasks).await;

    let mut failed = false;
    for (pkg, result) in cli.packages.iter().zip(results) {
        match result {
            Ok(report) => failed |= !print_report(&report, cli.compact),
            Err(e) => {
                eprintln!("{pkg}: {e}");
                failed = true;
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn print_report(report: &AnalysisReport, compact: bool) -> bool {
    let json = if compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    };
    match json {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            error!("Failed to serialize report for {}: {}", report.package_id, e);
            false
        }
    }
}
