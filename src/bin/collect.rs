use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sysmon::config::{self, AppConfig};
use sysmon::{collector, telemetry};

/// Collects one host metrics snapshot and writes it to the metrics directory.
#[derive(Parser)]
#[command(name = "sysmon-collect")]
#[command(version)]
struct Cli {
    /// No console output; failures go to the error log file.
    #[arg(short, long)]
    silent: bool,

    /// Source tag for the written files (defaults to collector.source).
    #[arg(long)]
    source: Option<String>,

    /// Config file (defaults to $CONFIG_FILE, then config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Used for failures that happen before the config (and its logs_dir) is known.
const FALLBACK_LOGS_DIR: &str = "data/logs";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(if cli.silent { "off" } else { "info" });

    let started_at = chrono::Local::now().naive_local();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    };

    let result = match &config {
        Ok(config) => {
            let source = cli.source.as_deref().unwrap_or(&config.collector.source);
            if config::is_valid_source_tag(source) {
                collector::run(config, source, started_at).await
            } else {
                Err(anyhow::anyhow!("invalid source tag {:?}", source))
            }
        }
        Err(e) => Err(anyhow::anyhow!("loading config: {:#}", e)),
    };

    match result {
        Ok(outcome) => {
            if !cli.silent {
                match collector::render_console(&outcome.snapshot) {
                    Ok(text) => println!("{text}"),
                    Err(e) => tracing::warn!(error = %e, "console summary failed"),
                }
                println!("Metrics saved to: {}", outcome.history_file.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.silent {
                let logs_dir = config
                    .as_ref()
                    .map(|c| c.paths().logs_dir)
                    .unwrap_or_else(|_| PathBuf::from(FALLBACK_LOGS_DIR));
                collector::report_failure(&logs_dir, started_at, &e, &mut std::io::stderr());
            } else {
                tracing::error!("collection failed: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
