// One collector run: probe the host, publish the snapshot, report failures.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDateTime;

use crate::config::AppConfig;
use crate::models::{NativeSnapshot, RawSnapshot};
use crate::normalizer;
use crate::report;
use crate::snapshot_repo::SnapshotRepo;
use crate::sysinfo_repo::SysinfoRepo;

pub const ERROR_LOG: &str = "monitor_error.log";

pub struct CollectOutcome {
    pub snapshot: NativeSnapshot,
    pub history_file: PathBuf,
}

/// Probes the host and writes latest + history files for `source`. Directory
/// provisioning failures abort the run.
pub async fn run(
    config: &AppConfig,
    source: &str,
    at: NaiveDateTime,
) -> anyhow::Result<CollectOutcome> {
    config.paths().provision()?;

    let sysinfo_repo = SysinfoRepo::new(Duration::from_millis(config.collector.cpu_sample_ms));
    let snapshot = sysinfo_repo.collect(at).await.context("probing host")?;

    let store = SnapshotRepo::from_config(config);
    let history_file = store
        .publish(source, &snapshot, at)
        .context("publishing snapshot")?;
    tracing::info!(source, history = %history_file.display(), "snapshot collected");

    Ok(CollectOutcome {
        snapshot,
        history_file,
    })
}

/// Console summary followed by the raw document, as printed by interactive runs.
pub fn render_console(snapshot: &NativeSnapshot) -> anyhow::Result<String> {
    let canonical = normalizer::normalize(RawSnapshot::Native(Box::new(snapshot.clone())));
    let mut out = report::console::render(&canonical);
    out.push_str("\nJSON Output:\n");
    out.push_str(&serde_json::to_string_pretty(snapshot)?);
    out.push('\n');
    Ok(out)
}

/// Appends a failure with its cause chain to `<logs_dir>/monitor_error.log`.
pub fn record_failure(
    logs_dir: &Path,
    at: NaiveDateTime,
    error: &anyhow::Error,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(logs_dir)?;
    let path = logs_dir.join(ERROR_LOG);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    writeln!(
        file,
        "\n[{}] Error: {:#}",
        at.format(crate::sysinfo_repo::TIMESTAMP_FORMAT),
        error
    )?;
    for cause in error.chain().skip(1) {
        writeln!(file, "    caused by: {cause}")?;
    }
    Ok(path)
}

/// Silent-mode failure reporting: the error log, or `fallback` (stderr in the
/// binary) when the log itself cannot be written.
pub fn report_failure(
    logs_dir: &Path,
    at: NaiveDateTime,
    error: &anyhow::Error,
    fallback: &mut impl Write,
) {
    if let Err(log_err) = record_failure(logs_dir, at, error) {
        let _ = writeln!(
            fallback,
            "could not write {}: {log_err}\nError: {error:#}",
            logs_dir.join(ERROR_LOG).display()
        );
    }
}
