// Collector run against the real host, plus failure logging

mod common;

use chrono::TimeDelta;
use common::{at, config_in};
use sysmon::collector::{self, ERROR_LOG};
use sysmon::snapshot_repo::SnapshotRepo;
use tempfile::TempDir;

#[tokio::test]
async fn run_publishes_a_normalizable_snapshot() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let now = chrono::Local::now().naive_local();

    let outcome = collector::run(&config, "native", now).await.unwrap();
    assert!(outcome.history_file.exists());
    assert!(outcome.snapshot.cpu.count >= 1);

    let repo = SnapshotRepo::from_config(&config);
    let latest = repo.load_latest("native").unwrap();
    assert!(latest.cpu.core_count >= 1);
    assert!((0.0..=100.0).contains(&latest.cpu.usage_percent));
    assert_eq!(latest.network.interfaces.len(), 1);
    assert!(latest.system_load.top_cpu_processes.len() <= 5);

    let history = repo.load_history_at("native", TimeDelta::minutes(5), now);
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn console_output_ends_with_the_document() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let outcome = collector::run(&config, "native", at(8, 0, 0)).await.unwrap();

    let text = collector::render_console(&outcome.snapshot).unwrap();
    assert!(text.contains("JSON Output:"));
    let json = text.split_once("JSON Output:\n").unwrap().1;
    let value: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
    assert!(value["system"]["hostname"].is_string());
}

#[test]
fn failures_are_appended_to_the_error_log() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");

    let err = anyhow::anyhow!("disk gone").context("publishing snapshot");
    let path = collector::record_failure(&logs, at(7, 30, 0), &err).unwrap();
    collector::record_failure(&logs, at(7, 31, 0), &anyhow::anyhow!("again")).unwrap();

    assert_eq!(path, logs.join(ERROR_LOG));
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("[2025-12-16T07:30:00.000000] Error: publishing snapshot: disk gone"));
    assert!(text.contains("caused by: disk gone"));
    assert!(text.contains("Error: again"));
}

#[test]
fn unwritable_error_log_falls_back_to_the_given_writer() {
    let dir = TempDir::new().unwrap();
    // A file where the logs directory should be.
    let blocked = dir.path().join("logs");
    std::fs::write(&blocked, "not a directory").unwrap();

    let err = anyhow::anyhow!("collection failed");
    let mut fallback = Vec::new();
    collector::report_failure(&blocked, at(7, 0, 0), &err, &mut fallback);

    let text = String::from_utf8(fallback).unwrap();
    assert!(text.contains("could not write"));
    assert!(text.contains(ERROR_LOG));
    assert!(text.contains("Error: collection failed"));
}

#[test]
fn writable_error_log_leaves_the_fallback_untouched() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("logs");
    let mut fallback = Vec::new();
    collector::report_failure(&logs, at(7, 0, 0), &anyhow::anyhow!("x"), &mut fallback);
    assert!(fallback.is_empty());
    assert!(logs.join(ERROR_LOG).exists());
}
