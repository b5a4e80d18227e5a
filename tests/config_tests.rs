// Config loading and validation tests

use std::path::PathBuf;

use sysmon::config::{AppConfig, is_valid_source_tag};

const VALID_CONFIG: &str = r#"
[server]
port = 8050
host = "0.0.0.0"

[storage]
data_dir = "data/metrics"
reports_dir = "data/reports"
logs_dir = "data/logs"

[sources]
default = "native"
known = ["native", "alternate"]

[dashboard]
chart_window_hours = 24

[collector]
source = "native"
cpu_sample_ms = 1000
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 8050
host = "127.0.0.1"

[storage]
data_dir = "m"
reports_dir = "r"
logs_dir = "l"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8050);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.storage.data_dir, "data/metrics");
    assert_eq!(config.sources.default, "native");
    assert_eq!(config.sources.known, ["native", "alternate"]);
    assert_eq!(config.dashboard.chart_window_hours, 24);
    assert_eq!(config.collector.cpu_sample_ms, 1000);
}

#[test]
fn test_config_defaults_for_optional_sections() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("load_from_str");
    assert_eq!(config.sources.default, "native");
    assert_eq!(config.sources.known, ["native", "alternate"]);
    assert_eq!(config.dashboard.chart_window_hours, 24);
    assert_eq!(config.collector.source, "native");
    assert_eq!(config.collector.cpu_sample_ms, 1000);
    assert!(config.storage.history_dir.is_none());
}

#[test]
fn test_paths_default_history_under_data_dir() {
    let paths = AppConfig::load_from_str(MINIMAL_CONFIG).unwrap().paths();
    assert_eq!(paths.metrics_dir, PathBuf::from("m"));
    assert_eq!(paths.history_dir, PathBuf::from("m").join("history"));
    assert_eq!(paths.reports_dir, PathBuf::from("r"));
    assert_eq!(paths.logs_dir, PathBuf::from("l"));
}

#[test]
fn test_paths_explicit_history_dir() {
    let text = MINIMAL_CONFIG.replace("data_dir = \"m\"", "data_dir = \"m\"\nhistory_dir = \"h\"");
    let paths = AppConfig::load_from_str(&text).unwrap().paths();
    assert_eq!(paths.history_dir, PathBuf::from("h"));
}

#[test]
fn test_provision_creates_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().display().to_string();
    let text = MINIMAL_CONFIG
        .replace("\"m\"", &format!("\"{root}/m\""))
        .replace("\"r\"", &format!("\"{root}/r\""))
        .replace("\"l\"", &format!("\"{root}/l\""));
    let paths = AppConfig::load_from_str(&text).unwrap().paths();
    paths.provision().unwrap();
    paths.provision().unwrap();
    assert!(paths.history_dir.is_dir());
    assert!(paths.reports_dir.is_dir());
    assert!(paths.logs_dir.is_dir());
}

#[test]
fn test_config_load_from_missing_path_names_the_file() {
    let err = AppConfig::load_from_path(std::path::Path::new("/nonexistent/sysmon.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sysmon.toml"));
}

fn rejected(from: &str, to: &str, field: &str) {
    let bad = VALID_CONFIG.replace(from, to);
    assert_ne!(bad, VALID_CONFIG, "replacement {from:?} did not apply");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(
        err.to_string().contains(field),
        "expected {field:?} in {err}"
    );
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    rejected("port = 8050", "port = 0", "server.port");
}

#[test]
fn test_config_validation_rejects_empty_dirs() {
    rejected("data_dir = \"data/metrics\"", "data_dir = \"\"", "storage.data_dir");
    rejected("reports_dir = \"data/reports\"", "reports_dir = \"\"", "storage.reports_dir");
    rejected("logs_dir = \"data/logs\"", "logs_dir = \"\"", "storage.logs_dir");
    rejected(
        "logs_dir = \"data/logs\"",
        "logs_dir = \"data/logs\"\nhistory_dir = \"\"",
        "storage.history_dir",
    );
}

#[test]
fn test_config_validation_rejects_bad_source_tags() {
    rejected("default = \"native\"", "default = \"../etc\"", "sources.default");
    rejected(
        "known = [\"native\", \"alternate\"]",
        "known = []",
        "sources.known",
    );
    rejected(
        "known = [\"native\", \"alternate\"]",
        "known = [\"native\", \"a b\"]",
        "sources.known",
    );
    rejected(
        "source = \"native\"\ncpu",
        "source = \"x/y\"\ncpu",
        "collector.source",
    );
}

#[test]
fn test_config_validation_rejects_zero_intervals() {
    rejected("chart_window_hours = 24", "chart_window_hours = 0", "dashboard.chart_window_hours");
    rejected("cpu_sample_ms = 1000", "cpu_sample_ms = 0", "collector.cpu_sample_ms");
}

#[test]
fn test_source_tag_charset() {
    assert!(is_valid_source_tag("native"));
    assert!(is_valid_source_tag("wsl-2_host"));
    assert!(!is_valid_source_tag(""));
    assert!(!is_valid_source_tag("a.b"));
    assert!(!is_valid_source_tag("../x"));
    assert!(!is_valid_source_tag("nätive"));
}

#[test]
fn test_shipped_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
    AppConfig::load_from_path(&path).expect("config.toml");
}
