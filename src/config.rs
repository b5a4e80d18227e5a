use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Holds `latest_<source>.json` and the `latest.json` alias.
    pub data_dir: String,
    /// Timestamped history files; defaults to `<data_dir>/history`.
    #[serde(default)]
    pub history_dir: Option<String>,
    pub reports_dir: String,
    pub logs_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Source tag used when a request does not name one.
    #[serde(default = "default_source")]
    pub default: String,
    /// Tags with their own latest/history files. Other tags read across all sources.
    #[serde(default = "default_known_sources")]
    pub known: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            default: default_source(),
            known: default_known_sources(),
        }
    }
}

fn default_source() -> String {
    "native".into()
}

fn default_known_sources() -> Vec<String> {
    vec!["native".into(), "alternate".into()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Look-back window for `/api/charts` and the HTML report history.
    #[serde(default = "default_chart_window_hours")]
    pub chart_window_hours: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_window_hours: default_chart_window_hours(),
        }
    }
}

fn default_chart_window_hours() -> u32 {
    24
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_source")]
    pub source: String,
    /// CPU usage is averaged over this interval.
    #[serde(default = "default_cpu_sample_ms")]
    pub cpu_sample_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            cpu_sample_ms: default_cpu_sample_ms(),
        }
    }
}

fn default_cpu_sample_ms() -> u64 {
    1000
}

/// Filesystem layout derived from `[storage]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub metrics_dir: PathBuf,
    pub history_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Paths {
    /// Creates every directory once at process start.
    pub fn provision(&self) -> anyhow::Result<()> {
        for dir in [
            &self.metrics_dir,
            &self.history_dir,
            &self.reports_dir,
            &self.logs_dir,
        ] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        Ok(())
    }
}

/// Source tags end up in file names: ASCII letters, digits, `-` and `_` only.
pub fn is_valid_source_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(Path::new(&path))
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn paths(&self) -> Paths {
        let metrics_dir = PathBuf::from(&self.storage.data_dir);
        let history_dir = self
            .storage
            .history_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| metrics_dir.join("history"));
        Paths {
            metrics_dir,
            history_dir,
            reports_dir: PathBuf::from(&self.storage.reports_dir),
            logs_dir: PathBuf::from(&self.storage.logs_dir),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.storage.data_dir.is_empty(),
            "storage.data_dir must be non-empty"
        );
        anyhow::ensure!(
            self.storage.history_dir.as_deref() != Some(""),
            "storage.history_dir must be non-empty when set"
        );
        anyhow::ensure!(
            !self.storage.reports_dir.is_empty(),
            "storage.reports_dir must be non-empty"
        );
        anyhow::ensure!(
            !self.storage.logs_dir.is_empty(),
            "storage.logs_dir must be non-empty"
        );
        anyhow::ensure!(
            is_valid_source_tag(&self.sources.default),
            "sources.default must be a non-empty tag of [A-Za-z0-9_-], got {:?}",
            self.sources.default
        );
        anyhow::ensure!(
            !self.sources.known.is_empty(),
            "sources.known must list at least one tag"
        );
        for tag in &self.sources.known {
            anyhow::ensure!(
                is_valid_source_tag(tag),
                "sources.known entries must be tags of [A-Za-z0-9_-], got {:?}",
                tag
            );
        }
        anyhow::ensure!(
            self.dashboard.chart_window_hours > 0,
            "dashboard.chart_window_hours must be > 0, got {}",
            self.dashboard.chart_window_hours
        );
        anyhow::ensure!(
            is_valid_source_tag(&self.collector.source),
            "collector.source must be a non-empty tag of [A-Za-z0-9_-], got {:?}",
            self.collector.source
        );
        anyhow::ensure!(
            self.collector.cpu_sample_ms > 0,
            "collector.cpu_sample_ms must be > 0, got {}",
            self.collector.cpu_sample_ms
        );
        Ok(())
    }
}
