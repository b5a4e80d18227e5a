// File-backed snapshot store: latest files, timestamped history, and the
// time-windowed history loader. Everything read passes through the normalizer.

mod file_name;

pub use file_name::HistoryFileName;

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::AppConfig;
use crate::error::FileNameError;
use crate::models::CanonicalSnapshot;
use crate::normalizer;

/// Unkeyed alias of the most recent snapshot, kept for older readers.
pub const LATEST_ALIAS: &str = "latest.json";

pub fn latest_file_name(source: &str) -> String {
    format!("latest_{source}.json")
}

pub struct SnapshotRepo {
    metrics_dir: PathBuf,
    history_dir: PathBuf,
    known_sources: Vec<String>,
}

impl SnapshotRepo {
    pub fn new(
        metrics_dir: impl Into<PathBuf>,
        history_dir: impl Into<PathBuf>,
        known_sources: Vec<String>,
    ) -> Self {
        Self {
            metrics_dir: metrics_dir.into(),
            history_dir: history_dir.into(),
            known_sources,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let paths = config.paths();
        Self::new(
            paths.metrics_dir,
            paths.history_dir,
            config.sources.known.clone(),
        )
    }

    pub fn is_known(&self, source: &str) -> bool {
        self.known_sources.iter().any(|s| s == source)
    }

    pub fn known_sources(&self) -> &[String] {
        &self.known_sources
    }

    pub fn latest_path(&self, source: &str) -> PathBuf {
        if self.is_known(source) {
            self.metrics_dir.join(latest_file_name(source))
        } else {
            self.metrics_dir.join(LATEST_ALIAS)
        }
    }

    /// Latest snapshot for `source`; unknown tags read the `latest.json` alias.
    #[instrument(skip(self), fields(repo = "snapshot", operation = "load_latest"))]
    pub fn load_latest(&self, source: &str) -> Option<CanonicalSnapshot> {
        read_snapshot(&self.latest_path(source))
    }

    #[instrument(skip(self), fields(repo = "snapshot", operation = "load_history"))]
    pub fn load_history(&self, source: &str, window: TimeDelta) -> Vec<CanonicalSnapshot> {
        self.load_history_at(source, window, chrono::Local::now().naive_local())
    }

    /// Snapshots whose file-name timestamp lies in `[now - window, ∞)`, oldest first.
    /// The timestamp inside the document is never consulted.
    pub fn load_history_at(
        &self,
        source: &str,
        window: TimeDelta,
        now: NaiveDateTime,
    ) -> Vec<CanonicalSnapshot> {
        if window <= TimeDelta::zero() {
            return Vec::new();
        }
        let cutoff = now.checked_sub_signed(window).unwrap_or(NaiveDateTime::MIN);
        let filter = self.is_known(source).then_some(source);

        let mut files = self.history_files(filter);
        files.retain(|(name, _)| name.timestamp >= cutoff);
        files.sort_by(|(a, pa), (b, pb)| a.timestamp.cmp(&b.timestamp).then_with(|| pa.cmp(pb)));

        let out: Vec<CanonicalSnapshot> = files
            .iter()
            .filter_map(|(_, path)| read_snapshot(path))
            .collect();
        debug!(
            source,
            candidates = files.len(),
            loaded = out.len(),
            "history loaded"
        );
        out
    }

    /// History files for one source, or for every source when `source` is `None`.
    fn history_files(&self, source: Option<&str>) -> Vec<(HistoryFileName, PathBuf)> {
        let entries = match std::fs::read_dir(&self.history_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(error = %e, dir = %self.history_dir.display(), "history directory unreadable");
                return Vec::new();
            }
        };

        let mut out = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match HistoryFileName::parse(name) {
                Ok(parsed) => {
                    if source.is_none_or(|s| parsed.source == s) {
                        out.push((parsed, entry.path()));
                    }
                }
                Err(FileNameError::NotHistoryFile(_)) => {}
                Err(e) => debug!(error = %e, "skipping history file"),
            }
        }
        out
    }

    /// Writes `latest_<source>.json`, the `latest.json` alias and a new history
    /// file. Latest files are overwritten in place; history files never are.
    #[instrument(skip(self, snapshot), fields(repo = "snapshot", operation = "publish"))]
    pub fn publish<T: Serialize>(
        &self,
        source: &str,
        snapshot: &T,
        at: NaiveDateTime,
    ) -> anyhow::Result<PathBuf> {
        let json = serde_json::to_string_pretty(snapshot)?;

        let latest = self.metrics_dir.join(latest_file_name(source));
        std::fs::write(&latest, &json)
            .with_context(|| format!("writing {}", latest.display()))?;
        let alias = self.metrics_dir.join(LATEST_ALIAS);
        std::fs::write(&alias, &json).with_context(|| format!("writing {}", alias.display()))?;

        let history = self
            .history_dir
            .join(HistoryFileName::new(source, at).to_string());
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&history)
            .with_context(|| format!("creating {}", history.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("writing {}", history.display()))?;

        debug!(latest = %latest.display(), history = %history.display(), "snapshot published");
        Ok(history)
    }
}

/// Missing, unreadable, or unparseable files are all "no data".
fn read_snapshot(path: &Path) -> Option<CanonicalSnapshot> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "snapshot file missing");
            return None;
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "snapshot file unreadable");
            return None;
        }
    };
    let snapshot = normalizer::normalize_text(&text);
    if snapshot.is_none() {
        warn!(path = %path.display(), "skipping unparseable snapshot file");
    }
    snapshot
}
