// Typed errors at module seams. Application glue wraps these in anyhow.

use thiserror::Error;

/// Why a snapshot document could not be decoded. Readers map every variant to "no data".
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("snapshot document is empty")]
    Empty,
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognized snapshot shape (native: {native}; canonical: {canonical})")]
    UnrecognizedShape { native: String, canonical: String },
}

/// History file names follow `<source>_metrics_<YYYYMMDD>_<HHMMSS>.json`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileNameError {
    #[error("not a history file: {0}")]
    NotHistoryFile(String),
    #[error("bad timestamp in history file name: {0}")]
    BadTimestamp(String),
}

/// Reason a host probe produced no value. Callers fall back to a default.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("not supported on this platform")]
    Unsupported,
    #[error("{command} could not be started: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    CommandFailed {
        command: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("{0} timed out")]
    TimedOut(&'static str),
    #[error("no reading available")]
    NoReading,
    #[error("malformed probe output: {0}")]
    Malformed(String),
}
