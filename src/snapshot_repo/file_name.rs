// History file names: `<source>_metrics_<YYYYMMDD>_<HHMMSS>.json`.
// Fixed-width, zero-padded components keep lexicographic order equal to time order.

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::FileNameError;

const MARKER: &str = "_metrics_";
const EXTENSION: &str = ".json";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFileName {
    pub source: String,
    pub timestamp: NaiveDateTime,
}

impl HistoryFileName {
    pub fn new(source: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            source: source.into(),
            timestamp,
        }
    }

    pub fn parse(name: &str) -> Result<Self, FileNameError> {
        let not_history = || FileNameError::NotHistoryFile(name.to_string());
        let stem = name.strip_suffix(EXTENSION).ok_or_else(not_history)?;
        let (source, stamp) = stem.rsplit_once(MARKER).ok_or_else(not_history)?;
        if source.is_empty() {
            return Err(not_history());
        }

        let bad_stamp = || FileNameError::BadTimestamp(name.to_string());
        let (date, time) = stamp.split_once('_').ok_or_else(bad_stamp)?;
        let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(date, 8) || !digits(time, 6) {
            return Err(bad_stamp());
        }
        let timestamp =
            NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).map_err(|_| bad_stamp())?;
        Ok(Self::new(source, timestamp))
    }
}

impl fmt::Display for HistoryFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.source,
            MARKER,
            self.timestamp.format(STAMP_FORMAT),
            EXTENSION
        )
    }
}
