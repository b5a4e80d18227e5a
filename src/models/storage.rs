// Disk section of the canonical snapshot

use serde::{Deserialize, Serialize};

use super::de::{f64_lenient, null_default, text_or_unknown, u64_lenient};
use super::system::unknown;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filesystem {
    #[serde(default, deserialize_with = "null_default")]
    pub device: String,
    pub mount: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub total: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub used: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub available: u64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub usage_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoStats {
    #[serde(deserialize_with = "u64_lenient")]
    pub reads_completed: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub writes_completed: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub bytes_read: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub bytes_written: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskStats {
    #[serde(deserialize_with = "null_default")]
    pub filesystems: Vec<Filesystem>,
    #[serde(deserialize_with = "null_default")]
    pub io_stats: IoStats,
    #[serde(deserialize_with = "text_or_unknown")]
    pub smart_status: String,
}

impl Default for DiskStats {
    fn default() -> Self {
        Self {
            filesystems: Vec::new(),
            io_stats: IoStats::default(),
            smart_status: unknown(),
        }
    }
}
