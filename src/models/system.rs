// Host identity, CPU and memory sections of the canonical snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

use super::de::{f64_lenient, null_default, text_or_unknown, u32_lenient, u64_lenient};

/// Sentinel for text fields the collector could not determine.
pub const UNKNOWN: &str = "unknown";

pub(crate) fn unknown() -> String {
    UNKNOWN.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub version: String,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub architecture: String,
    /// ISO-8601 local time of collection.
    #[serde(deserialize_with = "null_default")]
    pub collection_time: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub uptime_seconds: u64,
}

/// CPU temperature in Celsius, or a text sentinel when no sensor answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Celsius(f64),
    Unavailable(String),
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature::Unavailable(unknown())
    }
}

impl Temperature {
    pub fn celsius(&self) -> Option<f64> {
        match self {
            Temperature::Celsius(c) => Some(*c),
            Temperature::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Celsius(c) => write!(f, "{c:.1}°C"),
            Temperature::Unavailable(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    #[serde(deserialize_with = "f64_lenient")]
    pub usage_percent: f64,
    /// `null` reads as the `"unknown"` sentinel.
    #[serde(default, deserialize_with = "null_default")]
    pub temperature_celsius: Temperature,
    #[serde(deserialize_with = "u32_lenient")]
    pub core_count: u32,
    #[serde(default = "unknown", deserialize_with = "text_or_unknown")]
    pub model: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub frequency_ghz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    #[serde(deserialize_with = "u64_lenient")]
    pub total_bytes: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub used_bytes: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub available_bytes: u64,
    #[serde(deserialize_with = "f64_lenient")]
    pub usage_percent: f64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub swap_total_bytes: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub swap_used_bytes: u64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub swap_usage_percent: f64,
}
