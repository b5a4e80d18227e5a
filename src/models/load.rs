// Load average and process-table section of the canonical snapshot

use serde::{Deserialize, Serialize};

use super::de::{f64_lenient, null_default, u64_lenient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadAverage {
    #[serde(rename = "1min", deserialize_with = "f64_lenient")]
    pub one: f64,
    #[serde(rename = "5min", deserialize_with = "f64_lenient")]
    pub five: f64,
    #[serde(rename = "15min", deserialize_with = "f64_lenient")]
    pub fifteen: f64,
}

impl LoadAverage {
    /// Same value for all three windows, for platforms without load history.
    pub fn flat(value: f64) -> Self {
        Self {
            one: value,
            five: value,
            fifteen: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProcess {
    pub name: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub cpu_percent: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub memory_percent: f64,
}

/// One process-table row as seen by a collector; percentages may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSample {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemLoad {
    #[serde(deserialize_with = "null_default")]
    pub load_average: LoadAverage,
    #[serde(deserialize_with = "u64_lenient")]
    pub total_processes: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub running_processes: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub sleeping_processes: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub zombie_processes: u64,
    #[serde(deserialize_with = "null_default")]
    pub top_cpu_processes: Vec<TopProcess>,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: String,
}
