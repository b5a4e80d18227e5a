// Native collector document: the shape `sysmon-collect` writes, with GB/MB/MHz units.

use serde::{Deserialize, Serialize};

use super::de::f64_lenient;
use super::load::{LoadAverage, ProcessSample};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeSnapshot {
    #[serde(default)]
    pub timestamp: String,
    pub system: NativeSystem,
    pub cpu: NativeCpu,
    #[serde(default)]
    pub memory: NativeMemory,
    #[serde(default)]
    pub swap: NativeSwap,
    #[serde(default)]
    pub disk: Vec<NativeDisk>,
    #[serde(default)]
    pub network: NativeNetwork,
    #[serde(default)]
    pub gpu: Option<NativeGpu>,
    #[serde(default)]
    pub system_load: Option<NativeSystemLoad>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeSystem {
    pub hostname: String,
    pub platform: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCpu {
    #[serde(deserialize_with = "f64_lenient")]
    pub usage_percent: f64,
    pub count: u32,
    #[serde(default)]
    pub frequency_mhz: f64,
    /// `null` when no sensor could be read.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeMemory {
    pub total_gb: f64,
    pub used_gb: f64,
    pub available_gb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSwap {
    pub total_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeDisk {
    #[serde(default)]
    pub device: String,
    pub mountpoint: String,
    #[serde(default)]
    pub total_gb: f64,
    #[serde(default)]
    pub used_gb: f64,
    #[serde(default)]
    pub free_gb: f64,
    #[serde(default)]
    pub percent: f64,
}

/// Host-wide counters, summed across interfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeNetwork {
    pub bytes_sent_mb: f64,
    pub bytes_recv_mb: f64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeGpu {
    pub available: bool,
    pub name: String,
    pub temperature: f64,
    pub utilization: f64,
    pub memory_used_mb: f64,
    pub memory_total_mb: f64,
}

impl Default for NativeGpu {
    fn default() -> Self {
        Self {
            available: false,
            name: super::gpu::NO_GPU_NAME.to_string(),
            temperature: 0.0,
            utilization: 0.0,
            memory_used_mb: 0.0,
            memory_total_mb: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeSystemLoad {
    pub load_average: LoadAverage,
    pub total_processes: u64,
    pub running_processes: u64,
    pub sleeping_processes: u64,
    pub zombie_processes: u64,
    pub top_cpu_processes: Vec<ProcessSample>,
    pub timestamp: String,
}
