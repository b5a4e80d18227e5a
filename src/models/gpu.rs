// GPU section of the canonical snapshot. Always fully shaped, even without a GPU.

use serde::{Deserialize, Deserializer, Serialize};

use super::de::{f64_lenient, null_default, u32_lenient, u64_lenient};

pub const NO_GPU_VENDOR: &str = "None";
pub const NO_GPU_NAME: &str = "No GPU detected";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuStats {
    #[serde(deserialize_with = "vendor_or_none")]
    pub vendor: String,
    #[serde(deserialize_with = "name_or_none")]
    pub name: String,
    #[serde(deserialize_with = "u32_lenient")]
    pub count: u32,
    #[serde(deserialize_with = "f64_lenient")]
    pub utilization_percent: f64,
    #[serde(deserialize_with = "u64_lenient")]
    pub memory_used_bytes: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub memory_total_bytes: u64,
    #[serde(deserialize_with = "f64_lenient")]
    pub memory_percent: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub temperature_celsius: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub power_watts: f64,
}

fn vendor_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| NO_GPU_VENDOR.to_string()))
}

fn name_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| NO_GPU_NAME.to_string()))
}

impl Default for GpuStats {
    fn default() -> Self {
        Self {
            vendor: NO_GPU_VENDOR.to_string(),
            name: NO_GPU_NAME.to_string(),
            count: 0,
            utilization_percent: 0.0,
            memory_used_bytes: 0,
            memory_total_bytes: 0,
            memory_percent: 0.0,
            temperature_celsius: 0.0,
            power_watts: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuSection {
    #[serde(deserialize_with = "null_default")]
    pub gpu: GpuStats,
    #[serde(deserialize_with = "null_default")]
    pub timestamp: String,
}
