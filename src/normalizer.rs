// Schema normalizer: decodes a snapshot document (native or canonical shape)
// and converts it to the canonical schema. Unit conversion happens here and
// nowhere else.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DecodeError;
use crate::models::*;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Longest `top_cpu_processes` list a snapshot carries.
pub const MAX_TOP_PROCESSES: usize = 5;

/// Name of the single aggregate interface a native document maps to.
pub const AGGREGATE_INTERFACE: &str = "All";

/// GB → bytes, truncating the float product.
pub fn gb_to_bytes(gb: f64) -> u64 {
    (gb * GIB) as u64
}

/// MB → bytes, truncating the float product.
pub fn mb_to_bytes(mb: f64) -> u64 {
    (mb * MIB) as u64
}

pub fn mhz_to_ghz(mhz: f64) -> f64 {
    mhz / 1000.0
}

/// Strict decode: native shape first, then canonical. Extra fields are ignored.
pub fn decode(value: &Value) -> Result<RawSnapshot, DecodeError> {
    let native_err = match NativeSnapshot::deserialize(value) {
        Ok(native) => return Ok(RawSnapshot::Native(Box::new(native))),
        Err(e) => e,
    };
    match CanonicalSnapshot::deserialize(value) {
        Ok(canonical) => Ok(RawSnapshot::Canonical(Box::new(canonical))),
        Err(canonical_err) => Err(DecodeError::UnrecognizedShape {
            native: native_err.to_string(),
            canonical: canonical_err.to_string(),
        }),
    }
}

pub fn decode_text(text: &str) -> Result<RawSnapshot, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    let value: Value = serde_json::from_str(text)?;
    decode(&value)
}

pub fn normalize(raw: RawSnapshot) -> CanonicalSnapshot {
    match raw {
        RawSnapshot::Canonical(canonical) => *canonical,
        RawSnapshot::Native(native) => from_native(*native),
    }
}

/// `None` means "no data": empty text, invalid JSON, or an unrecognized shape.
pub fn normalize_text(text: &str) -> Option<CanonicalSnapshot> {
    match decode_text(text) {
        Ok(raw) => Some(normalize(raw)),
        Err(e) => {
            debug!(error = %e, "snapshot rejected");
            None
        }
    }
}

pub fn normalize_value(value: &Value) -> Option<CanonicalSnapshot> {
    match decode(value) {
        Ok(raw) => Some(normalize(raw)),
        Err(e) => {
            debug!(error = %e, "snapshot rejected");
            None
        }
    }
}

/// Highest-CPU processes first, missing percentages as 0. The sort is stable,
/// so equal values keep their input order.
pub fn top_cpu_processes(samples: impl IntoIterator<Item = ProcessSample>) -> Vec<TopProcess> {
    let mut procs: Vec<TopProcess> = samples
        .into_iter()
        .map(|p| TopProcess {
            name: p.name,
            cpu_percent: p.cpu_percent.unwrap_or(0.0),
            memory_percent: p.memory_percent.unwrap_or(0.0),
        })
        .collect();
    procs.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    procs.truncate(MAX_TOP_PROCESSES);
    procs
}

fn from_native(native: NativeSnapshot) -> CanonicalSnapshot {
    let NativeSnapshot {
        timestamp,
        system,
        cpu,
        memory,
        swap,
        disk,
        network,
        gpu,
        system_load,
    } = native;

    let filesystems = disk
        .into_iter()
        .map(|d| Filesystem {
            device: d.device,
            mount: d.mountpoint,
            total: gb_to_bytes(d.total_gb),
            used: gb_to_bytes(d.used_gb),
            available: gb_to_bytes(d.free_gb),
            usage_percent: d.percent,
        })
        .collect();

    let load = system_load.unwrap_or_default();

    CanonicalSnapshot {
        system_info: SystemInfo {
            hostname: system.hostname,
            platform: system.platform,
            version: system.version.unwrap_or_else(|| UNKNOWN.to_string()),
            architecture: system.architecture.unwrap_or_else(|| UNKNOWN.to_string()),
            collection_time: timestamp.clone(),
            uptime_seconds: 0,
        },
        cpu: CpuStats {
            usage_percent: cpu.usage_percent,
            temperature_celsius: cpu
                .temperature
                .map(Temperature::Celsius)
                .unwrap_or_default(),
            core_count: cpu.count.max(1),
            model: cpu.model.unwrap_or_else(|| UNKNOWN.to_string()),
            frequency_ghz: mhz_to_ghz(cpu.frequency_mhz),
        },
        memory: MemoryStats {
            total_bytes: gb_to_bytes(memory.total_gb),
            used_bytes: gb_to_bytes(memory.used_gb),
            available_bytes: gb_to_bytes(memory.available_gb),
            usage_percent: memory.percent,
            swap_total_bytes: gb_to_bytes(swap.total_gb),
            swap_used_bytes: gb_to_bytes(swap.used_gb),
            swap_usage_percent: swap.percent,
        },
        disk: DiskStats {
            filesystems,
            ..DiskStats::default()
        },
        network: NetworkStats {
            interfaces: vec![InterfaceStat {
                interface: AGGREGATE_INTERFACE.to_string(),
                rx_bytes: mb_to_bytes(network.bytes_recv_mb),
                tx_bytes: mb_to_bytes(network.bytes_sent_mb),
                rx_packets: network.packets_recv,
                tx_packets: network.packets_sent,
                rx_errors: 0,
                tx_errors: 0,
            }],
            active_connections: 0,
            active_interface_names: vec![AGGREGATE_INTERFACE.to_string()],
        },
        gpu: GpuSection {
            gpu: gpu_from_native(gpu.unwrap_or_default()),
            timestamp: timestamp.clone(),
        },
        system_load: SystemLoad {
            load_average: load.load_average,
            total_processes: load.total_processes,
            running_processes: load.running_processes,
            sleeping_processes: load.sleeping_processes,
            zombie_processes: load.zombie_processes,
            top_cpu_processes: top_cpu_processes(load.top_cpu_processes),
            timestamp,
        },
    }
}

fn gpu_from_native(gpu: NativeGpu) -> GpuStats {
    let memory_percent = if gpu.memory_total_mb > 0.0 {
        gpu.memory_used_mb / gpu.memory_total_mb * 100.0
    } else {
        0.0
    };
    let (vendor, count) = if gpu.available {
        ("NVIDIA", 1)
    } else {
        (NO_GPU_VENDOR, 0)
    };
    GpuStats {
        vendor: vendor.to_string(),
        name: gpu.name,
        count,
        utilization_percent: gpu.utilization,
        memory_used_bytes: mb_to_bytes(gpu.memory_used_mb),
        memory_total_bytes: mb_to_bytes(gpu.memory_total_mb),
        memory_percent,
        temperature_celsius: gpu.temperature,
        power_watts: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions_truncate() {
        assert_eq!(gb_to_bytes(1.0), 1_073_741_824);
        assert_eq!(gb_to_bytes(0.5), 536_870_912);
        assert_eq!(gb_to_bytes(15.87), (15.87 * GIB).floor() as u64);
        assert_eq!(mb_to_bytes(1.5), 1_572_864);
        assert_eq!(mhz_to_ghz(3600.0), 3.6);
    }

    #[test]
    fn negative_gb_clamps_to_zero() {
        assert_eq!(gb_to_bytes(-1.0), 0);
    }
}
