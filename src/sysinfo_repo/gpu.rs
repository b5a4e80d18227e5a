// NVIDIA GPU probe via nvidia-smi.

use std::time::Duration;

use tokio::process::Command;

use crate::error::ProbeError;
use crate::models::NativeGpu;

const NVIDIA_SMI: &str = "nvidia-smi";
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// First GPU reported by nvidia-smi. Any failure is a reason for absence, never fatal.
pub(super) async fn probe_nvidia() -> Result<NativeGpu, ProbeError> {
    let output = Command::new(NVIDIA_SMI)
        .args([
            "--query-gpu=gpu_name,temperature.gpu,utilization.gpu,memory.used,memory.total",
            "--format=csv,noheader,nounits",
        ])
        .kill_on_drop(true)
        .output();
    let output = tokio::time::timeout(PROBE_TIMEOUT, output)
        .await
        .map_err(|_| ProbeError::TimedOut(NVIDIA_SMI))?
        .map_err(|source| ProbeError::Spawn {
            command: NVIDIA_SMI,
            source,
        })?;
    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            command: NVIDIA_SMI,
            status: output.status,
        });
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or(ProbeError::NoReading)?;
    parse_query_line(line)
}

/// `name, temp, util, mem_used, mem_total` with units stripped (MiB for memory).
pub(super) fn parse_query_line(line: &str) -> Result<NativeGpu, ProbeError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[name, temp, util, used, total, ..] = fields.as_slice() else {
        return Err(ProbeError::Malformed(line.to_string()));
    };
    // "[N/A]" readings become 0 rather than failing the whole probe.
    let number = |s: &str| {
        s.trim_end_matches('%')
            .trim_end_matches("MiB")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0)
    };
    Ok(NativeGpu {
        available: true,
        name: name.to_string(),
        temperature: number(temp),
        utilization: number(util),
        memory_used_mb: number(used),
        memory_total_mb: number(total),
    })
}
