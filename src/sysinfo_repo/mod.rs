// Host probes via sysinfo, assembled into a native-shape snapshot document.

mod gpu;
mod linux;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;
use sysinfo::{Disks, Networks, ProcessStatus, ProcessesToUpdate, System};
use tracing::{debug, instrument};

use crate::models::*;
use crate::normalizer::top_cpu_processes;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Document timestamp format (ISO-8601, local time, microseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    cpu_sample: Duration,
}

impl SysinfoRepo {
    /// `cpu_sample` is the window CPU usage is averaged over (raised to sysinfo's minimum).
    pub fn new(cpu_sample: Duration) -> Self {
        Self {
            sys: Arc::new(Mutex::new(System::new_all())),
            cpu_sample: cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// One full probe of the host. Sensor and GPU probes that fail fall back
    /// to defaults; only a broken sysinfo task is an error.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "collect"))]
    pub async fn collect(&self, at: NaiveDateTime) -> anyhow::Result<NativeSnapshot> {
        let sys = self.sys.clone();
        let cpu_sample = self.cpu_sample;
        let timestamp = at.format(TIMESTAMP_FORMAT).to_string();

        let host_timestamp = timestamp.clone();
        let mut snapshot = tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            Ok::<_, anyhow::Error>(sample_host(&mut sys, cpu_sample, host_timestamp))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))??;

        snapshot.gpu = Some(match gpu::probe_nvidia().await {
            Ok(gpu) => gpu,
            Err(e) => {
                debug!(reason = %e, "no GPU reading");
                NativeGpu::default()
            }
        });
        Ok(snapshot)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / GIB, 2)
}

fn percent(part: u64, total: u64) -> f64 {
    if total > 0 {
        round_to(part as f64 / total as f64 * 100.0, 1)
    } else {
        0.0
    }
}

fn sample_host(sys: &mut System, cpu_sample: Duration, timestamp: String) -> NativeSnapshot {
    // Two refreshes bracket the sample window; usage is measured between them.
    sys.refresh_cpu_all();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    std::thread::sleep(cpu_sample);
    sys.refresh_cpu_all();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    sys.refresh_memory();

    let cpu_percent = round_to(sys.global_cpu_usage() as f64, 1);
    let core_count = sys.cpus().len() as u32;
    let temperature = match linux::read_cpu_temperature_linux() {
        Ok(t) => Some(round_to(t, 1)),
        Err(e) => {
            debug!(reason = %e, "no CPU temperature reading");
            None
        }
    };
    let model = linux::read_cpu_model_linux().or_else(|| {
        sys.cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|s| !s.is_empty())
    });

    NativeSnapshot {
        timestamp: timestamp.clone(),
        system: NativeSystem {
            hostname: System::host_name().unwrap_or_default(),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
            version: System::os_version().or_else(System::kernel_version),
            architecture: Some(std::env::consts::ARCH.to_string()),
        },
        cpu: NativeCpu {
            usage_percent: cpu_percent,
            count: core_count,
            frequency_mhz: sys.cpus().first().map(|c| c.frequency() as f64).unwrap_or(0.0),
            temperature,
            model,
        },
        memory: NativeMemory {
            total_gb: gb(sys.total_memory()),
            used_gb: gb(sys.used_memory()),
            available_gb: gb(sys.available_memory()),
            percent: percent(sys.used_memory(), sys.total_memory()),
        },
        swap: NativeSwap {
            total_gb: gb(sys.total_swap()),
            used_gb: gb(sys.used_swap()),
            percent: percent(sys.used_swap(), sys.total_swap()),
        },
        disk: sample_disks(),
        network: sample_network(),
        gpu: None,
        system_load: Some(sample_load(sys, cpu_percent, core_count, timestamp)),
    }
}

fn sample_disks() -> Vec<NativeDisk> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .map(|d| {
            let total = d.total_space();
            let free = d.available_space();
            let used = total.saturating_sub(free);
            NativeDisk {
                device: d.name().to_string_lossy().into_owned(),
                mountpoint: d.mount_point().to_string_lossy().into_owned(),
                total_gb: gb(total),
                used_gb: gb(used),
                free_gb: gb(free),
                percent: percent(used, total),
            }
        })
        .collect()
}

fn sample_network() -> NativeNetwork {
    let networks = Networks::new_with_refreshed_list();
    let (mut sent, mut recv, mut packets_sent, mut packets_recv) = (0u64, 0u64, 0u64, 0u64);
    for (_, data) in networks.list() {
        sent += data.total_transmitted();
        recv += data.total_received();
        packets_sent += data.total_packets_transmitted();
        packets_recv += data.total_packets_received();
    }
    NativeNetwork {
        bytes_sent_mb: round_to(sent as f64 / MIB, 2),
        bytes_recv_mb: round_to(recv as f64 / MIB, 2),
        packets_sent,
        packets_recv,
    }
}

fn sample_load(
    sys: &System,
    cpu_percent: f64,
    core_count: u32,
    timestamp: String,
) -> NativeSystemLoad {
    let total_memory = sys.total_memory();
    let mut running = 0;
    let mut sleeping = 0;
    let mut zombie = 0;
    let mut samples = Vec::with_capacity(sys.processes().len());
    for process in sys.processes().values() {
        match process.status() {
            ProcessStatus::Run => running += 1,
            ProcessStatus::Sleep | ProcessStatus::Idle => sleeping += 1,
            ProcessStatus::Zombie => zombie += 1,
            _ => {}
        }
        samples.push(ProcessSample {
            name: process.name().to_string_lossy().into_owned(),
            cpu_percent: Some(process.cpu_usage() as f64),
            memory_percent: Some(percent(process.memory(), total_memory)),
        });
    }

    // Platforms without a kernel load average report zeros; approximate from CPU usage.
    let load = System::load_average();
    let load_average = if load.one == 0.0 && load.five == 0.0 && load.fifteen == 0.0 {
        LoadAverage::flat(round_to(cpu_percent / 100.0 * core_count as f64, 2))
    } else {
        LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        }
    };

    let top = top_cpu_processes(samples)
        .into_iter()
        .map(|p| ProcessSample {
            name: p.name,
            cpu_percent: Some(round_to(p.cpu_percent, 1)),
            memory_percent: Some(p.memory_percent),
        })
        .collect();

    NativeSystemLoad {
        load_average,
        total_processes: sys.processes().len() as u64,
        running_processes: running,
        sleeping_processes: sleeping,
        zombie_processes: zombie,
        top_cpu_processes: top,
        timestamp,
    }
}
