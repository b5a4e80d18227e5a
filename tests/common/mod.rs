// Shared test helpers
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use std::path::Path;
use sysmon::config::AppConfig;
use sysmon::snapshot_repo::HistoryFileName;

pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 16)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// A document in the native collector shape.
pub fn native_doc(timestamp: &str, cpu_percent: f64) -> Value {
    json!({
        "timestamp": timestamp,
        "system": {
            "hostname": "box",
            "platform": "Windows",
            "version": "10.0.19045",
            "architecture": "AMD64"
        },
        "cpu": {
            "usage_percent": cpu_percent,
            "count": 8,
            "frequency_mhz": 3600.0,
            "temperature": 52.5
        },
        "memory": {
            "total_gb": 15.87,
            "used_gb": 7.5,
            "available_gb": 8.37,
            "percent": 47.3
        },
        "swap": { "total_gb": 2.0, "used_gb": 0.5, "percent": 25.0 },
        "disk": [
            { "device": "C:\\", "mountpoint": "C:\\", "total_gb": 475.0, "used_gb": 300.25, "free_gb": 174.75, "percent": 63.2 },
            { "device": "D:\\", "mountpoint": "D:\\", "total_gb": 931.5, "used_gb": 900.0, "free_gb": 31.5, "percent": 96.6 }
        ],
        "network": {
            "bytes_sent_mb": 120.5,
            "bytes_recv_mb": 2048.25,
            "packets_sent": 1000,
            "packets_recv": 5000
        },
        "gpu": {
            "available": true,
            "name": "NVIDIA GeForce RTX 3080",
            "temperature": 54.0,
            "utilization": 17.0,
            "memory_used_mb": 1024.0,
            "memory_total_mb": 10240.0
        },
        "system_load": {
            "load_average": { "1min": 0.96, "5min": 0.96, "15min": 0.96 },
            "total_processes": 250,
            "running_processes": 3,
            "sleeping_processes": 240,
            "zombie_processes": 0,
            "top_cpu_processes": [
                { "name": "chrome.exe", "cpu_percent": 12.5, "memory_percent": 4.1 },
                { "name": "code.exe", "cpu_percent": 3.0, "memory_percent": 2.2 }
            ],
            "timestamp": timestamp
        }
    })
}

/// A document already in canonical shape.
pub fn canonical_doc(timestamp: &str, cpu_percent: f64, memory_percent: f64) -> Value {
    json!({
        "system_info": {
            "hostname": "vm",
            "platform": "Linux",
            "version": "6.6.87",
            "architecture": "x86_64",
            "collection_time": timestamp,
            "uptime_seconds": 3600
        },
        "cpu": {
            "usage_percent": cpu_percent,
            "temperature_celsius": "unknown",
            "core_count": 4,
            "model": "Intel(R) Core(TM) i7",
            "frequency_ghz": 2.4
        },
        "memory": {
            "total_bytes": 8_589_934_592u64,
            "used_bytes": 4_294_967_296u64,
            "available_bytes": 4_294_967_296u64,
            "usage_percent": memory_percent,
            "swap_total_bytes": 2_147_483_648u64,
            "swap_used_bytes": 0,
            "swap_usage_percent": 0.0
        },
        "disk": {
            "filesystems": [
                { "device": "/dev/sda1", "mount": "/", "total": 100, "used": 75, "available": 25, "usage_percent": 75.0 }
            ],
            "io_stats": { "reads_completed": 10, "writes_completed": 20, "bytes_read": 4096, "bytes_written": 8192 },
            "smart_status": "PASSED"
        },
        "network": {
            "interfaces": [
                { "interface": "eth0", "rx_bytes": 1_048_576, "tx_bytes": 2_097_152, "rx_packets": 10, "tx_packets": 20, "rx_errors": 0, "tx_errors": 0 },
                { "interface": "lo", "rx_bytes": 1_048_576, "tx_bytes": 1_048_576, "rx_packets": 5, "tx_packets": 5, "rx_errors": 0, "tx_errors": 0 }
            ],
            "active_connections": 12,
            "active_interface_names": ["eth0", "lo"]
        },
        "gpu": {
            "gpu": {
                "vendor": "None", "name": "No GPU detected", "count": 0,
                "utilization_percent": 0.0, "memory_used_bytes": 0, "memory_total_bytes": 0,
                "memory_percent": 0.0, "temperature_celsius": 0.0, "power_watts": 0.0
            },
            "timestamp": timestamp
        },
        "system_load": {
            "load_average": { "1min": 0.5, "5min": 0.4, "15min": 0.3 },
            "total_processes": 120,
            "running_processes": 2,
            "sleeping_processes": 118,
            "zombie_processes": 0,
            "top_cpu_processes": [],
            "timestamp": timestamp
        }
    })
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Writes `<dir>/<source>_metrics_<stamp>.json` and returns its name.
pub fn write_history(dir: &Path, source: &str, stamp: NaiveDateTime, value: &Value) -> String {
    let name = HistoryFileName::new(source, stamp).to_string();
    write_json(&dir.join(&name), value);
    name
}

/// Config rooted in `root`, with every directory inside it.
pub fn config_in(root: &Path) -> AppConfig {
    let toml = format!(
        r#"
[server]
port = 8080
host = "127.0.0.1"

[storage]
data_dir = "{data}"
reports_dir = "{reports}"
logs_dir = "{logs}"

[collector]
source = "native"
cpu_sample_ms = 250
"#,
        data = root.join("metrics").display(),
        reports = root.join("reports").display(),
        logs = root.join("logs").display(),
    );
    let config = AppConfig::load_from_str(&toml).unwrap();
    config.paths().provision().unwrap();
    config
}
