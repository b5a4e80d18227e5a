// Generated-input checks for the normalizer: canonical identity, exact unit
// conversion and the top-process rule

mod common;

use common::native_doc;
use proptest::prelude::*;
use serde_json::json;
use sysmon::models::*;
use sysmon::normalizer::{MAX_TOP_PROCESSES, normalize_text, normalize_value, top_cpu_processes};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

fn finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ./:_()-]{0,16}"
}

fn temperature() -> impl Strategy<Value = Temperature> {
    prop_oneof![
        finite().prop_map(Temperature::Celsius),
        text().prop_map(Temperature::Unavailable),
    ]
}

fn system_info() -> impl Strategy<Value = SystemInfo> {
    (text(), text(), text(), text(), text(), any::<u64>()).prop_map(
        |(hostname, platform, version, architecture, collection_time, uptime_seconds)| SystemInfo {
            hostname,
            platform,
            version,
            architecture,
            collection_time,
            uptime_seconds,
        },
    )
}

fn cpu() -> impl Strategy<Value = CpuStats> {
    (finite(), temperature(), any::<u32>(), text(), finite()).prop_map(
        |(usage_percent, temperature_celsius, core_count, model, frequency_ghz)| CpuStats {
            usage_percent,
            temperature_celsius,
            core_count,
            model,
            frequency_ghz,
        },
    )
}

fn memory() -> impl Strategy<Value = MemoryStats> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        finite(),
        any::<u64>(),
        any::<u64>(),
        finite(),
    )
        .prop_map(|(total, used, available, usage, swap_total, swap_used, swap_usage)| MemoryStats {
            total_bytes: total,
            used_bytes: used,
            available_bytes: available,
            usage_percent: usage,
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_used,
            swap_usage_percent: swap_usage,
        })
}

fn disk() -> impl Strategy<Value = DiskStats> {
    let filesystem = (text(), text(), any::<u64>(), any::<u64>(), any::<u64>(), finite()).prop_map(
        |(device, mount, total, used, available, usage_percent)| Filesystem {
            device,
            mount,
            total,
            used,
            available,
            usage_percent,
        },
    );
    let io = any::<[u64; 4]>().prop_map(|[r, w, br, bw]| IoStats {
        reads_completed: r,
        writes_completed: w,
        bytes_read: br,
        bytes_written: bw,
    });
    (prop::collection::vec(filesystem, 0..4), io, text()).prop_map(
        |(filesystems, io_stats, smart_status)| DiskStats {
            filesystems,
            io_stats,
            smart_status,
        },
    )
}

fn network() -> impl Strategy<Value = NetworkStats> {
    let interface = (text(), any::<[u64; 6]>()).prop_map(|(interface, c)| InterfaceStat {
        interface,
        rx_bytes: c[0],
        tx_bytes: c[1],
        rx_packets: c[2],
        tx_packets: c[3],
        rx_errors: c[4],
        tx_errors: c[5],
    });
    (
        prop::collection::vec(interface, 0..4),
        any::<u64>(),
        prop::collection::vec(text(), 0..4),
    )
        .prop_map(|(interfaces, active_connections, active_interface_names)| NetworkStats {
            interfaces,
            active_connections,
            active_interface_names,
        })
}

fn gpu() -> impl Strategy<Value = GpuSection> {
    (
        text(),
        text(),
        any::<u32>(),
        finite(),
        any::<u64>(),
        any::<u64>(),
        finite(),
        finite(),
        finite(),
        text(),
    )
        .prop_map(
            |(vendor, name, count, util, used, total, mem_pct, temp, power, timestamp)| GpuSection {
                gpu: GpuStats {
                    vendor,
                    name,
                    count,
                    utilization_percent: util,
                    memory_used_bytes: used,
                    memory_total_bytes: total,
                    memory_percent: mem_pct,
                    temperature_celsius: temp,
                    power_watts: power,
                },
                timestamp,
            },
        )
}

fn system_load() -> impl Strategy<Value = SystemLoad> {
    let process = (text(), finite(), finite()).prop_map(|(name, cpu_percent, memory_percent)| {
        TopProcess {
            name,
            cpu_percent,
            memory_percent,
        }
    });
    (
        (finite(), finite(), finite()),
        any::<[u64; 4]>(),
        prop::collection::vec(process, 0..=MAX_TOP_PROCESSES),
        text(),
    )
        .prop_map(|((one, five, fifteen), counts, top_cpu_processes, timestamp)| SystemLoad {
            load_average: LoadAverage { one, five, fifteen },
            total_processes: counts[0],
            running_processes: counts[1],
            sleeping_processes: counts[2],
            zombie_processes: counts[3],
            top_cpu_processes,
            timestamp,
        })
}

fn canonical_snapshot() -> impl Strategy<Value = CanonicalSnapshot> {
    (
        system_info(),
        cpu(),
        memory(),
        disk(),
        network(),
        gpu(),
        system_load(),
    )
        .prop_map(
            |(system_info, cpu, memory, disk, network, gpu, system_load)| CanonicalSnapshot {
                system_info,
                cpu,
                memory,
                disk,
                network,
                gpu,
                system_load,
            },
        )
}

proptest! {
    #[test]
    fn canonical_value_is_identity(snapshot in canonical_snapshot()) {
        let value = serde_json::to_value(&snapshot).unwrap();
        prop_assert_eq!(normalize_value(&value), Some(snapshot));
    }

    #[test]
    fn canonical_text_is_identity(snapshot in canonical_snapshot()) {
        let text = serde_json::to_string(&snapshot).unwrap();
        prop_assert_eq!(normalize_text(&text), Some(snapshot));
    }

    #[test]
    fn gigabytes_truncate_to_bytes(
        total_gb in 0.0f64..1.0e6,
        used_gb in 0.0f64..1.0e6,
        swap_gb in 0.0f64..1.0e4,
    ) {
        let mut doc = native_doc("t", 1.0);
        doc["memory"]["total_gb"] = json!(total_gb);
        doc["memory"]["used_gb"] = json!(used_gb);
        doc["swap"]["total_gb"] = json!(swap_gb);
        doc["disk"][0]["total_gb"] = json!(total_gb);

        let s = normalize_value(&doc).unwrap();
        prop_assert_eq!(s.memory.total_bytes, (total_gb * GIB).floor() as u64);
        prop_assert_eq!(s.memory.used_bytes, (used_gb * GIB).floor() as u64);
        prop_assert_eq!(s.memory.swap_total_bytes, (swap_gb * GIB).floor() as u64);
        prop_assert_eq!(s.disk.filesystems[0].total, (total_gb * GIB).floor() as u64);
        prop_assert!(s.memory.total_bytes as f64 <= total_gb * GIB);
    }

    #[test]
    fn megabytes_truncate_to_bytes(recv_mb in 0.0f64..1.0e9, sent_mb in 0.0f64..1.0e9) {
        let mut doc = native_doc("t", 1.0);
        doc["network"]["bytes_recv_mb"] = json!(recv_mb);
        doc["network"]["bytes_sent_mb"] = json!(sent_mb);

        let s = normalize_value(&doc).unwrap();
        prop_assert_eq!(s.network.interfaces[0].rx_bytes, (recv_mb * MIB).floor() as u64);
        prop_assert_eq!(s.network.interfaces[0].tx_bytes, (sent_mb * MIB).floor() as u64);
    }

    #[test]
    fn top_processes_are_capped_and_descending(
        cpu in prop::collection::vec(prop::option::of(0.0f64..400.0), 0..20),
    ) {
        let samples = cpu.iter().enumerate().map(|(i, c)| ProcessSample {
            name: format!("p{i}"),
            cpu_percent: *c,
            memory_percent: None,
        });
        let top = top_cpu_processes(samples);

        prop_assert_eq!(top.len(), cpu.len().min(MAX_TOP_PROCESSES));
        for pair in top.windows(2) {
            prop_assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
            if pair[0].cpu_percent == pair[1].cpu_percent {
                // Equal values keep input order.
                let index = |p: &TopProcess| p.name[1..].parse::<usize>().unwrap();
                prop_assert!(index(&pair[0]) < index(&pair[1]));
            }
        }
    }
}
