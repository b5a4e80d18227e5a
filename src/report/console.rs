// Collector console summary.

use super::format::format_bytes;
use crate::models::CanonicalSnapshot;

pub fn render(m: &CanonicalSnapshot) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();
    out.push_str(&format!("{rule}\nSYSTEM MONITOR\n{rule}\n"));
    out.push_str(&format!("\nTimestamp: {}\n", m.system_info.collection_time));
    out.push_str(&format!("Hostname:  {}\n", m.system_info.hostname));
    out.push_str(&format!(
        "Platform:  {} {}\n",
        m.system_info.platform, m.system_info.version
    ));

    out.push_str("\nCPU:\n");
    out.push_str(&format!("   Usage: {:.1}%\n", m.cpu.usage_percent));
    out.push_str(&format!("   Cores: {}\n", m.cpu.core_count));
    out.push_str(&format!(
        "   Frequency: {:.0} MHz\n",
        m.cpu.frequency_ghz * 1000.0
    ));
    if let Some(c) = m.cpu.temperature_celsius.celsius() {
        out.push_str(&format!("   Temperature: {c:.1}°C\n"));
    }

    let mem = &m.memory;
    out.push_str("\nMemory:\n");
    out.push_str(&format!("   Total: {}\n", format_bytes(mem.total_bytes as f64)));
    out.push_str(&format!(
        "   Used: {} ({:.1}%)\n",
        format_bytes(mem.used_bytes as f64),
        mem.usage_percent
    ));
    out.push_str(&format!(
        "   Available: {}\n",
        format_bytes(mem.available_bytes as f64)
    ));
    if mem.swap_total_bytes > 0 {
        out.push_str("\nSwap:\n");
        out.push_str(&format!(
            "   Total: {}\n",
            format_bytes(mem.swap_total_bytes as f64)
        ));
        out.push_str(&format!(
            "   Used: {} ({:.1}%)\n",
            format_bytes(mem.swap_used_bytes as f64),
            mem.swap_usage_percent
        ));
    }

    out.push_str("\nDisk Usage:\n");
    for fs in &m.disk.filesystems {
        out.push_str(&format!("   {} ({}):\n", fs.mount, fs.device));
        out.push_str(&format!("      Total: {}\n", format_bytes(fs.total as f64)));
        out.push_str(&format!(
            "      Used: {} ({:.1}%)\n",
            format_bytes(fs.used as f64),
            fs.usage_percent
        ));
        out.push_str(&format!(
            "      Free: {}\n",
            format_bytes(fs.available as f64)
        ));
    }

    out.push_str("\nNetwork:\n");
    for iface in &m.network.interfaces {
        out.push_str(&format!(
            "   {}: sent {} ({} packets), received {} ({} packets)\n",
            iface.interface,
            format_bytes(iface.tx_bytes as f64),
            iface.tx_packets,
            format_bytes(iface.rx_bytes as f64),
            iface.rx_packets
        ));
    }

    let gpu = &m.gpu.gpu;
    if gpu.count > 0 {
        out.push_str("\nGPU:\n");
        out.push_str(&format!("   Name: {}\n", gpu.name));
        out.push_str(&format!(
            "   Utilization: {:.1}%\n",
            gpu.utilization_percent
        ));
        out.push_str(&format!(
            "   Temperature: {:.1}°C\n",
            gpu.temperature_celsius
        ));
        out.push_str(&format!(
            "   Memory: {} / {}\n",
            format_bytes(gpu.memory_used_bytes as f64),
            format_bytes(gpu.memory_total_bytes as f64)
        ));
    }

    let load = &m.system_load;
    out.push_str("\nSystem Load:\n");
    out.push_str(&format!(
        "   Load Average: {:.2} (1min)\n",
        load.load_average.one
    ));
    out.push_str(&format!("   Total Processes: {}\n", load.total_processes));
    out.push_str(&format!(
        "   Running: {} | Sleeping: {}\n",
        load.running_processes, load.sleeping_processes
    ));
    if !load.top_cpu_processes.is_empty() {
        out.push_str("   Top CPU Processes:\n");
        for p in load.top_cpu_processes.iter().take(3) {
            out.push_str(&format!("      - {}: {:.1}%\n", p.name, p.cpu_percent));
        }
    }

    out.push_str(&format!("\n{rule}\n"));
    out
}
