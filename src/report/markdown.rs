// Markdown report for one snapshot.

use chrono::NaiveDateTime;

use super::format::format_bytes;
use crate::models::CanonicalSnapshot;

pub fn render(metrics: &CanonicalSnapshot, source: &str, generated_at: NaiveDateTime) -> String {
    let info = &metrics.system_info;
    let cpu = &metrics.cpu;
    let mem = &metrics.memory;
    let load = &metrics.system_load;
    let gpu = &metrics.gpu.gpu;

    let mut out = String::new();
    out.push_str(&format!(
        "# System Monitoring Report ({})\n\n",
        source.to_uppercase()
    ));
    out.push_str(&format!(
        "**Generated:** {}  \n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("**Hostname:** {}  \n", info.hostname));
    out.push_str(&format!("**Platform:** {}\n\n", info.platform));

    out.push_str("## System Overview\n\n");
    out.push_str(&format!("- **Architecture:** {}\n", info.architecture));
    out.push_str(&format!("- **CPU Cores:** {}\n", cpu.core_count));
    out.push_str(&format!("- **CPU Frequency:** {:.2} GHz\n\n", cpu.frequency_ghz));

    out.push_str("## Current Metrics\n\n### CPU\n");
    out.push_str(&format!("- **Usage:** {:.1}%\n", cpu.usage_percent));
    out.push_str(&format!("- **Temperature:** {}\n", cpu.temperature_celsius));
    out.push_str(&format!("- **Frequency:** {:.2} GHz\n\n", cpu.frequency_ghz));

    out.push_str("### Memory\n");
    out.push_str(&format!("- **Total:** {}\n", format_bytes(mem.total_bytes as f64)));
    out.push_str(&format!(
        "- **Used:** {} ({:.1}%)\n",
        format_bytes(mem.used_bytes as f64),
        mem.usage_percent
    ));
    out.push_str(&format!(
        "- **Available:** {}\n",
        format_bytes(mem.available_bytes as f64)
    ));
    out.push_str(&format!(
        "- **Swap Used:** {} ({:.1}%)\n\n",
        format_bytes(mem.swap_used_bytes as f64),
        mem.swap_usage_percent
    ));

    out.push_str("### Disk\n");
    for fs in &metrics.disk.filesystems {
        out.push_str(&format!("\n#### {}\n", fs.mount));
        out.push_str(&format!("- **Device:** {}\n", fs.device));
        out.push_str(&format!("- **Total:** {}\n", format_bytes(fs.total as f64)));
        out.push_str(&format!(
            "- **Used:** {} ({:.2}%)\n",
            format_bytes(fs.used as f64),
            fs.usage_percent
        ));
        out.push_str(&format!(
            "- **Available:** {}\n",
            format_bytes(fs.available as f64)
        ));
    }

    out.push_str("\n### Network\n");
    for iface in &metrics.network.interfaces {
        out.push_str(&format!("#### {}\n", iface.interface));
        out.push_str(&format!(
            "- **RX:** {} ({} packets, {} errors)\n",
            format_bytes(iface.rx_bytes as f64),
            iface.rx_packets,
            iface.rx_errors
        ));
        out.push_str(&format!(
            "- **TX:** {} ({} packets, {} errors)\n\n",
            format_bytes(iface.tx_bytes as f64),
            iface.tx_packets,
            iface.tx_errors
        ));
    }

    out.push_str("\n### System Load\n");
    out.push_str(&format!("- **1 min:** {:.2}\n", load.load_average.one));
    out.push_str(&format!("- **5 min:** {:.2}\n", load.load_average.five));
    out.push_str(&format!("- **15 min:** {:.2}\n", load.load_average.fifteen));
    out.push_str(&format!("- **Total Processes:** {}\n", load.total_processes));
    out.push_str(&format!("- **Running:** {}\n", load.running_processes));
    out.push_str(&format!("- **Sleeping:** {}\n", load.sleeping_processes));
    if !load.top_cpu_processes.is_empty() {
        out.push_str("\n| Process | CPU % | Memory % |\n|---|---:|---:|\n");
        for p in &load.top_cpu_processes {
            out.push_str(&format!(
                "| {} | {:.1} | {:.1} |\n",
                p.name.replace('|', "\\|"),
                p.cpu_percent,
                p.memory_percent
            ));
        }
    }

    out.push_str("\n### GPU\n");
    out.push_str(&format!("- **Vendor:** {}\n", gpu.vendor));
    out.push_str(&format!("- **Name:** {}\n", gpu.name));
    out.push_str(&format!(
        "- **Utilization:** {:.1}%\n",
        gpu.utilization_percent
    ));
    out.push_str(&format!(
        "- **Temperature:** {:.1}°C\n",
        gpu.temperature_celsius
    ));
    out.push_str(&format!(
        "- **Memory:** {} / {}\n\n",
        format_bytes(gpu.memory_used_bytes as f64),
        format_bytes(gpu.memory_total_bytes as f64)
    ));

    out.push_str("---\n\n*Report generated by System Monitor Dashboard*  \n");
    out.push_str(&format!("*Timestamp: {}*\n", info.collection_time));
    out
}
