// HTML report and dashboard pages. Plain string rendering; every value taken
// from a snapshot is escaped.

use chrono::NaiveDateTime;

use super::format::{escape_html as esc, format_bytes, format_uptime};
use crate::charts::UsageLevel;
use crate::models::CanonicalSnapshot;

const STYLE: &str = r#"<style>
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #2c3e50; background: #f7f9fb; }
h1, h2 { margin-bottom: .4rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.metric { font-size: 1.8rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; background: #fff; }
th, td { padding: .4rem .6rem; border-bottom: 1px solid #e5e8eb; text-align: left; }
.ok { color: #2ecc71; } .warning { color: #f39c12; } .critical { color: #e74c3c; }
.chart { min-height: 320px; }
</style>"#;

fn page(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
        esc(title),
        STYLE,
        head_extra,
        body
    )
}

fn level_class(usage_percent: f64) -> &'static str {
    UsageLevel::classify(usage_percent).as_str()
}

fn summary_cards(m: &CanonicalSnapshot) -> String {
    let mut out = String::from("<div class=\"grid\">\n");
    out.push_str(&format!(
        "<div class=\"card\"><h3>CPU</h3><div class=\"metric {}\">{:.1}%</div><p>{} cores @ {:.2} GHz<br>Temperature: {}</p></div>\n",
        level_class(m.cpu.usage_percent),
        m.cpu.usage_percent,
        m.cpu.core_count,
        m.cpu.frequency_ghz,
        esc(&m.cpu.temperature_celsius.to_string())
    ));
    out.push_str(&format!(
        "<div class=\"card\"><h3>Memory</h3><div class=\"metric {}\">{:.1}%</div><p>{} of {}<br>Swap: {} ({:.1}%)</p></div>\n",
        level_class(m.memory.usage_percent),
        m.memory.usage_percent,
        format_bytes(m.memory.used_bytes as f64),
        format_bytes(m.memory.total_bytes as f64),
        format_bytes(m.memory.swap_used_bytes as f64),
        m.memory.swap_usage_percent
    ));
    let load = &m.system_load;
    out.push_str(&format!(
        "<div class=\"card\"><h3>Load</h3><div class=\"metric\">{:.2}</div><p>5 min {:.2} · 15 min {:.2}<br>{} processes ({} running)</p></div>\n",
        load.load_average.one,
        load.load_average.five,
        load.load_average.fifteen,
        load.total_processes,
        load.running_processes
    ));
    let gpu = &m.gpu.gpu;
    out.push_str(&format!(
        "<div class=\"card\"><h3>GPU</h3><div class=\"metric\">{:.1}%</div><p>{} ({})<br>{} / {}</p></div>\n",
        gpu.utilization_percent,
        esc(&gpu.name),
        esc(&gpu.vendor),
        format_bytes(gpu.memory_used_bytes as f64),
        format_bytes(gpu.memory_total_bytes as f64)
    ));
    out.push_str("</div>\n");
    out
}

fn disk_table(m: &CanonicalSnapshot) -> String {
    let mut out = String::from(
        "<table>\n<tr><th>Mount</th><th>Device</th><th>Total</th><th>Used</th><th>Available</th><th>Usage</th></tr>\n",
    );
    for fs in &m.disk.filesystems {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{:.1}%</td></tr>\n",
            esc(&fs.mount),
            esc(&fs.device),
            format_bytes(fs.total as f64),
            format_bytes(fs.used as f64),
            format_bytes(fs.available as f64),
            level_class(fs.usage_percent),
            fs.usage_percent
        ));
    }
    out.push_str("</table>\n");
    out
}

fn network_table(m: &CanonicalSnapshot) -> String {
    let mut out = String::from(
        "<table>\n<tr><th>Interface</th><th>RX</th><th>TX</th><th>RX packets</th><th>TX packets</th><th>Errors</th></tr>\n",
    );
    for iface in &m.network.interfaces {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            esc(&iface.interface),
            format_bytes(iface.rx_bytes as f64),
            format_bytes(iface.tx_bytes as f64),
            iface.rx_packets,
            iface.tx_packets,
            iface.rx_errors + iface.tx_errors
        ));
    }
    out.push_str("</table>\n");
    out
}

fn process_table(m: &CanonicalSnapshot) -> String {
    let mut out =
        String::from("<table>\n<tr><th>Process</th><th>CPU %</th><th>Memory %</th></tr>\n");
    for p in &m.system_load.top_cpu_processes {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            esc(&p.name),
            p.cpu_percent,
            p.memory_percent
        ));
    }
    out.push_str("</table>\n");
    out
}

fn history_section(history: &[CanonicalSnapshot]) -> String {
    let mut out = String::from("<h2>History</h2>\n");
    if history.is_empty() {
        out.push_str("<p>No historical samples in the selected window.</p>\n");
        return out;
    }
    let cpu: Vec<f64> = history.iter().map(|s| s.cpu.usage_percent).collect();
    let avg = cpu.iter().sum::<f64>() / cpu.len() as f64;
    let peak = cpu.iter().copied().fold(f64::MIN, f64::max);
    out.push_str(&format!(
        "<p>{} samples · average CPU {:.1}% · peak CPU {:.1}%</p>\n",
        history.len(),
        avg,
        peak
    ));
    out.push_str("<table>\n<tr><th>Time</th><th>CPU %</th><th>Memory %</th><th>Swap %</th></tr>\n");
    for s in history {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr>\n",
            esc(&s.system_info.collection_time),
            s.cpu.usage_percent,
            s.memory.usage_percent,
            s.memory.swap_usage_percent
        ));
    }
    out.push_str("</table>\n");
    out
}

/// Full report for one source: latest snapshot plus the history window.
pub fn render(
    latest: &CanonicalSnapshot,
    history: &[CanonicalSnapshot],
    source: &str,
    generated_at: NaiveDateTime,
) -> String {
    let info = &latest.system_info;
    let mut body = format!(
        "<h1>System Monitoring Report ({})</h1>\n<p><strong>Generated:</strong> {} · <strong>Hostname:</strong> {} · <strong>Platform:</strong> {} {} ({})<br><strong>Collected:</strong> {} · <strong>Uptime:</strong> {}</p>\n",
        esc(&source.to_uppercase()),
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        esc(&info.hostname),
        esc(&info.platform),
        esc(&info.version),
        esc(&info.architecture),
        esc(&info.collection_time),
        format_uptime(info.uptime_seconds)
    );
    body.push_str(&summary_cards(latest));
    body.push_str("<h2>Disk</h2>\n");
    body.push_str(&disk_table(latest));
    body.push_str("<h2>Network</h2>\n");
    body.push_str(&network_table(latest));
    body.push_str("<h2>Top Processes</h2>\n");
    body.push_str(&process_table(latest));
    body.push_str(&history_section(history));
    page(&format!("System Report - {}", info.hostname), "", &body)
}

/// A source with data, shown as one dashboard panel.
pub struct DashboardPanel<'a> {
    pub source: &'a str,
    pub latest: &'a CanonicalSnapshot,
}

const PLOTLY_SCRIPT: &str =
    r#"<script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>"#;

const CHART_LOADER: &str = r#"<script>
document.querySelectorAll("[data-source]").forEach(function (panel) {
  var source = panel.dataset.source;
  fetch("/api/charts?source=" + encodeURIComponent(source))
    .then(function (r) { return r.ok ? r.json() : null; })
    .then(function (charts) {
      if (!charts) { return; }
      ["cpu", "memory", "disk", "network"].forEach(function (name) {
        var el = panel.querySelector(".chart-" + name);
        if (el) { Plotly.newPlot(el, charts[name].data, charts[name].layout, {responsive: true}); }
      });
    });
});
</script>"#;

pub fn dashboard(panels: &[DashboardPanel<'_>]) -> String {
    let mut body = String::from("<h1>System Monitor Dashboard</h1>\n");
    for panel in panels {
        let info = &panel.latest.system_info;
        body.push_str(&format!(
            "<section data-source=\"{src}\">\n<h2>{}</h2>\n<p>{} · {} · collected {} · <a href=\"/report/html?source={src}\">HTML report</a> · <a href=\"/report/markdown?source={src}\">Markdown</a></p>\n",
            esc(&panel.source.to_uppercase()),
            esc(&info.hostname),
            esc(&info.platform),
            esc(&info.collection_time),
            src = esc(panel.source)
        ));
        body.push_str(&summary_cards(panel.latest));
        body.push_str("<div class=\"grid\">\n");
        for name in ["cpu", "memory", "disk", "network"] {
            body.push_str(&format!(
                "<div class=\"card chart chart-{name}\"></div>\n"
            ));
        }
        body.push_str("</div>\n</section>\n");
    }
    body.push_str(CHART_LOADER);
    page("System Monitor Dashboard", PLOTLY_SCRIPT, &body)
}

/// Served with 503 when no collector has written anything yet.
pub fn no_data_page() -> String {
    page(
        "System Monitor Dashboard",
        "",
        "<h1>No metrics data available</h1>\n<p>Please run the collector first: <code>sysmon-collect</code></p>\n",
    )
}
