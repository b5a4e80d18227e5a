// Chart series builder: pure projections of normalized snapshots into series,
// plus the plotly-shaped figures served by /api/charts.

use serde::Serialize;

use crate::models::CanonicalSnapshot;

const MIB: f64 = 1024.0 * 1024.0;

const WARNING_THRESHOLD: f64 = 70.0;
const CRITICAL_THRESHOLD: f64 = 90.0;

/// Disk usage tier. Thresholds are inclusive lower bounds: 70.0 is a warning,
/// 90.0 is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Ok,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn classify(usage_percent: f64) -> Self {
        if usage_percent >= CRITICAL_THRESHOLD {
            UsageLevel::Critical
        } else if usage_percent >= WARNING_THRESHOLD {
            UsageLevel::Warning
        } else {
            UsageLevel::Ok
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UsageLevel::Ok => "ok",
            UsageLevel::Warning => "warning",
            UsageLevel::Critical => "critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            UsageLevel::Ok => "#2ecc71",
            UsageLevel::Warning => "#f39c12",
            UsageLevel::Critical => "#e74c3c",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
}

/// Physical and swap usage; all three vectors have the history's length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemorySeries {
    pub timestamps: Vec<String>,
    pub physical: Vec<f64>,
    pub swap: Vec<f64>,
}

/// Totals across all interfaces, in MB. Summed in f64; counters may be any u64.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkSeries {
    pub timestamps: Vec<String>,
    pub rx_mb: Vec<f64>,
    pub tx_mb: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskBar {
    pub mount: String,
    pub usage_percent: f64,
    pub level: UsageLevel,
}

pub fn cpu_series(history: &[CanonicalSnapshot]) -> TimeSeries {
    TimeSeries {
        timestamps: timestamps(history),
        values: history.iter().map(|s| s.cpu.usage_percent).collect(),
    }
}

pub fn memory_series(history: &[CanonicalSnapshot]) -> MemorySeries {
    MemorySeries {
        timestamps: timestamps(history),
        physical: history.iter().map(|s| s.memory.usage_percent).collect(),
        swap: history.iter().map(|s| s.memory.swap_usage_percent).collect(),
    }
}

/// One bar per filesystem of the latest snapshot.
pub fn disk_bars(latest: &CanonicalSnapshot) -> Vec<DiskBar> {
    latest
        .disk
        .filesystems
        .iter()
        .map(|fs| DiskBar {
            mount: fs.mount.clone(),
            usage_percent: fs.usage_percent,
            level: UsageLevel::classify(fs.usage_percent),
        })
        .collect()
}

pub fn network_series(history: &[CanonicalSnapshot]) -> NetworkSeries {
    let totals = |f: fn(&crate::models::InterfaceStat) -> u64| -> Vec<f64> {
        history
            .iter()
            .map(|s| s.network.interfaces.iter().map(|i| f(i) as f64).sum::<f64>() / MIB)
            .collect()
    };
    NetworkSeries {
        timestamps: timestamps(history),
        rx_mb: totals(|i| i.rx_bytes),
        tx_mb: totals(|i| i.tx_bytes),
    }
}

fn timestamps(history: &[CanonicalSnapshot]) -> Vec<String> {
    history
        .iter()
        .map(|s| s.system_info.collection_time.clone())
        .collect()
}

// --- figures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
}

impl Trace {
    fn scatter(name: &'static str, x: Vec<String>, y: Vec<f64>, mode: &'static str) -> Self {
        Self {
            kind: TraceKind::Scatter,
            name: Some(name),
            x,
            y,
            mode: Some(mode),
            fill: None,
            line: None,
            marker: None,
            text: None,
            textposition: None,
        }
    }

    fn with_line(mut self, color: &'static str, width: Option<u32>) -> Self {
        self.line = Some(Line { color, width });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: &'static str,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub template: &'static str,
}

impl Layout {
    fn new(title: &'static str, x: &'static str, y: &'static str, range: Option<[f64; 2]>) -> Self {
        Self {
            title,
            xaxis: Axis {
                title: AxisTitle { text: x },
                range: None,
            },
            yaxis: Axis {
                title: AxisTitle { text: y },
                range,
            },
            template: "plotly_white",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

const PERCENT_RANGE: Option<[f64; 2]> = Some([0.0, 100.0]);

/// The four dashboard charts. Disk comes from the latest snapshot, the rest
/// from history.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    pub cpu: Figure,
    pub memory: Figure,
    pub disk: Figure,
    pub network: Figure,
}

impl ChartSet {
    pub fn build(latest: &CanonicalSnapshot, history: &[CanonicalSnapshot]) -> Self {
        Self {
            cpu: cpu_figure(&cpu_series(history)),
            memory: memory_figure(&memory_series(history)),
            disk: disk_figure(&disk_bars(latest)),
            network: network_figure(&network_series(history)),
        }
    }
}

fn cpu_figure(series: &TimeSeries) -> Figure {
    Figure {
        data: vec![
            Trace::scatter(
                "CPU Usage",
                series.timestamps.clone(),
                series.values.clone(),
                "lines+markers",
            )
            .with_line("#3498db", Some(2)),
        ],
        layout: Layout::new("CPU Usage Over Time", "Time", "Usage (%)", PERCENT_RANGE),
    }
}

fn memory_figure(series: &MemorySeries) -> Figure {
    Figure {
        data: vec![
            Trace::scatter(
                "Memory Usage",
                series.timestamps.clone(),
                series.physical.clone(),
                "lines+markers",
            )
            .with_line("#e74c3c", Some(2)),
            Trace::scatter(
                "Swap Usage",
                series.timestamps.clone(),
                series.swap.clone(),
                "lines+markers",
            )
            .with_line("#f39c12", Some(2)),
        ],
        layout: Layout::new("Memory Usage Over Time", "Time", "Usage (%)", PERCENT_RANGE),
    }
}

fn disk_figure(bars: &[DiskBar]) -> Figure {
    let trace = Trace {
        kind: TraceKind::Bar,
        name: None,
        x: bars.iter().map(|b| b.mount.clone()).collect(),
        y: bars.iter().map(|b| b.usage_percent).collect(),
        mode: None,
        fill: None,
        line: None,
        marker: Some(Marker {
            color: bars.iter().map(|b| b.level.color()).collect(),
        }),
        text: Some(
            bars.iter()
                .map(|b| format!("{:.1}%", b.usage_percent))
                .collect(),
        ),
        textposition: Some("outside"),
    };
    Figure {
        data: vec![trace],
        layout: Layout::new(
            "Disk Usage by Filesystem",
            "Mount Point",
            "Usage (%)",
            PERCENT_RANGE,
        ),
    }
}

fn network_figure(series: &NetworkSeries) -> Figure {
    let mut rx = Trace::scatter(
        "Received",
        series.timestamps.clone(),
        series.rx_mb.clone(),
        "lines",
    )
    .with_line("#3498db", None);
    rx.fill = Some("tozeroy");
    let mut tx = Trace::scatter(
        "Transmitted",
        series.timestamps.clone(),
        series.tx_mb.clone(),
        "lines",
    )
    .with_line("#e74c3c", None);
    tx.fill = Some("tozeroy");
    Figure {
        data: vec![rx, tx],
        layout: Layout::new("Network Traffic", "Time", "Data (MB)", None),
    }
}
