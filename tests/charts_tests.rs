// Chart series builder and the /api/charts figure payload

mod common;

use common::{canonical_doc, native_doc};
use serde_json::json;
use sysmon::charts::{self, ChartSet, UsageLevel};
use sysmon::models::CanonicalSnapshot;
use sysmon::normalizer::normalize_value;

fn canonical(ts: &str, cpu: f64, mem: f64) -> CanonicalSnapshot {
    normalize_value(&canonical_doc(ts, cpu, mem)).unwrap()
}

#[test]
fn usage_levels_use_inclusive_lower_bounds() {
    assert_eq!(UsageLevel::classify(0.0), UsageLevel::Ok);
    assert_eq!(UsageLevel::classify(69.999), UsageLevel::Ok);
    assert_eq!(UsageLevel::classify(70.0), UsageLevel::Warning);
    assert_eq!(UsageLevel::classify(89.999), UsageLevel::Warning);
    assert_eq!(UsageLevel::classify(90.0), UsageLevel::Critical);
    assert_eq!(UsageLevel::classify(100.0), UsageLevel::Critical);
    assert_eq!(UsageLevel::Warning.as_str(), "warning");
}

#[test]
fn cpu_and_memory_series_follow_history_order() {
    let mut b = canonical("t2", 20.0, 60.0);
    b.memory.swap_usage_percent = 5.0;
    let history = vec![canonical("t1", 10.0, 50.0), b, canonical("t3", 30.0, 70.0)];

    let cpu = charts::cpu_series(&history);
    assert_eq!(cpu.timestamps, ["t1", "t2", "t3"]);
    assert_eq!(cpu.values, [10.0, 20.0, 30.0]);

    let mem = charts::memory_series(&history);
    assert_eq!(mem.timestamps.len(), 3);
    assert_eq!(mem.physical, [50.0, 60.0, 70.0]);
    assert_eq!(mem.swap, [0.0, 5.0, 0.0]);
}

#[test]
fn empty_history_gives_empty_series() {
    let series = charts::network_series(&[]);
    assert!(series.timestamps.is_empty());
    assert!(series.rx_mb.is_empty());
    assert!(charts::cpu_series(&[]).values.is_empty());
}

#[test]
fn network_series_sums_interfaces_in_megabytes() {
    // eth0 + lo: rx 1 MiB + 1 MiB, tx 2 MiB + 1 MiB
    let history = vec![canonical("t1", 1.0, 1.0)];
    let series = charts::network_series(&history);
    assert_eq!(series.rx_mb, [2.0]);
    assert_eq!(series.tx_mb, [3.0]);

    let native = normalize_value(&native_doc("t", 1.0)).unwrap();
    let series = charts::network_series(std::slice::from_ref(&native));
    assert_eq!(series.rx_mb, [2048.25]);
    assert_eq!(series.tx_mb, [120.5]);
}

#[test]
fn disk_bars_come_from_latest_only() {
    let latest = normalize_value(&native_doc("t", 1.0)).unwrap();
    let bars = charts::disk_bars(&latest);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].mount, "C:\\");
    assert_eq!(bars[0].level, UsageLevel::Ok);
    assert_eq!(bars[1].level, UsageLevel::Critical);

    let mut doc = canonical_doc("t", 1.0, 1.0);
    doc["disk"]["filesystems"] = json!([]);
    let bare = normalize_value(&doc).unwrap();
    let set = ChartSet::build(&bare, std::slice::from_ref(&latest));
    assert!(set.disk.data[0].x.is_empty());
}

#[test]
fn chart_set_serializes_four_plotly_figures() {
    let latest = canonical("t2", 20.0, 40.0);
    let history = vec![canonical("t1", 10.0, 30.0), latest.clone()];
    let value = serde_json::to_value(ChartSet::build(&latest, &history)).unwrap();

    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
    for name in ["cpu", "memory", "disk", "network"] {
        assert!(value[name]["data"].is_array(), "{name}");
        assert!(value[name]["layout"]["title"].is_string(), "{name}");
    }

    assert_eq!(value["cpu"]["data"][0]["type"], "scatter");
    assert_eq!(value["cpu"]["data"][0]["y"], json!([10.0, 20.0]));
    assert_eq!(value["cpu"]["layout"]["yaxis"]["range"], json!([0.0, 100.0]));
    assert_eq!(value["memory"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(value["disk"]["data"][0]["type"], "bar");
    assert_eq!(value["disk"]["data"][0]["marker"]["color"], json!(["#f39c12"]));
    assert_eq!(value["disk"]["data"][0]["text"], json!(["75.0%"]));
    assert_eq!(value["network"]["data"][0]["fill"], "tozeroy");
    assert!(value["network"]["layout"]["yaxis"].get("range").is_none());
}

#[test]
fn network_totals_do_not_overflow_on_huge_counters() {
    let mut doc = canonical_doc("t", 1.0, 1.0);
    doc["network"]["interfaces"][0]["rx_bytes"] = json!(u64::MAX);
    doc["network"]["interfaces"][1]["rx_bytes"] = json!(1);
    let snapshot = normalize_value(&doc).unwrap();

    let series = charts::network_series(std::slice::from_ref(&snapshot));
    let expected = (u64::MAX as f64 + 1.0) / (1024.0 * 1024.0);
    assert!(series.rx_mb[0].is_finite());
    assert!((series.rx_mb[0] - expected).abs() / expected < 1e-12);
    assert_eq!(series.tx_mb, [3.0]);

    let set = ChartSet::build(&snapshot, std::slice::from_ref(&snapshot));
    assert_eq!(set.network.data.len(), 2);
}
