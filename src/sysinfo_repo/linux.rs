// Linux-specific helpers: /proc and /sys readers.

use crate::error::ProbeError;

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// hwmon drivers that report the CPU package temperature on temp1.
#[cfg(target_os = "linux")]
const CPU_HWMON_DRIVERS: [&str; 4] = ["coretemp", "k10temp", "zenpower", "cpu_thermal"];

/// CPU temperature in °C from hwmon, falling back to the thermal zones.
#[cfg(target_os = "linux")]
pub(super) fn read_cpu_temperature_linux() -> Result<f64, ProbeError> {
    read_hwmon_cpu_temp()
        .or_else(read_thermal_zone_cpu_temp)
        .ok_or(ProbeError::NoReading)
}

#[cfg(not(target_os = "linux"))]
pub(super) fn read_cpu_temperature_linux() -> Result<f64, ProbeError> {
    Err(ProbeError::Unsupported)
}

/// sysfs reports millidegrees.
#[cfg(target_os = "linux")]
fn read_millidegrees(path: &std::path::Path) -> Option<f64> {
    let raw = std::fs::read_to_string(path).ok()?;
    let milli = raw.trim().parse::<i64>().ok()?;
    (milli > 0).then(|| milli as f64 / 1000.0)
}

#[cfg(target_os = "linux")]
fn read_hwmon_cpu_temp() -> Option<f64> {
    for entry in std::fs::read_dir("/sys/class/hwmon").ok()?.flatten() {
        let dir = entry.path();
        let Ok(name) = std::fs::read_to_string(dir.join("name")) else {
            continue;
        };
        if CPU_HWMON_DRIVERS.contains(&name.trim())
            && let Some(t) = read_millidegrees(&dir.join("temp1_input"))
        {
            return Some(t);
        }
    }
    None
}

#[cfg(target_os = "linux")]
fn read_thermal_zone_cpu_temp() -> Option<f64> {
    for entry in std::fs::read_dir("/sys/class/thermal").ok()?.flatten() {
        let dir = entry.path();
        let Ok(kind) = std::fs::read_to_string(dir.join("type")) else {
            continue;
        };
        let kind = kind.trim().to_ascii_lowercase();
        if (kind.contains("x86_pkg_temp") || kind.contains("cpu"))
            && let Some(t) = read_millidegrees(&dir.join("temp"))
        {
            return Some(t);
        }
    }
    None
}
