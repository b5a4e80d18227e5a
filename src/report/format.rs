// Human-readable formatting shared by the renderers.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Base-1024, two decimals: 1536 → "1.50 KB". Anything past TB is shown in PB.
pub fn format_bytes(bytes: impl Into<f64>) -> String {
    let mut value = bytes.into();
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// Minimal escaping for text placed in HTML element content and attributes.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
