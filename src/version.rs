// Build-time identity from Cargo.toml

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Service name reported by /health; dashboards and probes match on it.
pub const SERVICE_NAME: &str = "system-monitor-dashboard";
