// Library for the binaries and tests

pub mod charts;
pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod report;
pub mod routes;
pub mod snapshot_repo;
pub mod sysinfo_repo;
pub mod telemetry;
pub mod version;
