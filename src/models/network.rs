// Network section of the canonical snapshot

use serde::{Deserialize, Serialize};

use super::de::{null_default, u64_lenient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceStat {
    pub interface: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub rx_bytes: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub tx_bytes: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub rx_packets: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub tx_packets: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub rx_errors: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub tx_errors: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkStats {
    #[serde(deserialize_with = "null_default")]
    pub interfaces: Vec<InterfaceStat>,
    #[serde(deserialize_with = "u64_lenient")]
    pub active_connections: u64,
    #[serde(deserialize_with = "null_default")]
    pub active_interface_names: Vec<String>,
}
