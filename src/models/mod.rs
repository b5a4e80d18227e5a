// Snapshot models: the canonical schema every reader consumes, and the native
// collector schema it is derived from.

mod de;
mod gpu;
mod load;
mod native;
mod network;
mod storage;
mod system;

use serde::{Deserialize, Serialize};

pub use gpu::{GpuSection, GpuStats, NO_GPU_NAME, NO_GPU_VENDOR};
pub use load::{LoadAverage, ProcessSample, SystemLoad, TopProcess};
pub use native::{
    NativeCpu, NativeDisk, NativeGpu, NativeMemory, NativeNetwork, NativeSnapshot, NativeSwap,
    NativeSystem, NativeSystemLoad,
};
pub use network::{InterfaceStat, NetworkStats};
pub use storage::{DiskStats, Filesystem, IoStats};
pub use system::{CpuStats, MemoryStats, SystemInfo, Temperature, UNKNOWN};

/// Normalized snapshot. Every field is present after decoding; sections a
/// document omits take their documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSnapshot {
    pub system_info: SystemInfo,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    #[serde(default, deserialize_with = "de::null_default")]
    pub disk: DiskStats,
    #[serde(default, deserialize_with = "de::null_default")]
    pub network: NetworkStats,
    #[serde(default, deserialize_with = "de::null_default")]
    pub gpu: GpuSection,
    #[serde(default, deserialize_with = "de::null_default")]
    pub system_load: SystemLoad,
}

/// A decoded snapshot document, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSnapshot {
    Native(Box<NativeSnapshot>),
    Canonical(Box<CanonicalSnapshot>),
}
