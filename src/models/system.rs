// Memory usage, host identity and per-tick readout models

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub used_percent: f64,
}

impl MemoryUsage {
    pub fn used_gb(&self) -> f64 {
        self.used_bytes as f64 / BYTES_PER_GB
    }
}

/// Static host identity; read once at startup for the about text.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os_family: String,
    pub os_version: String,
    pub host_name: String,
    pub processor_name: String,
}

/// Label strings produced by one sampler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub clock: String,
    pub upload: String,
    pub download: String,
    pub cpu: String,
    pub memory: String,
}
