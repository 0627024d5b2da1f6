// OS metrics via sysinfo

mod linux;

use crate::error::MetricsError;
use crate::models::{MemoryUsage, NetworkCounters, SystemInfo};
use std::time::Instant;
use sysinfo::{Networks, System};
use tracing::instrument;

/// Reads the raw OS figures the sampler turns into display strings.
///
/// Calls are made from the single overlay loop, so implementations take `&mut self`
/// and need no locking.
pub trait MetricsSource {
    /// Cumulative bytes sent and received over all interfaces.
    fn network_counters(&mut self) -> Result<NetworkCounters, MetricsError>;

    /// Global CPU utilisation since the previous call, in percent.
    fn cpu_percent(&mut self) -> Result<f64, MetricsError>;

    fn memory(&mut self) -> Result<MemoryUsage, MetricsError>;
}

pub struct SysinfoRepo {
    sys: System,
    networks: Networks,
    last_cpu_refresh: Option<(Instant, f64)>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let sys = System::new_all();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys,
            networks,
            last_cpu_refresh: None,
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "system_info"))]
    pub fn system_info(&self) -> SystemInfo {
        let processor_name = linux::read_cpu_model_linux()
            .or_else(|| {
                self.sys
                    .cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| "Unknown".into());
        SystemInfo {
            os_family: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
            os_version: System::os_version().unwrap_or_default(),
            host_name: System::host_name().unwrap_or_default(),
            processor_name,
        }
    }

    fn ensure_supported(metric: &'static str) -> Result<(), MetricsError> {
        if sysinfo::IS_SUPPORTED_SYSTEM {
            Ok(())
        } else {
            Err(MetricsError::unavailable(
                metric,
                format!("sysinfo does not support {}", std::env::consts::OS),
            ))
        }
    }
}

impl MetricsSource for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_counters"))]
    fn network_counters(&mut self) -> Result<NetworkCounters, MetricsError> {
        Self::ensure_supported("network counters")?;
        self.networks.refresh(true);
        if self.networks.list().is_empty() {
            return Err(MetricsError::unavailable(
                "network counters",
                "no network interfaces found",
            ));
        }
        Ok(self
            .networks
            .list()
            .values()
            .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_received: acc.bytes_received.saturating_add(data.total_received()),
            }))
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_percent"))]
    fn cpu_percent(&mut self) -> Result<f64, MetricsError> {
        Self::ensure_supported("cpu")?;
        let now = Instant::now();
        if let Some((prev_ts, prev_usage)) = self.last_cpu_refresh
            && now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL
        {
            // Too soon for a meaningful reading; reuse the last one
            return Ok(prev_usage);
        }
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(MetricsError::unavailable("cpu", "no CPUs reported"));
        }
        let usage = (self.sys.global_cpu_usage() as f64).clamp(0.0, 100.0);
        self.last_cpu_refresh = Some((now, usage));
        Ok(usage)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    fn memory(&mut self) -> Result<MemoryUsage, MetricsError> {
        Self::ensure_supported("memory")?;
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(MetricsError::unavailable("memory", "total memory is 0"));
        }
        let used = total.saturating_sub(self.sys.available_memory());
        Ok(MemoryUsage {
            used_bytes: used,
            total_bytes: total,
            used_percent: (used as f64 / total as f64) * 100.0,
        })
    }
}
