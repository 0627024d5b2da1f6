// Per-tick metrics sampling and unit formatting

use crate::error::MetricsError;
use crate::models::{NetworkCounters, Readout};
use crate::sysinfo_repo::MetricsSource;
use chrono::NaiveDateTime;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Placeholder shown for a metric that could not be read this tick.
pub const MISSING: &str = "--";

pub const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats bytes-per-interval with the largest unit that keeps the value >= 1.
pub fn format_rate(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} b/s", bytes)
    } else if bytes < MIB {
        format!("{:.2} kb/s", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} mb/s", bytes as f64 / MIB as f64)
    }
}

/// Turns OS readings into label strings. Holds the previous network counters between ticks,
/// so deltas are per-interval only when `tick` runs at a fixed cadence.
pub struct MetricsSampler<S> {
    source: S,
    previous: Option<NetworkCounters>,
    failed_samples: u64,
}

impl<S: MetricsSource> MetricsSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: None,
            failed_samples: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Number of individual metric reads that failed since construction.
    pub fn failed_samples(&self) -> u64 {
        self.failed_samples
    }

    /// Returns `(upload, download)` bytes since the previous call. The first call only
    /// records a baseline and returns `(0, 0)`. A counter that went backwards yields 0.
    pub fn sample_network_delta(&mut self) -> Result<(u64, u64), MetricsError> {
        let current = self.source.network_counters()?;
        let delta = match self.previous.replace(current) {
            Some(previous) => current.delta_since(&previous),
            None => return Ok((0, 0)),
        };
        if delta.rolled_over {
            tracing::warn!(
                operation = "sample_network_delta",
                bytes_sent = current.bytes_sent,
                bytes_received = current.bytes_received,
                "network counter went backwards; clamping delta to 0"
            );
        }
        Ok((delta.upload, delta.download))
    }

    pub fn sample_cpu_percent(&mut self) -> Result<f64, MetricsError> {
        self.source.cpu_percent()
    }

    /// Returns `(used_gb, used_percent)`.
    pub fn sample_memory(&mut self) -> Result<(f64, f64), MetricsError> {
        let mem = self.source.memory()?;
        Ok((mem.used_gb(), mem.used_percent))
    }

    pub fn tick(&mut self) -> Readout {
        self.tick_at(chrono::Local::now().naive_local())
    }

    /// Builds every label for one tick. Failed metrics are logged and shown as [`MISSING`].
    pub fn tick_at(&mut self, now: NaiveDateTime) -> Readout {
        let (upload, download) = match self.sample_network_delta() {
            Ok((up, down)) => (format_rate(up), format_rate(down)),
            Err(e) => {
                self.record_failure(&e, "sample_network_delta");
                (MISSING.to_string(), MISSING.to_string())
            }
        };
        let cpu = match self.sample_cpu_percent() {
            Ok(pct) => format!("{:.1}%", pct),
            Err(e) => {
                self.record_failure(&e, "sample_cpu_percent");
                MISSING.to_string()
            }
        };
        let memory = match self.sample_memory() {
            Ok((gb, pct)) => format!("{:.2}GB  {:.1}%", gb, pct),
            Err(e) => {
                self.record_failure(&e, "sample_memory");
                MISSING.to_string()
            }
        };
        Readout {
            clock: now.format(CLOCK_FORMAT).to_string(),
            upload,
            download,
            cpu,
            memory,
        }
    }

    fn record_failure(&mut self, e: &MetricsError, operation: &'static str) {
        self.failed_samples += 1;
        tracing::warn!(error = %e, operation, "metric sample failed");
    }
}
