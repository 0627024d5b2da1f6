// Shared test helpers: scripted metrics source and a recording display
#![allow(dead_code)]

use netmeter::display::{Display, Label};
use netmeter::error::MetricsError;
use netmeter::models::{DisplaySettings, MemoryUsage, NetworkCounters};
use netmeter::sysinfo_repo::MetricsSource;
use std::collections::{HashMap, VecDeque};

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Returns queued counter readings in order (the last one repeats), fixed CPU and memory.
#[derive(Default)]
pub struct FakeSource {
    pub counters: VecDeque<NetworkCounters>,
    pub cpu: Option<f64>,
    pub memory: Option<MemoryUsage>,
    pub network_fails: bool,
}

impl FakeSource {
    pub fn healthy() -> Self {
        Self {
            counters: VecDeque::from([counters(0, 0)]),
            cpu: Some(12.5),
            memory: Some(MemoryUsage {
                used_bytes: 4 * GIB,
                total_bytes: 16 * GIB,
                used_percent: 25.0,
            }),
            network_fails: false,
        }
    }

    pub fn with_counters(readings: &[(u64, u64)]) -> Self {
        Self {
            counters: readings.iter().map(|&(s, r)| counters(s, r)).collect(),
            ..Self::healthy()
        }
    }
}

pub fn counters(sent: u64, received: u64) -> NetworkCounters {
    NetworkCounters {
        bytes_sent: sent,
        bytes_received: received,
    }
}

impl MetricsSource for FakeSource {
    fn network_counters(&mut self) -> Result<NetworkCounters, MetricsError> {
        if self.network_fails {
            return Err(MetricsError::unavailable("network counters", "scripted failure"));
        }
        let next = if self.counters.len() > 1 {
            self.counters.pop_front()
        } else {
            self.counters.front().copied()
        };
        next.ok_or_else(|| MetricsError::unavailable("network counters", "no readings queued"))
    }

    fn cpu_percent(&mut self) -> Result<f64, MetricsError> {
        self.cpu
            .ok_or_else(|| MetricsError::unavailable("cpu", "scripted failure"))
    }

    fn memory(&mut self) -> Result<MemoryUsage, MetricsError> {
        self.memory
            .ok_or_else(|| MetricsError::unavailable("memory", "scripted failure"))
    }
}

/// Keeps the latest text per label and every settings snapshot applied.
pub struct RecordingDisplay {
    pub texts: HashMap<Label, String>,
    pub applied: Vec<DisplaySettings>,
    pub visible: bool,
    pub presents: usize,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self {
            texts: HashMap::new(),
            applied: Vec::new(),
            visible: true,
            presents: 0,
        }
    }
}

impl Display for RecordingDisplay {
    fn set_text(&mut self, label: Label, text: &str) {
        self.texts.insert(label, text.to_string());
    }

    fn apply_settings(&mut self, settings: &DisplaySettings) {
        self.applied.push(settings.clone());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

pub const PRISTINE_RECORD: &str = r#"{
  "default": {
    "color": [250, 235, 215],
    "fontcolor": [0, 0, 0],
    "fontsize": 15,
    "font": "楷体",
    "height": 121,
    "width": 260,
    "opacity": 0.7
  }
}"#;
