// Network counter models

/// Cumulative byte counters summed over every interface since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// Bytes moved during one sampling interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkDelta {
    pub upload: u64,
    pub download: u64,
    /// Set when either counter went backwards (interface reset or wrap); that side is reported as 0.
    pub rolled_over: bool,
}

impl NetworkCounters {
    pub fn delta_since(&self, previous: &NetworkCounters) -> NetworkDelta {
        NetworkDelta {
            upload: self.bytes_sent.saturating_sub(previous.bytes_sent),
            download: self.bytes_received.saturating_sub(previous.bytes_received),
            rolled_over: self.bytes_sent < previous.bytes_sent
                || self.bytes_received < previous.bytes_received,
        }
    }
}
