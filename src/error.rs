// Error types for metrics sampling and settings loading

use thiserror::Error;

/// An OS metrics facility could not be read. The overlay shows the value as missing.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{metric} unavailable: {reason}")]
    Unavailable {
        metric: &'static str,
        reason: String,
    },
}

impl MetricsError {
    pub fn unavailable(metric: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            metric,
            reason: reason.into(),
        }
    }
}

/// Settings record failures. Fatal at startup: there is no safe fallback profile.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("malformed record for profile {profile}: {reason}")]
    MalformedRecord { profile: String, reason: String },

    #[error("settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SettingsError {
    pub(crate) fn malformed(profile: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            profile: profile.to_string(),
            reason: reason.into(),
        }
    }
}
