use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub settings: SettingsConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    /// JSON record of profile name -> display values.
    pub path: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Write applied settings back to `path`. Off by default: dialog changes last for the session only.
    #[serde(default)]
    pub persist_on_apply: bool,
}

fn default_profile() -> String {
    crate::settings::DEFAULT_PROFILE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Tick length. Rates are shown per second, so anything but 1000 mislabels them.
    pub sample_interval_ms: u64,
    /// How often to log overlay stats (ticks, failed samples) at INFO level.
    pub stats_log_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_resize_step")]
    pub resize_step: u32,
}

fn default_resize_step() -> u32 {
    5
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            resize_step: default_resize_step(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.settings.path.is_empty(),
            "settings.path must be non-empty"
        );
        anyhow::ensure!(
            !self.settings.profile.is_empty(),
            "settings.profile must be non-empty"
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.window.resize_step > 0,
            "window.resize_step must be > 0, got {}",
            self.window.resize_step
        );
        if self.monitoring.sample_interval_ms != 1000 {
            tracing::warn!(
                sample_interval_ms = self.monitoring.sample_interval_ms,
                "rates are labelled per second but the tick is not 1000 ms"
            );
        }
        Ok(())
    }

    pub fn overlay_config(&self) -> crate::overlay::OverlayConfig {
        crate::overlay::OverlayConfig {
            sample_interval_ms: self.monitoring.sample_interval_ms,
            stats_log_interval_secs: self.monitoring.stats_log_interval_secs,
            resize_step: self.window.resize_step,
        }
    }
}
