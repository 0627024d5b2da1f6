// Overlay event loop: sample tick, settings notifications and user commands,
// all handled to completion one at a time on the same thread.

use crate::commands::Command;
use crate::display::Display;
use crate::models::{DisplaySettings, SystemInfo};
use crate::sampler::MetricsSampler;
use crate::settings::{SettingsRecord, SettingsStore};
use crate::sysinfo_repo::MetricsSource;
use crate::version::{NAME, VERSION};
use std::future::Future;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, interval};

/// Loop timing and window behaviour.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub sample_interval_ms: u64,
    /// How often to log overlay stats (real seconds).
    pub stats_log_interval_secs: u64,
    /// Pixels added to or removed from width and height per resize step.
    pub resize_step: u32,
}

/// Where applied settings are written back, when write-back is enabled.
#[derive(Debug, Clone)]
pub struct Persistence {
    pub path: PathBuf,
    pub profile: String,
}

pub struct Overlay<S, D> {
    sampler: MetricsSampler<S>,
    store: SettingsStore,
    display: D,
    settings_rx: watch::Receiver<DisplaySettings>,
    persistence: Option<Persistence>,
    system_info: Option<SystemInfo>,
    ticks: u64,
}

impl<S: MetricsSource, D: Display> Overlay<S, D> {
    pub fn new(sampler: MetricsSampler<S>, store: SettingsStore, mut display: D) -> Self {
        display.apply_settings(store.settings());
        let settings_rx = store.subscribe();
        Self {
            sampler,
            store,
            display,
            settings_rx,
            persistence: None,
            system_info: None,
            ticks: 0,
        }
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn with_system_info(mut self, info: SystemInfo) -> Self {
        self.system_info = Some(info);
        self
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sampler(&self) -> &MetricsSampler<S> {
        &self.sampler
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Samples every metric and pushes the label texts to the display.
    /// Sampling continues while hidden so rate deltas stay per-interval.
    pub fn handle_tick(&mut self) {
        let readout = self.sampler.tick();
        for (label, text) in readout.rows() {
            self.display.set_text(label, &text);
        }
        self.display.present();
        self.ticks += 1;
    }

    /// Pushes the latest settings to the display if they changed since the last call.
    pub fn handle_settings_change(&mut self) {
        if self.settings_rx.has_changed().unwrap_or(false) {
            let settings = self.settings_rx.borrow_and_update().clone();
            self.display.apply_settings(&settings);
        }
    }

    pub fn handle_command(&mut self, cmd: Command, config: &OverlayConfig) -> ControlFlow<()> {
        tracing::debug!(command = ?cmd, "command received");
        let step = config.resize_step.min(i32::MAX as u32) as i32;
        match cmd {
            Command::ToggleVisibility => {
                let visible = !self.display.is_visible();
                self.display.set_visible(visible);
                tracing::info!(visible, "overlay visibility toggled");
                return ControlFlow::Continue(());
            }
            Command::About => {
                self.log_about();
                return ControlFlow::Continue(());
            }
            Command::Quit => return ControlFlow::Break(()),
            Command::Grow => self.store.resize_by(step),
            Command::Shrink => self.store.resize_by(-step),
            Command::SetOpacity(v) => self.store.set_opacity(v),
            Command::SetBackgroundColor(c) => self.store.set_background_color(c),
            Command::SetFontColor(c) => self.store.set_font_color(c),
            Command::ApplyForm(fields) => self.store.apply_from_bulk_input(fields),
            Command::Reset => self.store.reset_to_defaults(),
        }
        self.persist();
        ControlFlow::Continue(())
    }

    fn log_about(&self) {
        match &self.system_info {
            Some(info) => tracing::info!(
                name = NAME,
                version = VERSION,
                os = %info.os_family,
                os_version = %info.os_version,
                host = %info.host_name,
                cpu = %info.processor_name,
                "about"
            ),
            None => tracing::info!(name = NAME, version = VERSION, "about"),
        }
    }

    fn persist(&self) {
        let Some(p) = &self.persistence else {
            return;
        };
        let result = SettingsRecord::load(&p.path).and_then(|mut record| {
            record.upsert(&p.profile, self.store.settings())?;
            record.save(&p.path)
        });
        match result {
            Ok(()) => tracing::debug!(
                operation = "persist_settings",
                profile = %p.profile,
                "settings written back"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                operation = "persist_settings",
                "failed to write settings back"
            ),
        }
    }

    /// Runs until a [`Command::Quit`] arrives or `shutdown` resolves.
    pub async fn run(
        &mut self,
        commands: &mut mpsc::Receiver<Command>,
        config: &OverlayConfig,
        shutdown: impl Future<Output = ()>,
    ) {
        let mut tick = interval(Duration::from_millis(config.sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(config.stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first stats tick fires immediately; nothing to report yet
        stats_log_tick.tick().await;

        tokio::pin!(shutdown);
        let mut commands_open = true;

        let overlay_span = tracing::span!(
            tracing::Level::DEBUG,
            "overlay",
            sample_interval_ms = config.sample_interval_ms
        );
        let _guard = overlay_span.enter();

        loop {
            tokio::select! {
                _ = tick.tick() => self.handle_tick(),
                changed = self.settings_rx.changed() => {
                    if changed.is_ok() {
                        self.handle_settings_change();
                    }
                }
                cmd = commands.recv(), if commands_open => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd, config).is_break() {
                            tracing::info!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Command channel closed");
                        commands_open = false;
                    }
                },
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        ticks = self.ticks,
                        failed_samples = self.sampler.failed_samples(),
                        settings_revision = self.store.revision(),
                        visible = self.display.is_visible(),
                        "overlay stats"
                    );
                }
                _ = &mut shutdown => {
                    tracing::debug!("Overlay shutting down");
                    break;
                }
            }
        }
    }
}
