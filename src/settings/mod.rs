// Settings store: single owner of the display customisation values

mod record;

pub use record::{DEFAULT_PROFILE, SettingsRecord};

use crate::error::SettingsError;
use crate::models::{BulkInput, DisplaySettings, Rgba};
use std::path::Path;
use tokio::sync::watch;

/// Owns [`DisplaySettings`] and the settings dialog's field mirror.
///
/// Every mutation takes effect immediately and publishes the new settings on a watch
/// channel; [`revision`](Self::revision) counts how many notifications were emitted.
pub struct SettingsStore {
    settings: DisplaySettings,
    form: BulkInput,
    changes: watch::Sender<DisplaySettings>,
    revision: u64,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(DisplaySettings::default())
    }
}

impl SettingsStore {
    pub fn new(settings: DisplaySettings) -> Self {
        let (changes, _) = watch::channel(settings.clone());
        Self {
            form: BulkInput::from(&settings),
            settings,
            changes,
            revision: 0,
        }
    }

    /// Reads the settings file and loads `profile` from it.
    pub fn load(path: impl AsRef<Path>, profile: &str) -> Result<Self, SettingsError> {
        let record = SettingsRecord::load(path)?;
        Ok(Self::new(record.load_profile(profile)?))
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Receiver for the display layer; it observes the latest settings after each change.
    pub fn subscribe(&self) -> watch::Receiver<DisplaySettings> {
        self.changes.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn opacity(&self) -> f64 {
        self.settings.opacity
    }

    pub fn width(&self) -> u32 {
        self.settings.width
    }

    pub fn height(&self) -> u32 {
        self.settings.height
    }

    pub fn font(&self) -> &str {
        &self.settings.font_family
    }

    pub fn font_size(&self) -> u32 {
        self.settings.font_size
    }

    pub fn background_color(&self) -> Rgba {
        self.settings.background_color
    }

    pub fn font_color(&self) -> Rgba {
        self.settings.font_color
    }

    /// Clamped to [0, 1]. NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_nan() {
            tracing::warn!(operation = "set_opacity", "ignoring NaN opacity");
            return;
        }
        self.settings.opacity = opacity.clamp(0.0, 1.0);
        self.notify();
    }

    pub fn set_width(&mut self, width: u32) {
        self.settings.width = width.max(1);
        self.notify();
    }

    pub fn set_height(&mut self, height: u32) {
        self.settings.height = height.max(1);
        self.notify();
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.settings.font_family = font.into();
        self.notify();
    }

    pub fn set_font_size(&mut self, font_size: u32) {
        self.settings.font_size = font_size.max(1);
        self.notify();
    }

    pub fn set_background_color(&mut self, color: Rgba) {
        self.settings.background_color = color;
        self.notify();
    }

    pub fn set_font_color(&mut self, color: Rgba) {
        self.settings.font_color = color;
        self.notify();
    }

    /// Grows (positive) or shrinks (negative) width and height together; one notification.
    pub fn resize_by(&mut self, step: i32) {
        self.settings.width = self.settings.width.saturating_add_signed(step).max(1);
        self.settings.height = self.settings.height.saturating_add_signed(step).max(1);
        self.notify();
    }

    /// Current values of the settings dialog's fields.
    pub fn form(&self) -> &BulkInput {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BulkInput {
        &mut self.form
    }

    /// Submits the dialog's current fields.
    pub fn apply_form(&mut self) {
        self.apply_from_bulk_input(self.form.clone());
    }

    /// Updates opacity, width, height, font and font size at once. Colours are untouched.
    pub fn apply_from_bulk_input(&mut self, fields: BulkInput) {
        if !fields.opacity.is_nan() {
            self.settings.opacity = fields.opacity.clamp(0.0, 1.0);
        }
        self.settings.width = fields.width.max(1);
        self.settings.height = fields.height.max(1);
        self.settings.font_family = fields.font;
        self.settings.font_size = fields.font_size.max(1);
        // The dialog reopens with what was applied, not what was typed
        self.form = BulkInput::from(&self.settings);
        tracing::debug!(
            operation = "apply_from_bulk_input",
            opacity = self.settings.opacity,
            width = self.settings.width,
            height = self.settings.height,
            font = %self.settings.font_family,
            font_size = self.settings.font_size,
            "settings applied"
        );
        self.notify();
    }

    /// Restores the baseline appearance in the store and in the dialog's fields.
    pub fn reset_to_defaults(&mut self) {
        self.settings = DisplaySettings::default();
        self.form = BulkInput::from(&self.settings);
        tracing::debug!(operation = "reset_to_defaults", "settings reset");
        self.notify();
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.changes.send_replace(self.settings.clone());
    }
}
