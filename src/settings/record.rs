// File-backed profile record: JSON object of profile name -> display values

use crate::error::SettingsError;
use crate::models::{DisplaySettings, Rgba};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

pub const DEFAULT_PROFILE: &str = "default";

/// On-disk shape of one profile. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    color: Rgba,
    fontcolor: Rgba,
    fontsize: u32,
    font: String,
    height: u32,
    width: u32,
    opacity: f64,
}

impl From<&DisplaySettings> for ProfileRecord {
    fn from(s: &DisplaySettings) -> Self {
        Self {
            color: s.background_color,
            fontcolor: s.font_color,
            fontsize: s.font_size,
            font: s.font_family.clone(),
            height: s.height,
            width: s.width,
            opacity: s.opacity,
        }
    }
}

impl ProfileRecord {
    fn into_settings(self, profile: &str) -> Result<DisplaySettings, SettingsError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SettingsError::malformed(
                profile,
                format!("opacity must be within [0, 1], got {}", self.opacity),
            ));
        }
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("fontsize", self.fontsize),
        ] {
            if value == 0 {
                return Err(SettingsError::malformed(
                    profile,
                    format!("{} must be > 0", field),
                ));
            }
        }
        Ok(DisplaySettings {
            opacity: self.opacity,
            width: self.width,
            height: self.height,
            font_family: self.font,
            font_size: self.fontsize,
            background_color: self.color,
            font_color: self.fontcolor,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsRecord {
    profiles: Map<String, Value>,
}

impl SettingsRecord {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&s)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, SettingsError> {
        let profiles: Map<String, Value> = serde_json::from_str(s)?;
        Ok(Self { profiles })
    }

    /// Record holding only the baseline `"default"` profile.
    pub fn pristine() -> Self {
        let d = DisplaySettings::default();
        let value = serde_json::json!({
            "color": Vec::<u8>::from(d.background_color),
            "fontcolor": Vec::<u8>::from(d.font_color),
            "fontsize": d.font_size,
            "font": d.font_family,
            "height": d.height,
            "width": d.width,
            "opacity": d.opacity,
        });
        let mut profiles = Map::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), value);
        Self { profiles }
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// All-or-nothing: a profile with any missing, mistyped or out-of-range field is rejected.
    pub fn load_profile(&self, key: &str) -> Result<DisplaySettings, SettingsError> {
        let value = self
            .profiles
            .get(key)
            .ok_or_else(|| SettingsError::ProfileNotFound(key.to_string()))?;
        let record = ProfileRecord::deserialize(value)
            .map_err(|e| SettingsError::malformed(key, e.to_string()))?;
        record.into_settings(key)
    }

    pub fn upsert(&mut self, key: &str, settings: &DisplaySettings) -> Result<(), SettingsError> {
        let value = serde_json::to_value(ProfileRecord::from(settings))?;
        self.profiles.insert(key.to_string(), value);
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(&self.profiles)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
