// Display customisation models

use serde::{Deserialize, Serialize};

pub const DEFAULT_OPACITY: f64 = 0.7;
pub const DEFAULT_WIDTH: u32 = 260;
pub const DEFAULT_HEIGHT: u32 = 121;
pub const DEFAULT_FONT: &str = "楷体";
pub const DEFAULT_FONT_SIZE: u32 = 15;
/// Antique white.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::opaque(250, 235, 215);
pub const DEFAULT_FONT_COLOR: Rgba = Rgba::opaque(0, 0, 0);

/// 8-bit colour. Persisted as `[r, g, b]` (opaque) or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl TryFrom<Vec<u8>> for Rgba {
    type Error = String;

    fn try_from(channels: Vec<u8>) -> Result<Self, Self::Error> {
        match channels[..] {
            [r, g, b] => Ok(Self::opaque(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(format!(
                "colour needs 3 or 4 channels, got {}",
                channels.len()
            )),
        }
    }
}

impl From<Rgba> for Vec<u8> {
    fn from(c: Rgba) -> Self {
        if c.a == 255 {
            vec![c.r, c.g, c.b]
        } else {
            vec![c.r, c.g, c.b, c.a]
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Background opacity in [0, 1].
    pub opacity: f64,
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    /// Pixel size.
    pub font_size: u32,
    pub background_color: Rgba,
    pub font_color: Rgba,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_family: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            background_color: DEFAULT_BACKGROUND,
            font_color: DEFAULT_FONT_COLOR,
        }
    }
}

/// Field set submitted by the settings dialog. Colours are not part of it: the pickers set them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkInput {
    pub opacity: f64,
    pub width: u32,
    pub height: u32,
    pub font: String,
    pub font_size: u32,
}

impl From<&DisplaySettings> for BulkInput {
    fn from(s: &DisplaySettings) -> Self {
        Self {
            opacity: s.opacity,
            width: s.width,
            height: s.height,
            font: s.font_family.clone(),
            font_size: s.font_size,
        }
    }
}
