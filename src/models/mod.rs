// Domain models

mod network;
mod settings;
mod system;

pub use network::{NetworkCounters, NetworkDelta};
pub use settings::{
    BulkInput, DEFAULT_BACKGROUND, DEFAULT_FONT, DEFAULT_FONT_COLOR, DEFAULT_FONT_SIZE,
    DEFAULT_HEIGHT, DEFAULT_OPACITY, DEFAULT_WIDTH, DisplaySettings, Rgba,
};
pub use system::{MemoryUsage, Readout, SystemInfo};
