// Display layer seam and a console renderer for headless use

use crate::models::{DisplaySettings, Readout};
use std::io::Write;

/// One text row of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Clock,
    Upload,
    Download,
    Cpu,
    Memory,
}

impl Label {
    pub const ALL: [Label; 5] = [
        Label::Clock,
        Label::Upload,
        Label::Download,
        Label::Cpu,
        Label::Memory,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            Label::Clock => "Time",
            Label::Upload => "Up",
            Label::Download => "Down",
            Label::Cpu => "CPU",
            Label::Memory => "Memory",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Readout {
    /// Label rows in display order, captions included.
    pub fn rows(&self) -> [(Label, String); 5] {
        [
            (Label::Clock, format!("{}: {}", Label::Clock.caption(), self.clock)),
            (Label::Upload, format!("{}: {}", Label::Upload.caption(), self.upload)),
            (Label::Download, format!("{}: {}", Label::Download.caption(), self.download)),
            (Label::Cpu, format!("{}: {}", Label::Cpu.caption(), self.cpu)),
            (Label::Memory, format!("{}: {}", Label::Memory.caption(), self.memory)),
        ]
    }
}

/// What the overlay needs from a window: label text, appearance, visibility.
pub trait Display {
    fn set_text(&mut self, label: Label, text: &str);

    /// Re-read opacity, size, fonts and colours.
    fn apply_settings(&mut self, settings: &DisplaySettings);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Flush pending changes to the screen. Called once per tick.
    fn present(&mut self) {}
}

/// Widest frame the console renders, whatever the window width.
const MAX_COLUMNS: usize = 512;

/// Renders the panel as a bordered text box. Column count approximates the
/// window width at the configured font size (a glyph is about half as wide as tall).
pub struct ConsoleDisplay<W: Write> {
    out: W,
    texts: [String; 5],
    settings: DisplaySettings,
    visible: bool,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, settings: &DisplaySettings) -> Self {
        Self {
            out,
            texts: Default::default(),
            settings: settings.clone(),
            visible: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn columns(&self) -> usize {
        let glyph = (self.settings.font_size / 2).max(1);
        ((self.settings.width / glyph) as usize).clamp(8, MAX_COLUMNS)
    }

    fn render(&self) -> String {
        let cols = self.columns();
        let mut s = String::new();
        let border = "-".repeat(cols);
        s.push_str(&format!(
            "+{}+ {:.0}% {}\n",
            border,
            self.settings.opacity * 100.0,
            self.settings.font_family
        ));
        for text in &self.texts {
            let clipped: String = text.chars().take(cols).collect();
            let pad = cols - clipped.chars().count();
            s.push_str(&format!("|{}{}|\n", clipped, " ".repeat(pad)));
        }
        s.push_str(&format!("+{}+\n", border));
        s
    }
}

impl<W: Write> Display for ConsoleDisplay<W> {
    fn set_text(&mut self, label: Label, text: &str) {
        self.texts[label.index()] = text.to_string();
    }

    fn apply_settings(&mut self, settings: &DisplaySettings) {
        self.settings = settings.clone();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn present(&mut self) {
        if !self.visible {
            return;
        }
        let frame = self.render();
        if let Err(e) = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|_| self.out.flush())
        {
            tracing::warn!(error = %e, operation = "present", "console write failed");
        }
    }
}
