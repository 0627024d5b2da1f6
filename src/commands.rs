// User commands and the stdin listener standing in for hotkey, tray menu and dialog.
// Sources run on their own threads and only send commands; the overlay loop applies them.

use crate::models::{BulkInput, Rgba};
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Global hotkey (ctrl+space): show or hide the overlay.
    ToggleVisibility,
    /// Ctrl+wheel up.
    Grow,
    /// Ctrl+wheel down.
    Shrink,
    /// Opacity slider, in [0, 1].
    SetOpacity(f64),
    SetBackgroundColor(Rgba),
    SetFontColor(Rgba),
    /// Settings dialog OK.
    ApplyForm(BulkInput),
    Reset,
    About,
    Quit,
}

pub const HELP: &str = "commands: t (toggle) | + / - (resize) | o <0-1> | bg r,g,b[,a] | fg r,g,b[,a] | \
apply <opacity> <width> <height> <font-size> <font...> | r (reset) | a (about) | q (quit)";

/// Parses one input line. `None` for blank or unrecognised input.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    match head {
        "t" | "toggle" => Some(Command::ToggleVisibility),
        "+" => Some(Command::Grow),
        "-" => Some(Command::Shrink),
        "o" | "opacity" => parts
            .next()?
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .map(Command::SetOpacity),
        "bg" => parse_color(parts.next()?).map(Command::SetBackgroundColor),
        "fg" => parse_color(parts.next()?).map(Command::SetFontColor),
        "apply" => {
            let opacity: f64 = parts.next()?.parse().ok()?;
            let width = parts.next()?.parse().ok()?;
            let height = parts.next()?.parse().ok()?;
            let font_size = parts.next()?.parse().ok()?;
            let font = parts.collect::<Vec<_>>().join(" ");
            if font.is_empty() || !opacity.is_finite() {
                return None;
            }
            Some(Command::ApplyForm(BulkInput {
                opacity,
                width,
                height,
                font,
                font_size,
            }))
        }
        "r" | "reset" => Some(Command::Reset),
        "a" | "about" => Some(Command::About),
        "q" | "quit" | "esc" => Some(Command::Quit),
        _ => None,
    }
}

fn parse_color(s: &str) -> Option<Rgba> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Rgba::try_from(channels).ok()
}

/// Forwards parsed commands from `reader` until EOF, a read error, or until the
/// overlay drops its receiver. Blocks; call it off the runtime.
pub fn read_commands<R: BufRead>(reader: R, tx: &mpsc::Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, operation = "read_stdin", "stdin read failed");
                break;
            }
        };
        match parse_command(&line) {
            Some(cmd) => {
                if tx.blocking_send(cmd).is_err() {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => tracing::info!("{}", HELP),
        }
    }
    tracing::debug!("stdin listener shutting down");
}

/// Reads stdin on a dedicated OS thread. A read still pending when the overlay
/// quits does not keep the process alive, unlike a runtime blocking task.
pub fn spawn_stdin_listener(
    tx: mpsc::Sender<Command>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || read_commands(std::io::stdin().lock(), &tx))
}
