// Overlay loop tests: tick -> labels, commands -> store/visibility, write-back, run/quit

mod common;

use common::{FakeSource, PRISTINE_RECORD, RecordingDisplay};
use netmeter::commands::Command;
use netmeter::display::Label;
use netmeter::models::{BulkInput, DisplaySettings, Rgba};
use netmeter::overlay::{Overlay, OverlayConfig, Persistence};
use netmeter::sampler::MetricsSampler;
use netmeter::settings::{SettingsRecord, SettingsStore};
use std::ops::ControlFlow;
use tokio::sync::mpsc;

fn config() -> OverlayConfig {
    OverlayConfig {
        sample_interval_ms: 10,
        stats_log_interval_secs: 3600,
        resize_step: 5,
    }
}

fn overlay(source: FakeSource) -> Overlay<FakeSource, RecordingDisplay> {
    Overlay::new(
        MetricsSampler::new(source),
        SettingsStore::default(),
        RecordingDisplay::default(),
    )
}

#[test]
fn test_new_overlay_applies_initial_settings() {
    let o = overlay(FakeSource::healthy());
    assert_eq!(o.display().applied, vec![DisplaySettings::default()]);
}

#[test]
fn test_tick_sets_every_label() {
    let mut o = overlay(FakeSource::with_counters(&[(0, 0), (1024, 512)]));
    o.handle_tick();
    o.handle_tick();
    let texts = &o.display().texts;
    assert_eq!(texts.len(), Label::ALL.len());
    assert!(texts[&Label::Clock].starts_with("Time: "));
    assert_eq!(texts[&Label::Upload], "Up: 1.00 kb/s");
    assert_eq!(texts[&Label::Download], "Down: 512 b/s");
    assert_eq!(texts[&Label::Cpu], "CPU: 12.5%");
    assert_eq!(texts[&Label::Memory], "Memory: 4.00GB  25.0%");
    assert_eq!(o.display().presents, 2);
    assert_eq!(o.ticks(), 2);
}

#[test]
fn test_toggle_visibility_keeps_sampling() {
    let mut o = overlay(FakeSource::healthy());
    let cfg = config();
    assert_eq!(
        o.handle_command(Command::ToggleVisibility, &cfg),
        ControlFlow::Continue(())
    );
    assert!(!o.display().visible);
    o.handle_tick();
    assert_eq!(o.ticks(), 1);
    o.handle_command(Command::ToggleVisibility, &cfg);
    assert!(o.display().visible);
    assert_eq!(o.store().revision(), 0);
}

#[test]
fn test_setting_commands_reach_display() {
    let mut o = overlay(FakeSource::healthy());
    let cfg = config();
    o.handle_command(Command::Grow, &cfg);
    o.handle_settings_change();
    assert_eq!(o.display().applied.last().unwrap().width, 265);

    o.handle_command(Command::Shrink, &cfg);
    o.handle_command(Command::SetOpacity(0.3), &cfg);
    o.handle_command(Command::SetFontColor(Rgba::opaque(1, 1, 1)), &cfg);
    o.handle_settings_change();
    let last = o.display().applied.last().unwrap().clone();
    assert_eq!(last.width, 260);
    assert_eq!(last.opacity, 0.3);
    assert_eq!(last.font_color, Rgba::opaque(1, 1, 1));
    // three commands coalesce into one display update
    assert_eq!(o.display().applied.len(), 3);

    // nothing new: no extra update
    o.handle_settings_change();
    assert_eq!(o.display().applied.len(), 3);
}

#[test]
fn test_quit_breaks_and_about_continues() {
    let mut o = overlay(FakeSource::healthy());
    let cfg = config();
    assert!(o.handle_command(Command::About, &cfg).is_continue());
    assert!(o.handle_command(Command::Quit, &cfg).is_break());
}

#[test]
fn test_write_back_when_persistence_enabled() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, PRISTINE_RECORD).unwrap();

    let mut o = overlay(FakeSource::healthy()).with_persistence(Persistence {
        path: path.clone(),
        profile: "default".into(),
    });
    o.handle_command(
        Command::ApplyForm(BulkInput {
            opacity: 0.5,
            width: 300,
            height: 150,
            font: "Arial".into(),
            font_size: 12,
        }),
        &config(),
    );
    let saved = SettingsRecord::load(&path)
        .unwrap()
        .load_profile("default")
        .unwrap();
    assert_eq!(&saved, o.store().settings());
    assert_eq!(saved.width, 300);
}

#[test]
fn test_no_write_back_by_default() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, PRISTINE_RECORD).unwrap();

    let mut o = overlay(FakeSource::healthy());
    o.handle_command(Command::SetOpacity(0.1), &config());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), PRISTINE_RECORD);
}

#[tokio::test(start_paused = true)]
async fn test_run_ticks_until_quit() {
    let mut o = overlay(FakeSource::healthy());
    let (tx, mut rx) = mpsc::channel(8);
    let cfg = config();

    let driver = async {
        tokio::time::sleep(tokio::time::Duration::from_millis(60)).await;
        tx.send(Command::Reset).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(30)).await;
        tx.send(Command::Quit).await.unwrap();
    };
    let ((), ()) = tokio::join!(o.run(&mut rx, &cfg, std::future::pending()), driver);

    // paused clock: ticks at 0, 10, .., 80ms all fire before the 90ms quit
    assert!(o.ticks() >= 9, "ticks: {}", o.ticks());
    assert_eq!(o.store().revision(), 1);
    // the reset notification reached the display through the loop
    assert_eq!(o.display().applied.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_on_shutdown_after_commands_close() {
    let mut o = overlay(FakeSource::healthy());
    let (tx, mut rx) = mpsc::channel::<Command>(1);
    drop(tx);
    let shutdown = tokio::time::sleep(tokio::time::Duration::from_millis(40));
    o.run(&mut rx, &config(), shutdown).await;
    assert!(o.ticks() >= 4, "ticks: {}", o.ticks());
}
