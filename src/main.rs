use anyhow::Result;
use netmeter::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Commands queued between the input listener and the overlay loop.
const COMMAND_CHANNEL_CAPACITY: usize = 16;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr; stdout carries the rendered panel
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;

    // No safe fallback profile exists, so a bad settings record stops startup
    let store = settings::SettingsStore::load(
        &app_config.settings.path,
        &app_config.settings.profile,
    )
    .map_err(|e| anyhow::anyhow!("settings: {}", e))?;
    tracing::info!(
        path = %app_config.settings.path,
        profile = %app_config.settings.profile,
        "settings loaded"
    );

    let sysinfo_repo = sysinfo_repo::SysinfoRepo::new();
    let system_info = sysinfo_repo.system_info();
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        host = %system_info.host_name,
        cpu = %system_info.processor_name,
        "starting overlay"
    );

    let display = display::ConsoleDisplay::new(std::io::stdout(), store.settings());
    let mut app = overlay::Overlay::new(
        sampler::MetricsSampler::new(sysinfo_repo),
        store,
        display,
    )
    .with_system_info(system_info);
    if app_config.settings.persist_on_apply {
        app = app.with_persistence(overlay::Persistence {
            path: app_config.settings.path.clone().into(),
            profile: app_config.settings.profile.clone(),
        });
    }

    let (cmd_tx, mut cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    // Detached: the process exits on Quit even while a stdin read is pending
    let _listener = commands::spawn_stdin_listener(cmd_tx)?;
    tracing::info!("{}", commands::HELP);

    let shutdown = async {
        #[cfg(unix)]
        {
            let mut sigterm = match tokio::signal::unix::signal(
                tokio::signal::unix::SignalKind::terminate(),
            ) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("Received shutdown signal");
    };

    app.run(&mut cmd_rx, &app_config.overlay_config(), shutdown)
        .await;

    Ok(())
}
