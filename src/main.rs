//! Tournament Timer - a countdown timer and blind bid tracker for poker tournaments
//!
//! This is the main entry point for the tournament-timer console.

use std::sync::Arc;
use tracing::info;

use tournament_timer::{
    config::Config,
    console::{notification_printer, run_console},
    services::SettingsStore,
    state::AppState,
    tasks::tick_timer_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays the display
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting tournament-timer v1.0.0");
    info!("Configuration: settings={}, interval={}ms, fresh={}",
          config.settings.display(), config.interval, config.fresh);

    let store = SettingsStore::new(config.settings.clone());
    let state = Arc::new(AppState::open(store, config.tick_interval(), config.fresh).await);

    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_timer_task(timer_state).await;
    });

    let printer_state = Arc::clone(&state);
    tokio::spawn(async move {
        notification_printer(printer_state).await;
    });

    tokio::select! {
        result = run_console(Arc::clone(&state)) => {
            if let Err(e) = result {
                tracing::error!("Console error: {:#}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if state.persist_or_log().await {
        info!("Settings saved to {}", state.store.path().display());
    }
    Ok(())
}
