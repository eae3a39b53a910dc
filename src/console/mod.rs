//! Interactive console front-end
//! 
//! Reads commands from stdin, prints their results to stdout and echoes
//! game notifications as they are broadcast.

pub mod commands;
pub mod handlers;
pub mod render;

use std::sync::Arc;
use anyhow::Context;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, warn};

use crate::state::AppState;
pub use commands::Command;
pub use handlers::{handle_command, Flow};

/// Print every broadcast notification until the channel closes
pub async fn notification_printer(state: Arc<AppState>) {
    let mut rx = state.subscribe_notifications();
    loop {
        match rx.recv().await {
            Ok(notification) => println!("{}", render::notification_line(&notification)),
            Err(RecvError::Lagged(skipped)) => warn!("Skipped {} notifications", skipped),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Read and run commands until `quit` or end of input
pub async fn run_console(state: Arc<AppState>) -> anyhow::Result<()> {
    let user_settings = state.get_user_settings().map_err(anyhow::Error::msg)?;
    if !user_settings.has_completed_tutorial {
        println!("{}", render::help_text());
    }
    if user_settings.is_changing_settings {
        let snapshot = state.get_snapshot().map_err(anyhow::Error::msg)?;
        println!("{}", render::settings_panel(&snapshot.config));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!("Console command: {:?}", command);

        let (flow, output) = handle_command(&state, command).await;
        println!("{}", output);
        if flow == Flow::Quit {
            return Ok(());
        }
    }

    debug!("Console input closed");
    Ok(())
}
