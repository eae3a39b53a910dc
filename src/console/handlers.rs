//! Console command handlers

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::state::AppState;
use super::{commands::Command, render};

/// Whether the console keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the state and return the text to show
pub async fn handle_command(state: &Arc<AppState>, command: Command) -> (Flow, String) {
    let result = match command {
        Command::Start => match state.start_game() {
            Ok(true) => {
                state.persist_or_log().await;
                Ok("Game running".to_string())
            }
            Ok(false) => Ok("Game has finished, use restart first".to_string()),
            Err(e) => Err(e),
        },
        Command::Pause => state.pause().map(|was_running| {
            let text = if was_running { "Game paused" } else { "Game is not running" };
            text.to_string()
        }),
        Command::Restart => {
            let restarted = state.pause().and_then(|_| state.restart());
            if restarted.is_ok() {
                state.persist_or_log().await;
            }
            restarted.map(|_| "Game restarted with current settings".to_string())
        }
        Command::Reset => {
            let reset = state.reset();
            if reset.is_ok() {
                state.persist_or_log().await;
            }
            reset.map(|_| "All settings restored to defaults".to_string())
        }
        Command::Set(field, value) => match state.set_config(field, value) {
            Ok(restarted) => {
                state.persist_or_log().await;
                Ok(if restarted {
                    format!("{} set to {}, game restarted", field.name(), value)
                } else {
                    format!("{} already {}", field.name(), value)
                })
            }
            Err(e) => {
                warn!("Rejected {} = {}: {}", field.name(), value, e);
                Ok(format!("Rejected: {}", e))
            }
        },
        Command::Status => state.get_snapshot().map(|s| render::status_line(&s)),
        Command::Json => state.get_snapshot().and_then(|s| {
            serde_json::to_string_pretty(&s).map_err(|e| format!("Failed to encode snapshot: {}", e))
        }),
        Command::Rounds => state
            .get_rounds()
            .map(|(rounds, current)| render::rounds_table(&rounds, current)),
        Command::Settings => match state.set_changing_settings(true) {
            Ok(_) => {
                state.persist_or_log().await;
                state.get_snapshot().map(|s| render::settings_panel(&s.config))
            }
            Err(e) => Err(e),
        },
        Command::Close => match state.set_changing_settings(false) {
            Ok(_) => {
                state.persist_or_log().await;
                Ok("Settings closed".to_string())
            }
            Err(e) => Err(e),
        },
        Command::Help => Ok(render::help_text().to_string()),
        Command::Quit => {
            info!("Quit requested");
            return (Flow::Quit, "Bye".to_string());
        }
    };

    match result {
        Ok(text) => (Flow::Continue, text),
        Err(e) => {
            error!("Command failed: {}", e);
            (Flow::Continue, format!("Error: {}", e))
        }
    }
}
