//! User-facing notifications raised by the game

use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Total match time has elapsed
    GameOver,
    /// A new bid round began while the game was running
    RoundStarted { number: u32 },
    /// Settings were restored to defaults
    GameReset,
}

impl Notification {
    pub fn title(&self) -> String {
        match self {
            Notification::GameOver => "Game over".to_string(),
            Notification::RoundStarted { number } => format!("Round {} started", number),
            Notification::GameReset => "Game reset!".to_string(),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notification::GameOver => "Total time has elapsed",
            Notification::RoundStarted { .. } => "Bids have been multiplied.",
            Notification::GameReset => "Data cleared",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
