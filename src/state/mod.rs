//! State management module
//! 
//! This module contains the timer, settings and notification types plus the
//! shared application state that ties them to the running game.

pub mod app_state;
pub mod game_config;
pub mod notification;
pub mod timer_state;
pub mod user_settings;

// Re-export main types
pub use app_state::{AppState, TickSchedule};
pub use game_config::{ConfigField, GameConfig};
pub use notification::Notification;
pub use timer_state::{Breakdown, TimerReadout, TimerState};
pub use user_settings::UserSettings;
