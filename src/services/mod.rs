//! Storage services module
//! 
//! This module contains the settings store that keeps game and user
//! settings between sessions.

pub mod settings_store;

// Re-export main types
pub use settings_store::{SettingsStore, GAME_SETTINGS_KEY, USER_SETTINGS_KEY};
