//! Tournament Timer - a countdown timer and blind bid tracker for poker tournaments
//! 
//! This library splits a match into equal bid rounds, derives the current
//! round and bids from a ticking countdown, and keeps the game settings in a
//! small JSON store between sessions.

pub mod config;
pub mod console;
pub mod engine;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{compute_bids, compute_current_round, Game, GamePhase, GameSnapshot};
pub use state::{AppState, GameConfig, TimerState};
pub use utils::signals::shutdown_signal;
