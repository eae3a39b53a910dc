//! Background tasks module
//! 
//! This module contains the task that drives the game clock alongside the
//! console.

pub mod tick_timer;

// Re-export main functions
pub use tick_timer::tick_timer_task;
