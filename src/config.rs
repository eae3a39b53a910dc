//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tournament-timer")]
#[command(about = "A countdown timer and blind bid tracker for poker tournaments")]
#[command(version = "1.0.0")]
pub struct Config {
    /// File holding the stored game and user settings
    #[arg(short, long, default_value = "tournament-timer.json")]
    pub settings: PathBuf,

    /// Tick interval in milliseconds
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub interval: u64,

    /// Start from default game settings. The stored ones are left alone
    /// until a setting is changed or the program exits
    #[arg(long)]
    pub fresh: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Filter directive for the tracing subscriber
    pub fn log_filter(&self) -> String {
        format!("tournament_timer={}", self.log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["tournament-timer"]).unwrap();
        assert_eq!(config.settings, PathBuf::from("tournament-timer.json"));
        assert_eq!(config.tick_interval(), Duration::from_millis(25));
        assert!(!config.fresh);
        assert_eq!(config.log_filter(), "tournament_timer=info");
    }

    #[test]
    fn interval_is_bounded() {
        assert!(Config::try_parse_from(["tournament-timer", "--interval", "5"]).is_err());
        let config = Config::try_parse_from(["tournament-timer", "-i", "50", "-v"]).unwrap();
        assert_eq!(config.interval, 50);
        assert_eq!(config.log_level(), "debug");
    }
}
