//! Game configuration structure and validation

use std::str::FromStr;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_MATCH_TIME_MINUTES: u32 = 60;
pub const DEFAULT_ROUND_COUNT: u32 = 4;
pub const DEFAULT_STARTING_BID: u64 = 10;
pub const DEFAULT_BID_MULTIPLIER: u64 = 2;

pub const MIN_MATCH_TIME_MINUTES: u32 = 1;
pub const MAX_MATCH_TIME_MINUTES: u32 = 1000;
pub const MIN_ROUND_COUNT: u32 = 1;
pub const MAX_ROUND_COUNT: u32 = 1000;
pub const MIN_STARTING_BID: u64 = 1;
pub const MIN_BID_MULTIPLIER: u64 = 2;

/// Tournament settings plus the run markers persisted alongside them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Total match length in minutes
    pub match_time_minutes: u32,
    /// Number of equal-length bid rounds
    pub round_count: u32,
    /// Small bid of round 1
    pub starting_bid: u64,
    /// Large bid as a multiple of the small bid
    pub bid_multiplier: u64,
    pub has_game_started: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub finish_time: Option<DateTime<Utc>>,
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            match_time_minutes: DEFAULT_MATCH_TIME_MINUTES,
            round_count: DEFAULT_ROUND_COUNT,
            starting_bid: DEFAULT_STARTING_BID,
            bid_multiplier: DEFAULT_BID_MULTIPLIER,
            has_game_started: false,
            start_time: None,
            finish_time: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_MATCH_TIME_MINUTES..=MAX_MATCH_TIME_MINUTES).contains(&self.match_time_minutes) {
            return Err(format!(
                "match time must be between {} and {} minutes, got {}",
                MIN_MATCH_TIME_MINUTES, MAX_MATCH_TIME_MINUTES, self.match_time_minutes
            ));
        }
        if !(MIN_ROUND_COUNT..=MAX_ROUND_COUNT).contains(&self.round_count) {
            return Err(format!(
                "round count must be between {} and {}, got {}",
                MIN_ROUND_COUNT, MAX_ROUND_COUNT, self.round_count
            ));
        }
        if self.starting_bid < MIN_STARTING_BID {
            return Err(format!("starting bid must be at least {}", MIN_STARTING_BID));
        }
        if self.bid_multiplier < MIN_BID_MULTIPLIER {
            return Err(format!(
                "bid multiplier must be at least {}, got {}",
                MIN_BID_MULTIPLIER, self.bid_multiplier
            ));
        }
        Ok(())
    }

    /// Replace every out-of-range setting with its default
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::new();
        if !(MIN_MATCH_TIME_MINUTES..=MAX_MATCH_TIME_MINUTES).contains(&self.match_time_minutes) {
            warn!("Stored match time {} out of range, using default", self.match_time_minutes);
            self.match_time_minutes = defaults.match_time_minutes;
        }
        if !(MIN_ROUND_COUNT..=MAX_ROUND_COUNT).contains(&self.round_count) {
            warn!("Stored round count {} out of range, using default", self.round_count);
            self.round_count = defaults.round_count;
        }
        if self.starting_bid < MIN_STARTING_BID {
            warn!("Stored starting bid {} out of range, using default", self.starting_bid);
            self.starting_bid = defaults.starting_bid;
        }
        if self.bid_multiplier < MIN_BID_MULTIPLIER {
            warn!("Stored bid multiplier {} out of range, using default", self.bid_multiplier);
            self.bid_multiplier = defaults.bid_multiplier;
        }
        self
    }

    /// Check whether any of the four user settings differ; run markers are ignored
    pub fn settings_differ(&self, other: &GameConfig) -> bool {
        self.match_time_minutes != other.match_time_minutes
            || self.round_count != other.round_count
            || self.starting_bid != other.starting_bid
            || self.bid_multiplier != other.bid_multiplier
    }

    /// Copy the four user settings from `other`, keeping run markers
    pub fn adopt_settings(&mut self, other: &GameConfig) {
        self.match_time_minutes = other.match_time_minutes;
        self.round_count = other.round_count;
        self.starting_bid = other.starting_bid;
        self.bid_multiplier = other.bid_multiplier;
    }

    pub fn match_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.match_time_minutes))
    }

    /// Deadline of a match that begins at `now`
    pub fn deadline_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.match_duration()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A user-editable setting, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    MatchTime,
    Rounds,
    StartingBid,
    BidMultiplier,
}

impl ConfigField {
    pub const ALL: [ConfigField; 4] = [
        ConfigField::MatchTime,
        ConfigField::Rounds,
        ConfigField::StartingBid,
        ConfigField::BidMultiplier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigField::MatchTime => "match-time",
            ConfigField::Rounds => "rounds",
            ConfigField::StartingBid => "starting-bid",
            ConfigField::BidMultiplier => "multiplier",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfigField::MatchTime => "Time in minutes",
            ConfigField::Rounds => "Bid rounds. Bids increase after each round",
            ConfigField::StartingBid => "Small bid of the first round",
            ConfigField::BidMultiplier => "Large bid as a multiple of the small bid",
        }
    }

    /// Current value of this field
    pub fn get(&self, config: &GameConfig) -> u64 {
        match self {
            ConfigField::MatchTime => u64::from(config.match_time_minutes),
            ConfigField::Rounds => u64::from(config.round_count),
            ConfigField::StartingBid => config.starting_bid,
            ConfigField::BidMultiplier => config.bid_multiplier,
        }
    }

    /// Write `value` into this field without range checks
    pub fn apply(&self, config: &mut GameConfig, value: u64) -> Result<(), String> {
        let narrow = |v: u64| {
            u32::try_from(v).map_err(|_| format!("{} value {} is too large", self.name(), v))
        };
        match self {
            ConfigField::MatchTime => config.match_time_minutes = narrow(value)?,
            ConfigField::Rounds => config.round_count = narrow(value)?,
            ConfigField::StartingBid => config.starting_bid = value,
            ConfigField::BidMultiplier => config.bid_multiplier = value,
        }
        Ok(())
    }
}

impl FromStr for ConfigField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "match-time" | "time" | "minutes" => Ok(ConfigField::MatchTime),
            "rounds" | "round-count" => Ok(ConfigField::Rounds),
            "starting-bid" | "bid" => Ok(ConfigField::StartingBid),
            "multiplier" | "bid-multiplier" => Ok(ConfigField::BidMultiplier),
            other => Err(format!("unknown setting: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_enforces_minimums() {
        let mut config = GameConfig::default();
        config.bid_multiplier = 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.match_time_minutes = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.match_time_minutes = MAX_MATCH_TIME_MINUTES + 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.round_count = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.starting_bid = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn round_count_is_capped() {
        let mut config = GameConfig::default();
        ConfigField::Rounds.apply(&mut config, u64::from(u32::MAX)).unwrap();
        assert!(config.validate().is_err());

        config.round_count = MAX_ROUND_COUNT;
        assert!(config.validate().is_ok());

        let config = GameConfig {
            round_count: u32::MAX,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(config.round_count, DEFAULT_ROUND_COUNT);
    }

    #[test]
    fn sanitized_keeps_good_fields() {
        let config = GameConfig {
            match_time_minutes: 30,
            round_count: 0,
            starting_bid: 25,
            bid_multiplier: 0,
            ..GameConfig::default()
        }
        .sanitized();
        assert_eq!(config.match_time_minutes, 30);
        assert_eq!(config.round_count, DEFAULT_ROUND_COUNT);
        assert_eq!(config.starting_bid, 25);
        assert_eq!(config.bid_multiplier, DEFAULT_BID_MULTIPLIER);
    }

    #[test]
    fn run_markers_do_not_count_as_setting_changes() {
        let a = GameConfig::default();
        let mut b = a.clone();
        b.has_game_started = true;
        b.start_time = Some(Utc::now());
        assert!(!a.settings_differ(&b));
        b.round_count += 1;
        assert!(a.settings_differ(&b));
    }

    #[test]
    fn field_names_parse_back() {
        for field in ConfigField::ALL {
            assert_eq!(field.name().parse::<ConfigField>(), Ok(field));
        }
        assert!("colour".parse::<ConfigField>().is_err());
    }

    #[test]
    fn apply_rejects_values_that_do_not_fit() {
        let mut config = GameConfig::default();
        assert!(ConfigField::Rounds.apply(&mut config, u64::from(u32::MAX) + 1).is_err());
        assert_eq!(config.round_count, DEFAULT_ROUND_COUNT);
        ConfigField::StartingBid.apply(&mut config, 50).unwrap();
        assert_eq!(ConfigField::StartingBid.get(&config), 50);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"round_count": 6}"#).unwrap();
        assert_eq!(config.round_count, 6);
        assert_eq!(config.match_time_minutes, DEFAULT_MATCH_TIME_MINUTES);
        assert!(!config.has_game_started);
    }
}
