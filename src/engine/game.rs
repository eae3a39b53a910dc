//! Game lifecycle: configuration and timer moving together

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::state::{GameConfig, Notification, TimerReadout, TimerState};
use super::{
    bids::{compute_bids, Bids},
    rounds::{compute_current_round, rounds, CurrentRound, Round},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Deadline set, waiting for the first start
    Configured,
    Running,
    Paused,
    /// Countdown reached zero; only a restart leaves this phase
    Finished,
}

/// Everything a front-end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub config: GameConfig,
    pub timer: TimerReadout,
    pub round: CurrentRound,
    pub bids: Bids,
}

/// A tournament run.
///
/// Settings and run state are never stale together: any settings change
/// computes a fresh deadline and drops back to [`GamePhase::Configured`].
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    timer: TimerState,
    last_round: u32,
}

impl Game {
    /// Build a game from stored settings and arm it with a fresh deadline
    pub fn new(config: GameConfig, tick_interval: Duration, now: DateTime<Utc>) -> Self {
        let mut game = Self {
            config: config.sanitized(),
            timer: TimerState::new(tick_interval),
            last_round: 1,
        };
        game.restart(now);
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn phase(&self) -> GamePhase {
        if self.timer.is_finished() {
            GamePhase::Finished
        } else if self.timer.is_running() {
            GamePhase::Running
        } else if self.config.has_game_started {
            GamePhase::Paused
        } else {
            GamePhase::Configured
        }
    }

    pub fn current_round(&self) -> CurrentRound {
        compute_current_round(
            self.timer.total_ms().unwrap_or(0),
            self.config.round_count,
            self.timer.elapsed_ms(),
        )
    }

    pub fn bids(&self) -> Bids {
        compute_bids(
            self.config.starting_bid,
            self.config.bid_multiplier,
            self.current_round().number,
        )
    }

    pub fn rounds(&self) -> Vec<Round> {
        rounds(self.timer.total_ms().unwrap_or(0), self.config.round_count)
    }

    /// Start from `Configured` or resume from `Paused`.
    ///
    /// Returns whether the timer is running afterwards.
    pub fn start_game(&mut self, now: DateTime<Utc>) -> bool {
        match self.phase() {
            GamePhase::Running => true,
            GamePhase::Finished => {
                warn!("Game already finished, restart before starting again");
                false
            }
            GamePhase::Paused => {
                info!("Resuming game");
                self.timer.start()
            }
            GamePhase::Configured => {
                info!(
                    "Starting game: {} min, {} rounds, starting bid {}",
                    self.config.match_time_minutes, self.config.round_count, self.config.starting_bid
                );
                self.config.start_time = Some(now);
                self.config.has_game_started = true;
                self.timer.start()
            }
        }
    }

    /// Returns whether the game was running
    pub fn pause(&mut self) -> bool {
        let was_running = self.timer.pause();
        if was_running {
            info!("Game paused");
        }
        was_running
    }

    /// Back to `Configured` with the current settings and a deadline of
    /// `now + match time`
    pub fn restart(&mut self, now: DateTime<Utc>) {
        let deadline = self.config.deadline_from(now);
        self.config.has_game_started = false;
        self.config.start_time = None;
        self.config.finish_time = Some(deadline);
        self.timer.clear();
        self.timer.set_deadline(deadline, now);
        self.last_round = self.current_round().number;
        info!("Game armed, finishing at {}", deadline);
    }

    /// Restore default settings and restart
    pub fn reset(&mut self, now: DateTime<Utc>) -> Notification {
        info!("Resetting game settings to defaults");
        self.config = GameConfig::default();
        self.restart(now);
        Notification::GameReset
    }

    /// Apply a settings change.
    ///
    /// An out-of-range result is rejected and the current settings stay in
    /// place. A real change restarts the game; `Ok(false)` means nothing
    /// changed and the run continues.
    pub fn update_config<F>(&mut self, now: DateTime<Utc>, updater: F) -> Result<bool, String>
    where
        F: FnOnce(&mut GameConfig),
    {
        let mut candidate = self.config.clone();
        updater(&mut candidate);

        if let Err(e) = candidate.validate() {
            warn!("Rejected settings change: {}", e);
            return Err(e);
        }
        if !self.config.settings_differ(&candidate) {
            debug!("Settings unchanged, keeping current run");
            return Ok(false);
        }

        self.config.adopt_settings(&candidate);
        info!("Settings changed, restarting game");
        self.restart(now);
        Ok(true)
    }

    /// Advance the timer by one interval and collect notifications
    pub fn tick(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        if self.timer.tick() {
            debug!("Countdown reached zero");
        }

        let round = self.current_round().number;
        if round != self.last_round {
            if self.config.has_game_started {
                info!("Round {} started", round);
                notifications.push(Notification::RoundStarted { number: round });
            }
            self.last_round = round;
        }

        if self.config.has_game_started && self.timer.elapsed_fraction() >= 1.0 {
            info!("Total time has elapsed");
            self.config.has_game_started = false;
            notifications.push(Notification::GameOver);
        }

        notifications
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase(),
            config: self.config.clone(),
            timer: self.timer.readout(),
            round: self.current_round(),
            bids: self.bids(),
        }
    }
}
