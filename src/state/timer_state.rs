//! Countdown timer state driven by a fixed tick interval

use std::{fmt, time::Duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = SECOND_MS * 60;
pub const HOUR_MS: i64 = MINUTE_MS * 60;
pub const DAY_MS: i64 = HOUR_MS * 24;

/// Remaining time split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Breakdown {
    /// Split a millisecond count; negative input reads as zero
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / DAY_MS,
            hours: (ms / HOUR_MS) % 24,
            minutes: (ms / MINUTE_MS) % 60,
            seconds: (ms / SECOND_MS) % 60,
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d {:02}:{:02}:{:02}", self.days, self.hours, self.minutes, self.seconds)
        } else if self.hours > 0 {
            write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            write!(f, "{:02}:{:02}", self.minutes, self.seconds)
        }
    }
}

/// Read model of the timer, published on every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerReadout {
    pub deadline: Option<DateTime<Utc>>,
    pub total_ms: Option<i64>,
    pub remaining_ms: Option<i64>,
    pub elapsed_ms: i64,
    pub elapsed_fraction: f64,
    pub breakdown: Option<Breakdown>,
    pub is_running: bool,
    pub is_finished: bool,
}

/// Countdown towards a deadline.
///
/// `remaining` only moves when [`TimerState::tick`] is called while running,
/// one interval per call. The total is captured once when the deadline is
/// set and never recomputed, so it stays the fixed denominator for every
/// fraction the timer reports.
#[derive(Debug, Clone)]
pub struct TimerState {
    interval_ms: i64,
    deadline: Option<DateTime<Utc>>,
    total_ms: Option<i64>,
    remaining_ms: Option<i64>,
    running: bool,
    finished: bool,
}

impl TimerState {
    /// Create a timer with no deadline that ticks every `interval`
    pub fn new(interval: Duration) -> Self {
        let interval_ms = i64::try_from(interval.as_millis()).unwrap_or(i64::MAX).max(1);
        Self {
            interval_ms,
            deadline: None,
            total_ms: None,
            remaining_ms: None,
            running: false,
            finished: false,
        }
    }

    /// Target a new deadline, measured from `now`.
    ///
    /// Returns `false` without touching anything when the deadline is the one
    /// already set. A deadline at or before `now` leaves a zero-length,
    /// already finished countdown.
    pub fn set_deadline(&mut self, deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if self.deadline == Some(deadline) {
            return false;
        }

        let total = (deadline - now).num_milliseconds().max(0);
        self.deadline = Some(deadline);
        self.total_ms = Some(total);
        self.remaining_ms = Some(total);
        self.running = false;
        self.finished = total == 0;
        true
    }

    /// Drop the deadline and return to the unset state
    pub fn clear(&mut self) {
        self.deadline = None;
        self.total_ms = None;
        self.remaining_ms = None;
        self.running = false;
        self.finished = false;
    }

    /// Resume counting from the current remaining time.
    ///
    /// Returns whether the timer is now running; a timer without a deadline
    /// or one that already reached zero cannot start.
    pub fn start(&mut self) -> bool {
        if self.remaining_ms.is_none() || self.finished {
            return false;
        }
        self.running = true;
        true
    }

    /// Freeze the remaining time. Returns whether the timer was running.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Advance by one interval. Returns `true` on the tick that finishes the
    /// countdown.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let Some(remaining) = self.remaining_ms else {
            return false;
        };

        let next = remaining - self.interval_ms;
        // The next tick would cross or touch zero: land on zero exactly.
        if next <= self.interval_ms {
            self.remaining_ms = Some(0);
            self.running = false;
            self.finished = true;
            return true;
        }

        self.remaining_ms = Some(next);
        false
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn total_ms(&self) -> Option<i64> {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> Option<i64> {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time spent counting down, never negative
    pub fn elapsed_ms(&self) -> i64 {
        match (self.total_ms, self.remaining_ms) {
            (Some(total), Some(remaining)) => (total - remaining).max(0),
            _ => 0,
        }
    }

    /// Elapsed share of the total: 0.0 before any deadline, 1.0 for a
    /// zero-length countdown
    pub fn elapsed_fraction(&self) -> f64 {
        match self.total_ms {
            None => 0.0,
            Some(total) if total <= 0 => 1.0,
            Some(total) => (self.elapsed_ms() as f64 / total as f64).clamp(0.0, 1.0),
        }
    }

    /// Breakdown of the remaining time, once a deadline has been set
    pub fn breakdown(&self) -> Option<Breakdown> {
        self.remaining_ms.map(Breakdown::from_millis)
    }

    pub fn readout(&self) -> TimerReadout {
        TimerReadout {
            deadline: self.deadline,
            total_ms: self.total_ms,
            remaining_ms: self.remaining_ms,
            elapsed_ms: self.elapsed_ms(),
            elapsed_fraction: self.elapsed_fraction(),
            breakdown: self.breakdown(),
            is_running: self.running,
            is_finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T19:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn run_for(timer: &mut TimerState, ms: i64) {
        let ticks = ms / timer.interval().as_millis() as i64;
        for _ in 0..ticks {
            timer.tick();
        }
    }

    #[test]
    fn breakdown_is_unset_before_a_deadline() {
        let timer = TimerState::new(Duration::from_millis(25));
        assert_eq!(timer.breakdown(), None);
        assert_eq!(timer.remaining_ms(), None);
        assert_eq!(timer.elapsed_fraction(), 0.0);
    }

    #[test]
    fn set_deadline_captures_total_and_pauses() {
        let mut timer = TimerState::new(Duration::from_millis(25));
        assert!(timer.set_deadline(now() + TimeDelta::milliseconds(60_000), now()));
        assert_eq!(timer.total_ms(), Some(60_000));
        assert_eq!(timer.remaining_ms(), Some(60_000));
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_fraction(), 0.0);
    }

    #[test]
    fn repeating_the_same_deadline_keeps_progress() {
        let mut timer = TimerState::new(Duration::from_millis(1_000));
        let deadline = now() + TimeDelta::milliseconds(60_000);
        timer.set_deadline(deadline, now());
        timer.start();
        run_for(&mut timer, 5_000);

        let later = now() + TimeDelta::milliseconds(5_000);
        assert!(!timer.set_deadline(deadline, later));
        assert_eq!(timer.total_ms(), Some(60_000));
        assert_eq!(timer.remaining_ms(), Some(55_000));
        assert!(timer.is_running());
    }

    #[test]
    fn paused_time_does_not_count() {
        let mut timer = TimerState::new(Duration::from_millis(25));
        timer.set_deadline(now() + TimeDelta::milliseconds(60_000), now());

        timer.start();
        run_for(&mut timer, 10_000);
        timer.pause();
        run_for(&mut timer, 5_000);
        timer.start();
        run_for(&mut timer, 10_000);

        assert_eq!(timer.remaining_ms(), Some(40_000));
        assert_eq!(timer.elapsed_ms(), 20_000);
    }

    #[test]
    fn final_tick_lands_on_zero_and_stops() {
        let mut timer = TimerState::new(Duration::from_millis(1_000));
        timer.set_deadline(now() + TimeDelta::milliseconds(3_500), now());
        timer.start();

        assert!(!timer.tick());
        assert_eq!(timer.remaining_ms(), Some(2_500));
        assert!(!timer.tick());
        assert_eq!(timer.remaining_ms(), Some(1_500));
        assert!(timer.tick());
        assert_eq!(timer.remaining_ms(), Some(0));
        assert!(timer.is_finished());
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_fraction(), 1.0);

        assert!(!timer.tick());
        assert!(!timer.start());
        assert_eq!(timer.remaining_ms(), Some(0));
    }

    #[test]
    fn past_deadline_reports_complete() {
        let mut timer = TimerState::new(Duration::from_millis(25));
        timer.set_deadline(now() - TimeDelta::milliseconds(500), now());
        assert_eq!(timer.total_ms(), Some(0));
        assert_eq!(timer.elapsed_ms(), 0);
        assert_eq!(timer.elapsed_fraction(), 1.0);
        assert!(timer.is_finished());
        assert!(!timer.start());
    }

    #[test]
    fn breakdown_splits_units() {
        let ms = 2 * DAY_MS + 3 * HOUR_MS + 4 * MINUTE_MS + 5 * SECOND_MS + 999;
        let parts = Breakdown::from_millis(ms);
        assert_eq!(parts, Breakdown { days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(parts.to_string(), "2d 03:04:05");
        assert_eq!(Breakdown::from_millis(65_000).to_string(), "01:05");
        assert_eq!(Breakdown::from_millis(-10).to_string(), "00:00");
    }

    #[test]
    fn clear_forgets_the_deadline() {
        let mut timer = TimerState::new(Duration::from_millis(25));
        let deadline = now() + TimeDelta::milliseconds(1_000);
        timer.set_deadline(deadline, now());
        timer.clear();
        assert_eq!(timer.deadline(), None);
        assert!(timer.set_deadline(deadline, now()));
    }
}
