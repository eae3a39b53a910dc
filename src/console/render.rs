//! Text rendering of snapshots and panels

use std::fmt::Write;

use crate::{
    engine::{GamePhase, GameSnapshot, Round},
    state::{Breakdown, ConfigField, GameConfig, Notification, TimerReadout},
};

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Configured => "Ready",
        GamePhase::Running => "Running",
        GamePhase::Paused => "Paused",
        GamePhase::Finished => "Finished",
    }
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

fn clock(timer: &TimerReadout) -> String {
    timer
        .breakdown
        .map(|b| b.to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// One-line summary of the game
pub fn status_line(snapshot: &GameSnapshot) -> String {
    format!(
        "[{}] {} left ({}% elapsed) | round {}/{} ({}%) | small bid {} | large bid {} ({}x)",
        phase_label(snapshot.phase),
        clock(&snapshot.timer),
        percent(snapshot.timer.elapsed_fraction),
        snapshot.round.number,
        snapshot.config.round_count,
        percent(snapshot.round.local_fraction),
        snapshot.bids.small,
        snapshot.bids.large,
        snapshot.config.bid_multiplier,
    )
}

/// Table of round end times, marking the current round
pub fn rounds_table(rounds: &[Round], current: u32) -> String {
    let mut out = String::from("Round  Ends at   Share\n");
    for round in rounds {
        let ends = Breakdown::from_millis(round.end_offset_ms);
        let marker = if round.number == current { " <" } else { "" };
        let _ = writeln!(
            out,
            "{:>5}  {:>8}  {:>4}%{}",
            round.number,
            ends.to_string(),
            percent(round.fraction_of_total),
            marker
        );
    }
    out
}

pub fn settings_panel(config: &GameConfig) -> String {
    let mut out = String::from("Settings\n");
    for field in ConfigField::ALL {
        let _ = writeln!(
            out,
            "  {:<13} {:>6}  {}",
            field.name(),
            field.get(config),
            field.description()
        );
    }
    out.push_str("Changing game settings will automatically restart your current game if running.\n");
    out.push_str("Use `set <setting> <value>` to change a value and `close` when done.");
    out
}

pub fn notification_line(notification: &Notification) -> String {
    format!("*** {}", notification)
}

pub fn help_text() -> &'static str {
    "Commands:
  start               start the game, or resume it when paused
  pause               pause the timer
  restart             restart the current game, keeping settings
  reset               restore default settings
  set <setting> <n>   change match-time, rounds, starting-bid or multiplier
  status              show time, round and bids
  json                dump the current state as JSON
  rounds              list round end times
  settings / close    open or close the settings panel
  quit                leave"
}
