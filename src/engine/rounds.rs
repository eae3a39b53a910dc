//! Partitioning of the match into equal-length bid rounds

use serde::{Deserialize, Serialize};

/// One round of the match, derived from the total duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number
    pub number: u32,
    /// Elapsed time at which this round ends
    pub end_offset_ms: i64,
    /// `end_offset_ms` as a share of the total
    pub fraction_of_total: f64,
}

/// The round in play and how much of it has passed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentRound {
    pub number: u32,
    /// Completed share of this round, in `[0, 1]`
    pub local_fraction: f64,
}

impl CurrentRound {
    /// Reported while no countdown is in progress
    pub const UNSET: CurrentRound = CurrentRound {
        number: 1,
        local_fraction: 0.0,
    };
}

/// Elapsed offset at which round `number` ends.
///
/// Integer math keeps the last round ending exactly on `total_ms`.
pub fn end_offset(total_ms: i64, round_count: u32, number: u32) -> i64 {
    let count = i128::from(round_count.max(1));
    (i128::from(total_ms) * i128::from(number) / count) as i64
}

/// Every round of a match of `total_ms` split into `round_count` parts
pub fn rounds(total_ms: i64, round_count: u32) -> Vec<Round> {
    let count = round_count.max(1);
    (1..=count)
        .map(|number| {
            let end_offset_ms = end_offset(total_ms, count, number);
            let fraction_of_total = if total_ms > 0 {
                end_offset_ms as f64 / total_ms as f64
            } else {
                1.0
            };
            Round {
                number,
                end_offset_ms,
                fraction_of_total,
            }
        })
        .collect()
}

/// Smallest `i` with `elapsed_ms < end_offset(i)`, or `count` when none.
///
/// `floor(total * i / count) > elapsed` holds exactly when
/// `total * i >= (elapsed + 1) * count`, so the round is a ceiling division.
fn round_number_at(total_ms: i64, count: u32, elapsed_ms: i64) -> u32 {
    if elapsed_ms < 0 {
        return 1;
    }
    let total = i128::from(total_ms);
    let needed = (i128::from(elapsed_ms) + 1) * i128::from(count);
    let number = (needed + total - 1) / total;
    number.clamp(1, i128::from(count)) as u32
}

/// Find the round containing `elapsed_ms` and its completed share.
///
/// A round is current until its end instant, exclusive, so a tie at a
/// boundary belongs to the next round. Once the final round has ended the
/// final round stays current at 1.0.
pub fn compute_current_round(total_ms: i64, round_count: u32, elapsed_ms: i64) -> CurrentRound {
    if total_ms <= 0 {
        return CurrentRound::UNSET;
    }
    let count = round_count.max(1);
    let number = round_number_at(total_ms, count, elapsed_ms);

    let previous_end = if number == 1 {
        0
    } else {
        end_offset(total_ms, count, number - 1)
    };
    let span = end_offset(total_ms, count, number) - previous_end;
    let local_fraction = if span <= 0 {
        1.0
    } else {
        ((elapsed_ms - previous_end) as f64 / span as f64).clamp(0.0, 1.0)
    };

    CurrentRound {
        number,
        local_fraction,
    }
}
