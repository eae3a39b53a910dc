//! Blind bid amounts per round

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bids {
    pub small: u64,
    pub large: u64,
}

/// Bids for `round_number`.
///
/// The small bid is the starting bid times the absolute round number, not
/// the previous round's bid scaled again. Amounts saturate at `u64::MAX`.
pub fn compute_bids(starting_bid: u64, bid_multiplier: u64, round_number: u32) -> Bids {
    let small = starting_bid.saturating_mul(u64::from(round_number));
    Bids {
        small,
        large: small.saturating_mul(bid_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_round_bids() {
        assert_eq!(compute_bids(10, 2, 3), Bids { small: 30, large: 60 });
    }

    #[test]
    fn bids_grow_linearly_with_round() {
        let per_round: Vec<u64> = (1..=4).map(|n| compute_bids(25, 3, n).small).collect();
        assert_eq!(per_round, vec![25, 50, 75, 100]);
    }

    #[test]
    fn huge_values_saturate() {
        let bids = compute_bids(u64::MAX / 2, 2, 4);
        assert_eq!(bids.small, u64::MAX);
        assert_eq!(bids.large, u64::MAX);
    }
}
