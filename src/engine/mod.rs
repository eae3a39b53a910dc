//! Round and bid arithmetic plus the game lifecycle built on the timer

pub mod bids;
pub mod game;
pub mod rounds;

pub use bids::{compute_bids, Bids};
pub use game::{Game, GamePhase, GameSnapshot};
pub use rounds::{compute_current_round, end_offset, rounds, CurrentRound, Round};
