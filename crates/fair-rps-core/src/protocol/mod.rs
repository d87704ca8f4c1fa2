//! Protocol types and the commit-reveal round.

mod round;
mod types;

pub use round::{RevealedRound, SealedRound};
pub use types::{Outcome, RoundId, RoundTranscript};
