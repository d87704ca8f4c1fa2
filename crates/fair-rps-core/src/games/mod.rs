//! Move lists and the rule that decides a round.

mod moves;
mod rules;
mod table;

pub use moves::{MoveIndex, MoveSet, MIN_MOVES};
pub use rules::{circular_distance, resolve};
pub use table::OutcomeTable;
