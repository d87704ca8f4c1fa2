//! Generalized rock-paper-scissors rule.
//!
//! Moves sit on a cycle of odd length `n`. A move beats the `n / 2` moves
//! that follow it and loses to the `n / 2` moves that precede it.

use super::MoveIndex;
use crate::protocol::Outcome;

/// Forward distance from the player's move to the computer's move
pub fn circular_distance(player: usize, computer: usize, n: usize) -> usize {
    (computer + n - player) % n
}

/// Outcome for a given forward distance on a cycle of `n` moves
pub(crate) fn outcome_for_distance(diff: usize, n: usize) -> Outcome {
    if diff == 0 {
        Outcome::Draw
    } else if diff <= n / 2 {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Decide the round for the player
///
/// `n` must be odd and at least 3, and both indices must be below `n`.
/// The caller validates this; only debug builds check it here.
pub fn resolve(player: MoveIndex, computer: MoveIndex, n: usize) -> Outcome {
    debug_assert!(n >= 3 && n % 2 == 1, "move count must be odd and >= 3, got {n}");
    debug_assert!(player.get() < n, "player move {} out of range", player.get());
    debug_assert!(computer.get() < n, "computer move {} out of range", computer.get());

    outcome_for_distance(circular_distance(player.get(), computer.get(), n), n)
}
