//! Validated move list and move indices.

use super::{rules, OutcomeTable};
use crate::crypto::SecureRandomSource;
use crate::error::ConfigError;
use crate::protocol::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest playable move list
pub const MIN_MOVES: usize = 3;

/// Zero-based position of a move in a [`MoveSet`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveIndex(usize);

impl MoveIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Ordered, duplicate-free, odd-length list of move names
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveSet {
    names: Vec<String>,
}

impl MoveSet {
    /// Validate a move list
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let count = names.len();

        if count < MIN_MOVES {
            return Err(ConfigError::TooFewMoves { count });
        }
        if count % 2 == 0 {
            return Err(ConfigError::EvenMoveCount { count });
        }

        let mut seen = HashSet::with_capacity(count);
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateMove { name: name.clone() });
            }
        }

        Ok(Self { names })
    }

    /// Number of moves (always odd, at least 3)
    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: MoveIndex) -> &str {
        &self.names[index.get()]
    }

    /// Index for a raw position, if it is in range
    pub fn index(&self, position: usize) -> Option<MoveIndex> {
        (position < self.count()).then_some(MoveIndex(position))
    }

    /// Index of a move by exact name
    pub fn position(&self, name: &str) -> Option<MoveIndex> {
        self.names.iter().position(|n| n == name).map(MoveIndex)
    }

    pub fn indices(&self) -> impl Iterator<Item = MoveIndex> {
        (0..self.count()).map(MoveIndex)
    }

    /// Uniformly random move
    pub fn random_index<R: SecureRandomSource + ?Sized>(&self, rng: &mut R) -> MoveIndex {
        MoveIndex(rng.index_below(self.count()))
    }

    /// Decide a round between two moves of this set
    pub fn resolve(&self, player: MoveIndex, computer: MoveIndex) -> Outcome {
        rules::resolve(player, computer, self.count())
    }

    /// Player-perspective table, shown again when the player asks for help
    pub fn outcome_table(&self) -> OutcomeTable {
        OutcomeTable::from_names(&self.names)
    }
}
