//! Player-perspective outcome table for the help display.

use super::rules::{circular_distance, outcome_for_distance};
use crate::protocol::Outcome;
use std::fmt;

const CORNER: &str = "v User\\PC >";

/// Square table: rows are the player's move, columns the computer's
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeTable {
    names: Vec<String>,
    cells: Vec<Vec<Outcome>>,
}

impl OutcomeTable {
    /// Build from a raw, possibly invalid, name list.
    ///
    /// The rules are shown before the list is validated, so this applies
    /// the rule formula to whatever count it is given. Gameplay never reads
    /// from this table.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let n = names.len();
        let cells = (0..n)
            .map(|player| {
                (0..n)
                    .map(|computer| outcome_for_distance(circular_distance(player, computer, n), n))
                    .collect()
            })
            .collect();

        Self {
            names: names.iter().map(|s| s.as_ref().to_string()).collect(),
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Outcome for the player choosing row `player` against column `computer`
    pub fn cell(&self, player: usize, computer: usize) -> Outcome {
        self.cells[player][computer]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Outcome]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for OutcomeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CORNER}")?;
        for name in &self.names {
            write!(f, "\t{name}")?;
        }
        for (name, row) in self.names.iter().zip(&self.cells) {
            write!(f, "\n{name}")?;
            for outcome in row {
                write!(f, "\t{outcome}")?;
            }
        }
        Ok(())
    }
}
