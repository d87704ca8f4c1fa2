//! Protocol types.

use crate::crypto::{MoveDigest, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tags one round in logs and transcripts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Uuid);

impl RoundId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RoundId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Round outcome, from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// Short label used in the rules table
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Draw => "Draw",
        }
    }

    /// Sentence announcing the result to the player
    pub fn phrase(&self) -> &'static str {
        match self {
            Outcome::Win => "You win!",
            Outcome::Lose => "You lose!",
            Outcome::Draw => "It's a draw!",
        }
    }

    /// The same round seen from the other side
    pub fn mirrored(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything needed to audit a finished round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    /// Round identifier
    pub round_id: RoundId,
    /// Move names in table order
    pub moves: Vec<String>,
    /// Name of the move the player chose
    pub player_move: String,
    /// Name of the move committed to before the player chose
    pub computer_move: String,
    /// Result for the player
    pub outcome: Outcome,
    /// Digest published before the player's choice
    pub digest: MoveDigest,
    /// Revealed key
    pub key: SecretKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_id_generation() {
        let id1 = RoundId::new();
        let id2 = RoundId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_round_id_parse() {
        let id = RoundId::new();
        assert_eq!(id.to_string().parse::<RoundId>().unwrap(), id);
        assert!("not-a-round".parse::<RoundId>().is_err());
    }

    #[test]
    fn test_round_id_serializes_as_plain_string() {
        let id = RoundId::new();
        assert_eq!(serde_json::to_value(id).unwrap(), id.to_string());
    }

    #[test]
    fn test_outcome_mirrored() {
        assert_eq!(Outcome::Win.mirrored(), Outcome::Lose);
        assert_eq!(Outcome::Lose.mirrored(), Outcome::Win);
        assert_eq!(Outcome::Draw.mirrored(), Outcome::Draw);
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(Outcome::Win.as_str(), "Win");
        assert_eq!(Outcome::Draw.phrase(), "It's a draw!");
        assert_eq!(Outcome::Lose.phrase(), "You lose!");
        assert_eq!(Outcome::Win.phrase(), "You win!");
    }

    #[test]
    fn test_transcript_json_shape() {
        let transcript = RoundTranscript {
            round_id: RoundId::new(),
            moves: vec!["rock".into(), "paper".into(), "scissors".into()],
            player_move: "rock".into(),
            computer_move: "paper".into(),
            outcome: Outcome::Win,
            digest: MoveDigest::from_bytes([1; 32]),
            key: SecretKey::from_bytes([2; 32]),
        };

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(json["outcome"], "win");
        assert_eq!(json["digest"], "01".repeat(32));
        assert_eq!(json["key"], "02".repeat(32));

        let back: RoundTranscript = serde_json::from_value(json).unwrap();
        assert_eq!(back, transcript);
    }
}
