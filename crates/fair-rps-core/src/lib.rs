//! Fair RPS Core Library
//!
//! This crate provides the rule engine, the commit-reveal primitives, and
//! the round orchestration for provably-fair rock-paper-scissors over any
//! odd number of moves.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;
pub mod session;

pub use crypto::{
    verify_move, CryptoRandom, HmacSha256Hasher, KeyedHasher, MoveDigest, SecretKey,
    SecureRandomSource,
};
pub use error::{ConfigError, CryptoError, Error, InputError};
pub use games::{resolve, MoveIndex, MoveSet, OutcomeTable};
pub use protocol::{Outcome, RevealedRound, RoundId, RoundTranscript, SealedRound};
pub use session::{play_round, run, InputSource, LineInput, RoundEnd, ScriptedInput};
