//! Error types for move-set configuration, player input, and key material.

use thiserror::Error;

/// Errors from validating the startup move list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Too few moves: got {count}, need at least 3")]
    TooFewMoves { count: usize },

    #[error("Even number of moves: got {count}, need an odd count")]
    EvenMoveCount { count: usize },

    #[error("Duplicate move: {name:?}")]
    DuplicateMove { name: String },
}

/// Errors from the player's move selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Selection {selection} is out of range 1..={count}")]
    OutOfRange { selection: String, count: usize },

    #[error("Input closed before a move was selected")]
    EndOfInput,
}

/// Errors from decoding or using key material
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Never produced by HMAC, which takes any key length; other
    /// [`KeyedHasher`](crate::crypto::KeyedHasher) implementations may
    /// restrict it
    #[error("Keyed hasher rejected key of {0} bytes")]
    InvalidKey(usize),
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidHex(err.to_string())
    }
}

/// Top-level error for a game session
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
