//! Cryptographic primitives for the commit-reveal scheme.
//!
//! This module provides:
//! - SecretKey and MoveDigest for the published commitment
//! - KeyedHasher capability with an HMAC-SHA256 implementation
//! - SecureRandomSource capability backed by a CSPRNG

mod commitment;
mod random;

pub use commitment::{
    verify_move, HmacSha256Hasher, KeyedHasher, MoveDigest, SecretKey, DIGEST_LEN, KEY_LEN,
};
pub use random::{CryptoRandom, SecureRandomSource};
