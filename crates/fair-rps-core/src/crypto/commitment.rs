//! Secret key and keyed digest for the commit-reveal scheme.

use super::SecureRandomSource;
use crate::error::CryptoError;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Secret key length in bytes (256 bits)
pub const KEY_LEN: usize = 32;

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CryptoError> {
    let bytes = hex::decode(s.trim())?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            expected: N,
            actual,
        })
}

/// Secret key for a round, kept private until reveal
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Generate a new random key
    pub fn random<R: SecureRandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex, as shown to the player
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bytes fed to the keyed hasher.
    ///
    /// The HMAC is keyed with the displayed hex text rather than the raw
    /// bytes, so `openssl dgst -sha256 -hmac <key>` reproduces the digest.
    pub fn hmac_key(&self) -> Vec<u8> {
        self.to_hex().into_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for SecretKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_fixed(s)?))
    }
}

impl From<SecretKey> for String {
    fn from(key: SecretKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for SecretKey {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Digest = HMAC(key, move name), published before the player moves
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MoveDigest([u8; DIGEST_LEN]);

impl MoveDigest {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Debug for MoveDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for MoveDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for MoveDigest {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_fixed(s)?))
    }
}

impl From<MoveDigest> for String {
    fn from(digest: MoveDigest) -> Self {
        digest.to_string()
    }
}

impl TryFrom<String> for MoveDigest {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Deterministic, key-dependent digest over a message
pub trait KeyedHasher {
    /// Compute the digest of `message` under `key`.
    ///
    /// Implementations with a fixed key size return
    /// [`CryptoError::InvalidKey`] for anything else.
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<MoveDigest, CryptoError>;

    /// Check that `expected` is the digest of `message` under `key`
    fn verify(&self, key: &[u8], message: &[u8], expected: &MoveDigest) -> bool {
        matches!(self.digest(key, message), Ok(actual) if actual == *expected)
    }
}

/// HMAC-SHA256
#[derive(Clone, Copy, Debug, Default)]
pub struct HmacSha256Hasher;

impl HmacSha256Hasher {
    fn keyed(key: &[u8]) -> Result<HmacSha256, CryptoError> {
        HmacSha256::new_from_slice(key).map_err(|_| CryptoError::InvalidKey(key.len()))
    }
}

impl KeyedHasher for HmacSha256Hasher {
    fn digest(&self, key: &[u8], message: &[u8]) -> Result<MoveDigest, CryptoError> {
        let mut mac = Self::keyed(key)?;
        mac.update(message);
        Ok(MoveDigest(mac.finalize().into_bytes().into()))
    }

    // Constant-time comparison
    fn verify(&self, key: &[u8], message: &[u8], expected: &MoveDigest) -> bool {
        match Self::keyed(key) {
            Ok(mut mac) => {
                mac.update(message);
                mac.verify_slice(expected.as_bytes()).is_ok()
            }
            Err(_) => false,
        }
    }
}

/// Check a revealed key and move name against a published digest
pub fn verify_move<H: KeyedHasher + ?Sized>(
    hasher: &H,
    key: &SecretKey,
    move_name: &str,
    digest: &MoveDigest,
) -> bool {
    hasher.verify(&key.hmac_key(), move_name.as_bytes(), digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CryptoRandom;

    fn commit(key: &SecretKey, name: &str) -> MoveDigest {
        HmacSha256Hasher.digest(&key.hmac_key(), name.as_bytes()).unwrap()
    }

    #[test]
    fn test_digest_verification() {
        let key = SecretKey::random(&mut CryptoRandom::os());
        let digest = commit(&key, "rock");

        assert!(verify_move(&HmacSha256Hasher, &key, "rock", &digest));
    }

    #[test]
    fn test_different_moves_different_digests() {
        let key = SecretKey::random(&mut CryptoRandom::os());

        assert_ne!(commit(&key, "rock"), commit(&key, "paper"));
    }

    #[test]
    fn test_different_keys_different_digests() {
        let mut rng = CryptoRandom::os();
        let key1 = SecretKey::random(&mut rng);
        let key2 = SecretKey::random(&mut rng);

        assert_ne!(commit(&key1, "rock"), commit(&key2, "rock"));
    }

    #[test]
    fn test_wrong_move_fails_verification() {
        let key = SecretKey::random(&mut CryptoRandom::os());
        let digest = commit(&key, "rock");

        assert!(!verify_move(&HmacSha256Hasher, &key, "paper", &digest));
        // Case-sensitive
        assert!(!verify_move(&HmacSha256Hasher, &key, "Rock", &digest));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let mut rng = CryptoRandom::os();
        let key1 = SecretKey::random(&mut rng);
        let key2 = SecretKey::random(&mut rng);
        let digest = commit(&key1, "rock");

        assert!(!verify_move(&HmacSha256Hasher, &key2, "rock", &digest));
    }

    #[test]
    fn test_hmac_keyed_with_hex_text() {
        // The HMAC key is the 64 ASCII hex characters, not the 32 raw bytes
        let key = SecretKey::from_bytes([0u8; KEY_LEN]);
        assert_eq!(key.hmac_key(), vec![b'0'; 64]);

        let via_trait = commit(&key, "rock");
        let mut mac = HmacSha256::new_from_slice(&[b'0'; 64]).unwrap();
        mac.update(b"rock");
        let direct: [u8; DIGEST_LEN] = mac.finalize().into_bytes().into();
        assert_eq!(via_trait.as_bytes(), &direct);
    }

    #[test]
    fn test_rfc4231_case_2() {
        let digest = HmacSha256Hasher
            .digest(b"Jefe", b"what do ya want for nothing?")
            .unwrap();
        assert_eq!(
            digest.to_string(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hex_parsing() {
        let key = SecretKey::random(&mut CryptoRandom::os());
        let parsed: SecretKey = key.to_hex().parse().unwrap();
        assert_eq!(parsed, key);

        let digest = commit(&key, "rock");
        let parsed: MoveDigest = format!("  {digest}\n").parse().unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_hex_parsing_rejects_bad_input() {
        assert!(matches!(
            "zz".parse::<SecretKey>(),
            Err(CryptoError::InvalidHex(_))
        ));
        assert_eq!(
            "abcd".parse::<MoveDigest>(),
            Err(CryptoError::InvalidLength {
                expected: DIGEST_LEN,
                actual: 2
            })
        );
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = SecretKey::from_bytes([0xab; KEY_LEN]);
        assert_eq!(format!("{key:?}"), "SecretKey(..)");
        assert_eq!(key.to_string(), "ab".repeat(KEY_LEN));
    }
}
