//! Commit-reveal round.
//!
//! A [`SealedRound`] holds the secret key and the computer's move and
//! exposes only the digest. [`SealedRound::reveal`] consumes it once the
//! player's move is known, producing a [`RevealedRound`] that carries the
//! outcome and the key.

use super::{Outcome, RoundId, RoundTranscript};
use crate::crypto::{verify_move, KeyedHasher, MoveDigest, SecretKey, SecureRandomSource};
use crate::error::CryptoError;
use crate::games::{MoveIndex, MoveSet};
use std::fmt;
use tracing::{debug, info};

/// Round whose computer move is fixed and committed but not yet revealed
pub struct SealedRound {
    id: RoundId,
    moves: MoveSet,
    key: SecretKey,
    computer_move: MoveIndex,
    digest: MoveDigest,
}

impl SealedRound {
    /// Pick the key and computer move, and commit to the move's name
    pub fn initiate<R, H>(moves: MoveSet, rng: &mut R, hasher: &H) -> Result<Self, CryptoError>
    where
        R: SecureRandomSource + ?Sized,
        H: KeyedHasher + ?Sized,
    {
        let id = RoundId::new();
        let key = SecretKey::random(rng);
        let computer_move = moves.random_index(rng);
        let digest = hasher.digest(&key.hmac_key(), moves.name(computer_move).as_bytes())?;

        info!(round_id = %id, moves = moves.count(), "round sealed");
        debug!(round_id = %id, %digest, "digest published");

        Ok(Self {
            id,
            moves,
            key,
            computer_move,
            digest,
        })
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Commitment to publish before asking for the player's move
    pub fn digest(&self) -> &MoveDigest {
        &self.digest
    }

    /// Resolve against the player's move and release the key
    pub fn reveal(self, player_move: MoveIndex) -> RevealedRound {
        let outcome = self.moves.resolve(player_move, self.computer_move);

        debug!(
            round_id = %self.id,
            player_move = self.moves.name(player_move),
            computer_move = self.moves.name(self.computer_move),
            %outcome,
            key = %self.key,
            "round revealed"
        );

        RevealedRound {
            id: self.id,
            moves: self.moves,
            key: self.key,
            computer_move: self.computer_move,
            player_move,
            digest: self.digest,
            outcome,
        }
    }
}

impl fmt::Debug for SealedRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedRound")
            .field("id", &self.id)
            .field("moves", &self.moves)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Finished round with its key released
#[derive(Clone, Debug)]
pub struct RevealedRound {
    id: RoundId,
    moves: MoveSet,
    key: SecretKey,
    computer_move: MoveIndex,
    player_move: MoveIndex,
    digest: MoveDigest,
    outcome: Outcome,
}

impl RevealedRound {
    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    pub fn digest(&self) -> &MoveDigest {
        &self.digest
    }

    pub fn player_move(&self) -> MoveIndex {
        self.player_move
    }

    pub fn computer_move(&self) -> MoveIndex {
        self.computer_move
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Recompute the digest from the revealed key and committed move
    pub fn verify<H: KeyedHasher + ?Sized>(&self, hasher: &H) -> bool {
        verify_move(
            hasher,
            &self.key,
            self.moves.name(self.computer_move),
            &self.digest,
        )
    }

    pub fn transcript(&self) -> RoundTranscript {
        RoundTranscript {
            round_id: self.id,
            moves: self.moves.names().to_vec(),
            player_move: self.moves.name(self.player_move).to_string(),
            computer_move: self.moves.name(self.computer_move).to_string(),
            outcome: self.outcome,
            digest: self.digest,
            key: self.key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{CryptoRandom, HmacSha256Hasher};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    fn rps() -> MoveSet {
        MoveSet::new(["rock", "paper", "scissors"]).unwrap()
    }

    fn seeded(seed: u64) -> CryptoRandom<ChaCha20Rng> {
        CryptoRandom::new(ChaCha20Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_reveal_reproduces_digest() {
        let mut rng = CryptoRandom::os();
        for _ in 0..50 {
            let sealed = SealedRound::initiate(rps(), &mut rng, &HmacSha256Hasher).unwrap();
            let published = *sealed.digest();
            let revealed = sealed.reveal(MoveIndex::new(0));

            assert_eq!(revealed.digest(), &published);
            assert!(revealed.verify(&HmacSha256Hasher));
            assert!(verify_move(
                &HmacSha256Hasher,
                revealed.key(),
                revealed.moves().name(revealed.computer_move()),
                &published,
            ));
        }
    }

    #[test]
    fn test_digest_binds_computer_move() {
        let sealed = SealedRound::initiate(rps(), &mut seeded(1), &HmacSha256Hasher).unwrap();
        let revealed = sealed.reveal(MoveIndex::new(1));
        let committed = revealed.computer_move();

        for other in revealed.moves().indices().filter(|i| *i != committed) {
            assert!(!verify_move(
                &HmacSha256Hasher,
                revealed.key(),
                revealed.moves().name(other),
                revealed.digest(),
            ));
        }
    }

    #[test]
    fn test_outcome_matches_rules() {
        for seed in 0..20 {
            let sealed = SealedRound::initiate(rps(), &mut seeded(seed), &HmacSha256Hasher).unwrap();
            let revealed = sealed.reveal(MoveIndex::new(2));
            let expected = rps().resolve(MoveIndex::new(2), revealed.computer_move());
            assert_eq!(revealed.outcome(), expected);
        }
    }

    #[test]
    fn test_keys_never_repeat() {
        let mut rng = CryptoRandom::os();
        let mut keys = HashSet::new();
        for _ in 0..1000 {
            let sealed = SealedRound::initiate(rps(), &mut rng, &HmacSha256Hasher).unwrap();
            let revealed = sealed.reveal(MoveIndex::new(0));
            assert!(keys.insert(revealed.key().to_hex()));
        }
    }

    /// Hasher that only takes 32-byte keys
    struct RawKeyHasher;

    impl KeyedHasher for RawKeyHasher {
        fn digest(&self, key: &[u8], message: &[u8]) -> Result<MoveDigest, CryptoError> {
            if key.len() != 32 {
                return Err(CryptoError::InvalidKey(key.len()));
            }
            HmacSha256Hasher.digest(key, message)
        }
    }

    #[test]
    fn test_rejected_key_fails_initiate() {
        // Hex key text is 64 bytes
        let err = SealedRound::initiate(rps(), &mut seeded(5), &RawKeyHasher).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKey(64));
    }

    #[test]
    fn test_hmac_accepts_any_key_length() {
        for len in [0, 1, 32, 64, 65, 200] {
            assert!(HmacSha256Hasher.digest(&vec![7u8; len], b"rock").is_ok());
        }
    }

    #[test]
    fn test_sealed_debug_hides_secrets() {
        let sealed = SealedRound::initiate(rps(), &mut seeded(3), &HmacSha256Hasher).unwrap();
        let debug = format!("{sealed:?}");
        assert!(!debug.contains("key"));
        assert!(!debug.contains("computer_move"));
    }

    #[test]
    fn test_transcript_matches_round() {
        let sealed = SealedRound::initiate(rps(), &mut seeded(4), &HmacSha256Hasher).unwrap();
        let id = sealed.id();
        let revealed = sealed.reveal(MoveIndex::new(0));
        let transcript = revealed.transcript();

        assert_eq!(transcript.round_id, id);
        assert_eq!(transcript.player_move, "rock");
        assert_eq!(transcript.moves, vec!["rock", "paper", "scissors"]);
        assert_eq!(transcript.outcome, revealed.outcome());
        assert_eq!(&transcript.key, revealed.key());
    }
}
