//! Cryptographically secure randomness for keys and computer moves.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// Source of unpredictable bytes and indices
///
/// The commitment is only as strong as this source, so implementations
/// must be backed by a CSPRNG.
pub trait SecureRandomSource {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]);

    /// Uniformly random index in `0..upper`
    fn index_below(&mut self, upper: usize) -> usize;
}

/// Adapter from any `rand` generator marked `CryptoRng`
#[derive(Clone, Debug)]
pub struct CryptoRandom<R = OsRng> {
    rng: R,
}

impl CryptoRandom<OsRng> {
    /// Randomness drawn from the operating system
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for CryptoRandom<OsRng> {
    fn default() -> Self {
        Self::os()
    }
}

impl<R: RngCore + CryptoRng> CryptoRandom<R> {
    /// Wrap an explicit generator (seeded ChaCha in tests)
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> SecureRandomSource for CryptoRandom<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    fn index_below(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "index range must be non-empty");
        self.rng.gen_range(0..upper)
    }
}
