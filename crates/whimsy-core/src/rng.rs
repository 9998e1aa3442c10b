//! Random number sources
//!
//! Two generators with different contracts:
//! - [`secure_rng`]: ChaCha20 seeded from the operating system. Used for random
//!   word picks and shuffles, where names must not be predictable across
//!   entities.
//! - [`seeded_rng`]: ChaCha8 seeded from an explicit `u64`. Used by the keyed
//!   selector, where the same seed must always give the same index regardless
//!   of process entropy.

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};
use rand_chacha::{ChaCha8Rng, ChaCha20Rng};

use crate::error::{Error, Result};

/// Create a cryptographically strong generator seeded from the OS
pub fn secure_rng() -> Result<ChaCha20Rng> {
    ChaCha20Rng::from_rng(OsRng).map_err(|e| Error::random_source(e.to_string()))
}

/// Create a reproducible generator from an explicit seed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform index in `[0, len)`
///
/// Sampled as `u64` so that a seeded generator yields the same index on 32-bit
/// and 64-bit targets. `len` must be non-zero.
pub(crate) fn uniform_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len as u64) as usize
}
