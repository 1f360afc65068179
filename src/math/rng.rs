//! Seeded generators and per-shard stream derivation.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generator type threaded through the samplers.
pub type SimRng = StdRng;

#[inline]
pub fn seeded_rng(seed: u64) -> SimRng {
    StdRng::seed_from_u64(seed)
}

/// Seed for shard `stream_index` derived from the invocation seed.
///
/// Shard 0 keeps `base_seed`; later shards xor in a splitmix64 hash of the index, so shard
/// `i` of one seed is not shard 0 of a nearby seed.
#[inline]
pub fn stream_seed(base_seed: u64, stream_index: usize) -> u64 {
    if stream_index == 0 {
        return base_seed;
    }
    base_seed ^ splitmix64(stream_index as u64)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Returns the fixed seed, or draws a fresh one from the thread-local generator.
#[inline]
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random::<u64>)
}

/// Splits `n_runs` into at most `n_chunks` contiguous, non-empty chunk sizes.
///
/// The first `n_runs % n_chunks` chunks carry one extra run.
#[inline]
pub fn split_runs(n_runs: usize, n_chunks: usize) -> Vec<usize> {
    let chunks = n_chunks.max(1);
    let base = n_runs / chunks;
    let rem = n_runs % chunks;
    (0..chunks)
        .map(|i| if i < rem { base + 1 } else { base })
        .filter(|&n| n > 0)
        .collect()
}
