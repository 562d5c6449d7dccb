//! Hash family for the Bloom filter
//!
//! Two unrelated base hashes are computed per item: MurmurHash3 (x64, 128-bit)
//! for `h1` and SipHash-1-3 for `h2`. The k bit positions are then derived by
//! double hashing, `g_i = (h1 + i * h2) mod m`.
//!
//! All seeds are fixed constants, so positions are stable across process
//! restarts.

use std::hash::Hasher;
use std::io::Cursor;

use siphasher::sip::SipHasher13;

/// Default MurmurHash3 seed for `h1`
pub const DEFAULT_MURMUR_SEED: u32 = 0x9747_b28c;

/// Default SipHash key pair for `h2`
pub const DEFAULT_SIP_KEYS: (u64, u64) = (0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908);

/// Hash an element with MurmurHash3 and keep the lower 64 bits
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory cursor cannot fail.
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Hash an element with SipHash-1-3 under a fixed key pair
pub fn sip_hash(element: &[u8], keys: (u64, u64)) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(keys.0, keys.1);
    hasher.write(element);
    hasher.finish()
}

/// Deterministic source of k bit positions per item
///
/// Stateless apart from its seeds; one instance is shared by every caller of
/// a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFamily {
    murmur_seed: u32,
    sip_keys: (u64, u64),
}

impl Default for HashFamily {
    fn default() -> Self {
        Self::new(DEFAULT_MURMUR_SEED, DEFAULT_SIP_KEYS)
    }
}

impl HashFamily {
    /// Create a hash family with explicit seeds
    pub fn new(murmur_seed: u32, sip_keys: (u64, u64)) -> Self {
        Self {
            murmur_seed,
            sip_keys,
        }
    }

    /// Compute the two base hashes `(h1, h2)` of an element
    ///
    /// `h2` is forced odd so the stride never collapses to zero.
    pub fn base_hashes(&self, element: &[u8]) -> (u64, u64) {
        let h1 = murmur_hash(element, self.murmur_seed);
        let h2 = sip_hash(element, self.sip_keys) | 1;
        (h1, h2)
    }

    /// Compute k positions in `[0, m)` for an element
    ///
    /// `m` must be non-zero; filters reject a zero-sized bit field at
    /// construction, and an empty vector is returned here if it slips through.
    pub fn positions(&self, element: &[u8], k: usize, m: usize) -> Vec<usize> {
        if m == 0 {
            return Vec::new();
        }
        let (h1, h2) = self.base_hashes(element);

        (0..k)
            .map(|i| {
                let hash = h1.wrapping_add((i as u64).wrapping_mul(h2));
                (hash % m as u64) as usize
            })
            .collect()
    }
}

/// Compute k positions with the default hash family
pub fn compute_hash_positions(element: &[u8], k: usize, m: usize) -> Vec<usize> {
    HashFamily::default().positions(element, k, m)
}
