//! Hash functions for the SRF Bloom filter
//!
//! The Bloom filter index `j` selects four hash functions
//! `H(A, X) = (CRC32(A || X) & 0x0000FFFF) mod M` where `A = 4*j + i` for
//! round `i` in `0..4`, `X` is the 6-byte address and `M` the bitmap size in
//! bits. CRC32 is the IEEE 802.3 polynomial.

/// Number of hash rounds applied per inserted address
pub const BLOOM_HASH_ROUNDS: usize = 4;

/// Largest valid Bloom filter index (2-bit field in the SRF control byte)
pub const BLOOM_INDEX_MAX: u8 = 3;

/// Compute one hash round for an element
pub fn nan_hash(selector: u8, element: &[u8], m: usize) -> usize {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[selector]);
    hasher.update(element);
    let crc = hasher.finalize() & 0x0000_FFFF;
    crc as usize % m
}

/// Compute all bit positions for an element under Bloom filter index `index`
pub fn compute_hash_positions(element: &[u8], index: u8, m: usize) -> [usize; BLOOM_HASH_ROUNDS] {
    let mut positions = [0usize; BLOOM_HASH_ROUNDS];
    for (round, pos) in positions.iter_mut().enumerate() {
        let selector = index * BLOOM_HASH_ROUNDS as u8 + round as u8;
        *pos = nan_hash(selector, element, m);
    }
    positions
}
