//! Hashing policy.
//!
//! A fixed, seed-free polynomial hash. Bucket placement has to be a pure
//! function of the key and the capacity, so the hasher carries no per-table
//! or per-process state: the same key lands on the same bucket across table
//! instances, resizes and runs.

use std::hash::{BuildHasher as _, Hash};

/// A deterministic multiply-by-31 byte fold.
/// As the keys are trusted (at least in the vast majority), we do not need
/// to trade determinism for DOS protection.
pub struct Hasher {
    hash: u64,
}

#[derive(Copy, Clone, Default)]
pub struct BuildHasher;

const K: u64 = 31;

/// Clears the sign bit of the hash when read as an `i64`.
const SIGN_MASK: u64 = i64::MAX as u64;

/// Maps a key's hash code into `0..capacity`.
///
/// The sign bit is cleared before the modulo, so hash codes that would be
/// negative as signed integers still reduce to an in-range index. Accepts
/// unsized keys so that a `&str` probe maps exactly like an owned `String`
/// key (the `Borrow` contract guarantees they hash alike).
///
/// `capacity` must be positive; the table upholds that invariant itself.
pub fn bucket_index<Key: Hash + ?Sized>(key: &Key, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "bucket index over an empty table");

    (BuildHasher.hash_one(key) & SIGN_MASK) as usize % capacity
}

impl Hasher {
    #[inline]
    pub const fn new() -> Self {
        Self { hash: 0 }
    }

    #[inline]
    const fn add(&mut self, byte: u8) {
        self.hash = self.hash.wrapping_mul(K).wrapping_add(byte as u64);
    }
}

impl std::hash::Hasher for Hasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.add(*byte);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write_u8(&mut self, addition: u8) {
        self.add(addition);
    }

    // Integers fold their little-endian bytes so the hash does not depend
    // on the platform's native byte order.
    fn write_u16(&mut self, addition: u16) {
        self.write(&addition.to_le_bytes());
    }

    fn write_u32(&mut self, addition: u32) {
        self.write(&addition.to_le_bytes());
    }

    fn write_u64(&mut self, addition: u64) {
        self.write(&addition.to_le_bytes());
    }

    fn write_u128(&mut self, addition: u128) {
        self.write(&addition.to_le_bytes());
    }

    fn write_usize(&mut self, addition: usize) {
        self.write_u64(addition as u64);
    }

    fn write_isize(&mut self, addition: isize) {
        self.write_u64(addition as u64);
    }
}

impl Default for Hasher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::hash::BuildHasher for BuildHasher {
    type Hasher = Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Hasher::default()
    }
}
