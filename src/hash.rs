//! Key serialization and the byte-level hash strategies used by [`HashTable`](crate::HashTable).
//!
//! The table never looks at a key's memory directly. Keys describe themselves as a fixed-size
//! byte sequence through [`KeyBytes`], and a [`ByteHasher`] turns that sequence into a `u32`.

use std::hash::{BuildHasher, Hasher};

use ahash::RandomState;

// ================================================================================================
// KEY SERIALIZATION
// ================================================================================================

/// A key that can be hashed as a fixed-size sequence of raw bytes.
///
/// Implementations must be *faithful*: two keys compare equal with `==` if and only if their
/// byte forms are equal. Keys must not carry indirect data (pointers, handles, heap buffers)
/// whose referent matters for equality, since only the returned bytes are hashed.
pub trait KeyBytes {
    /// Fixed-size byte form of the key, usually a `[u8; N]`.
    type Bytes: AsRef<[u8]>;

    /// Serialize the key into its byte form.
    fn key_bytes(&self) -> Self::Bytes;
}

macro_rules! impl_key_bytes_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl KeyBytes for $t {
                type Bytes = [u8; std::mem::size_of::<$t>()];

                #[inline(always)]
                fn key_bytes(&self) -> Self::Bytes {
                    self.to_ne_bytes()
                }
            }
        )*
    };
}

impl_key_bytes_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl KeyBytes for bool {
    type Bytes = [u8; 1];

    #[inline(always)]
    fn key_bytes(&self) -> Self::Bytes {
        [*self as u8]
    }
}

impl KeyBytes for char {
    type Bytes = [u8; 4];

    #[inline(always)]
    fn key_bytes(&self) -> Self::Bytes {
        (*self as u32).to_ne_bytes()
    }
}

impl<const N: usize> KeyBytes for [u8; N] {
    type Bytes = [u8; N];

    #[inline(always)]
    fn key_bytes(&self) -> Self::Bytes {
        *self
    }
}

// ================================================================================================
// HASH STRATEGIES
// ================================================================================================

/// Strategy converting a key's bytes into a 32-bit hash.
///
/// Any `Fn(&[u8]) -> u32` is a `ByteHasher`, so plain functions such as
/// [`one_at_a_time_hash`] and closures can be handed to the table directly.
pub trait ByteHasher {
    fn hash_bytes(&self, bytes: &[u8]) -> u32;
}

impl<F> ByteHasher for F
where
    F: Fn(&[u8]) -> u32,
{
    #[inline(always)]
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

/// Sums every byte with wrapping arithmetic.
///
/// Distribution is poor: any permutation of the same bytes collides. Useful as a baseline when
/// comparing hash functions with [`Distribution`](crate::Distribution).
pub fn add_up_hash(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| acc.wrapping_add(b as u32))
}

/// Bob Jenkins' one-at-a-time hash.
pub fn one_at_a_time_hash(bytes: &[u8]) -> u32 {
    let mut hash = 0u32;
    for &b in bytes {
        hash = hash.wrapping_add(b as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// [`add_up_hash`] as a zero-sized strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddUp;

impl ByteHasher for AddUp {
    #[inline(always)]
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        add_up_hash(bytes)
    }
}

/// [`one_at_a_time_hash`] as a zero-sized strategy. This is the table's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneAtATime;

impl ByteHasher for OneAtATime {
    #[inline(always)]
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        one_at_a_time_hash(bytes)
    }
}

/// Seeded strategy backed by aHash.
///
/// `Seeded::new()` draws fresh random keys; `Seeded::with_seeds` is deterministic and is the one
/// to use when bucket placement has to be reproducible across runs.
#[derive(Debug, Clone)]
pub struct Seeded {
    state: RandomState,
}

impl Seeded {
    pub fn new() -> Self {
        Self {
            state: RandomState::new(),
        }
    }

    pub fn with_seeds(k0: u64, k1: u64, k2: u64, k3: u64) -> Self {
        Self {
            state: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }
}

impl Default for Seeded {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteHasher for Seeded {
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        let mut hasher = self.state.build_hasher();
        hasher.write(bytes);
        let h = hasher.finish();
        // fold high bits in; bucket index is taken modulo a non power of two
        (h ^ (h >> 32)) as u32
    }
}
