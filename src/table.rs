use std::alloc::Layout;
use std::fmt;

use crate::config::{TableConfig, DEFAULT_MAX_LOAD_FACTOR};
use crate::distribution::Distribution;
use crate::error::ConfigError;
use crate::hash::{ByteHasher, KeyBytes, OneAtATime};

// ================================================================================================
// INTERNAL DATA STRUCTURES
// ================================================================================================

/// Key/value pair stored in a bucket
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Pairs whose hash lands on the same slot. Order inside a bucket carries no meaning.
type Bucket<K, V> = Vec<Entry<K, V>>;

/// Allocate `len` empty buckets. Allocation failure is fatal.
fn alloc_buckets<K, V>(len: usize) -> Box<[Bucket<K, V>]> {
    let mut buckets: Vec<Bucket<K, V>> = Vec::new();
    if buckets.try_reserve_exact(len).is_err() {
        match Layout::array::<Bucket<K, V>>(len) {
            Ok(layout) => std::alloc::handle_alloc_error(layout),
            Err(_) => panic!("hash table bucket array of {len} buckets is too large"),
        }
    }
    buckets.resize_with(len, Vec::new);
    buckets.into_boxed_slice()
}

// ================================================================================================
// MAIN HASH TABLE STRUCTURE
// ================================================================================================

/// Hash table resolving collisions by chaining, with a pluggable byte-level hash function.
///
/// Keys are hashed through their [`KeyBytes`] form with the table's [`ByteHasher`]; the bucket
/// index is `hash % bucket_count`. When an insertion of a *new* key finds the table holding more
/// than `bucket_count * max_load_factor` entries, the bucket count doubles and every entry is
/// rehashed before the new pair is placed. The table never shrinks.
///
/// The type is move-only: it does not implement `Clone`. Build a second table and re-insert the
/// pairs if a copy is needed.
///
/// The table has no internal synchronization. Sharing it across threads requires an external
/// lock around every operation, lookups included.
pub struct HashTable<K, V, H = OneAtATime> {
    buckets: Box<[Bucket<K, V>]>,
    num_entries: usize,
    max_load_factor: f32,
    hasher: H,
}

// ================================================================================================
// CONSTRUCTORS
// ================================================================================================

impl<K, V> HashTable<K, V, OneAtATime>
where
    K: KeyBytes + Eq,
{
    /// Table with `initial_size` buckets, the one-at-a-time hash and a 0.7 load factor.
    ///
    /// # Panics
    ///
    /// Panics if `initial_size` is zero.
    pub fn with_buckets(initial_size: usize) -> Self {
        Self::new(initial_size, OneAtATime)
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    K: KeyBytes + Eq,
    H: ByteHasher,
{
    /// Create an empty table with `initial_size` buckets and the default load factor of 0.7.
    ///
    /// # Panics
    ///
    /// Panics if `initial_size` is zero.
    pub fn new(initial_size: usize, hasher: H) -> Self {
        Self::with_max_load_factor(initial_size, hasher, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Create an empty table with an explicit growth threshold.
    ///
    /// # Panics
    ///
    /// Panics if `initial_size` is zero or `max_load_factor` is not a finite positive number.
    pub fn with_max_load_factor(initial_size: usize, hasher: H, max_load_factor: f32) -> Self {
        assert!(initial_size > 0, "hash table needs at least one bucket");
        assert!(
            max_load_factor.is_finite() && max_load_factor > 0.0,
            "invalid max load factor: {max_load_factor}"
        );
        Self {
            buckets: alloc_buckets(initial_size),
            num_entries: 0,
            max_load_factor,
            hasher,
        }
    }

    /// Create an empty table from a validated [`TableConfig`].
    pub fn with_config(config: &TableConfig, hasher: H) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_max_load_factor(
            config.initial_size,
            hasher,
            config.max_load_factor,
        ))
    }

    // ============================================================================================
    // PUBLIC API METHODS
    // ============================================================================================

    /// Returns a copy of the value stored for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter()
            .find(|e| e.key == *key)
            .map(|e| e.value.clone())
    }

    /// Check whether the given key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        let idx = self.bucket_index(key);
        self.buckets[idx].iter().any(|e| e.key == *key)
    }

    /// Inserts a key-value pair into the table.
    /// If the key already exists its value is overwritten in place and the old value returned.
    ///
    /// A new key first checks the load factor against the entry count *before* insertion and
    /// doubles the table if it is exceeded, so the count may end up one entry above the
    /// threshold until the next new key arrives.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut idx = self.bucket_index(&key);
        if let Some(entry) = self.buckets[idx].iter_mut().find(|e| e.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        if self.exceeds_load_factor() {
            let new_size = self
                .buckets
                .len()
                .checked_mul(2)
                .unwrap_or_else(|| panic!("hash table bucket count overflow"));
            self.resize(new_size);
            idx = self.bucket_index(&key);
        }

        self.buckets[idx].push(Entry { key, value });
        self.num_entries += 1;
        None
    }

    /// Returns the value for `key`, inserting the one produced by `f` if the key is absent.
    ///
    /// # Returns
    ///
    /// * `(V, bool)` - the value now associated with the key, and whether it already existed.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, f: F) -> (V, bool)
    where
        V: Clone,
    {
        if let Some(existing) = self.get(&key) {
            return (existing, true);
        }
        let value = f();
        self.insert(key, value.clone());
        (value, false)
    }

    /// Removes `key` and its value. Returns false if the key was not present.
    ///
    /// The bucket count is left untouched.
    pub fn remove(&mut self, key: &K) -> bool {
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|e| e.key == *key) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.num_entries -= 1;
                true
            }
            None => false,
        }
    }

    /// Removes every pair. Bucket count and load factor are kept.
    pub fn clear(&mut self) {
        tracing::trace!(
            entries = self.num_entries,
            buckets = self.buckets.len(),
            "clearing hash table"
        );
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.num_entries = 0;
    }

    // ============================================================================================
    // INTERNAL HELPERS
    // ============================================================================================

    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        let hash = self.hasher.hash_bytes(key.key_bytes().as_ref());
        hash as usize % self.buckets.len()
    }

    #[inline]
    fn exceeds_load_factor(&self) -> bool {
        self.num_entries as f32 > self.buckets.len() as f32 * self.max_load_factor
    }

    /// Rehash every entry into `new_size` buckets.
    ///
    /// Entries are moved straight into their new bucket; no load check runs, the caller has
    /// already grown the table past the threshold.
    fn resize(&mut self, new_size: usize) {
        tracing::debug!(
            old_buckets = self.buckets.len(),
            new_buckets = new_size,
            entries = self.num_entries,
            "resizing hash table"
        );
        let old = std::mem::replace(&mut self.buckets, alloc_buckets(new_size));
        for bucket in old.into_vec() {
            for entry in bucket {
                let idx = self.bucket_index(&entry.key);
                self.buckets[idx].push(entry);
            }
        }
    }
}

// ================================================================================================
// ACCESSORS AND ITERATION
// ================================================================================================

impl<K, V, H> HashTable<K, V, H> {
    /// Returns the number of key-value pairs in the table.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Returns true if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Current number of buckets. Never decreases.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Iterate over all pairs, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: Default::default(),
            remaining: self.num_entries,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Snapshot of how entries are spread over the buckets.
    pub fn distribution(&self) -> Distribution {
        Distribution::from_bucket_sizes(self.buckets.iter().map(Vec::len).collect())
    }
}

/// Borrowing iterator over the pairs of a [`HashTable`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    current: std::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> Extend<(K, V)> for HashTable<K, V, H>
where
    K: KeyBytes + Eq,
    H: ByteHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
