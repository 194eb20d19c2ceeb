use hashtable_rs::{
    add_up_hash, one_at_a_time_hash, AddUp, ByteHasher, HashTable, KeyBytes, OneAtATime, Seeded,
};
use std::cell::Cell;

// Counts invocations, to check the table only hashes what it must
struct CountingHasher {
    calls: Cell<usize>,
}

impl ByteHasher for CountingHasher {
    fn hash_bytes(&self, bytes: &[u8]) -> u32 {
        self.calls.set(self.calls.get() + 1);
        one_at_a_time_hash(bytes)
    }
}

#[test]
fn test_hash_functions_are_deterministic() {
    for key in [0u32, 1, 42, u32::MAX] {
        let bytes = key.key_bytes();
        assert_eq!(add_up_hash(&bytes), add_up_hash(&bytes));
        assert_eq!(one_at_a_time_hash(&bytes), one_at_a_time_hash(&bytes));
        assert_eq!(AddUp.hash_bytes(&bytes), add_up_hash(&bytes));
        assert_eq!(OneAtATime.hash_bytes(&bytes), one_at_a_time_hash(&bytes));
    }
}

#[test]
fn test_with_fn_pointer() {
    let hash: fn(&[u8]) -> u32 = one_at_a_time_hash;
    let mut m: HashTable<u32, i32, fn(&[u8]) -> u32> = HashTable::new(8, hash);

    m.insert(1, 100);
    m.insert(2, 200);

    assert_eq!(m.get(&1), Some(100));
    assert_eq!(m.get(&2), Some(200));
    assert_eq!(m.len(), 2);
}

#[test]
fn test_with_closure() {
    let mut m = HashTable::new(16, |bytes: &[u8]| add_up_hash(bytes).rotate_left(3));

    m.insert(7u16, "seven");
    assert!(m.contains_key(&7));
    assert!(!m.contains_key(&8));
}

#[test]
fn test_constant_hash_still_correct() {
    // every key collides into bucket 0
    let mut m = HashTable::with_max_load_factor(4, |_: &[u8]| 0u32, 100.0);
    for i in 0..50u32 {
        m.insert(i, i + 1);
    }
    assert_eq!(m.bucket_count(), 4);
    assert_eq!(m.distribution().max_bucket_size(), 50);

    for i in 0..50u32 {
        assert_eq!(m.get(&i), Some(i + 1));
    }
    assert!(m.remove(&25));
    assert_eq!(m.get(&25), None);
    assert_eq!(m.len(), 49);
}

#[test]
fn test_add_up_collides_on_byte_permutations() {
    let mut m: HashTable<[u8; 2], u8, AddUp> = HashTable::new(64, AddUp);
    m.insert([1, 2], 1);
    m.insert([2, 1], 2);
    m.insert([3, 0], 3);

    // all three sum to 3 and share a bucket, but remain distinct keys
    let dist = m.distribution();
    assert_eq!(dist.used_buckets(), 1);
    assert_eq!(dist.bucket_sizes()[3], 3);
    assert_eq!(m.get(&[1, 2]), Some(1));
    assert_eq!(m.get(&[2, 1]), Some(2));
    assert_eq!(m.get(&[3, 0]), Some(3));
}

#[test]
fn test_one_at_a_time_spreads_sequential_keys() {
    let mut good: HashTable<u32, u32> = HashTable::with_buckets(4096);
    let mut poor: HashTable<u32, u32, AddUp> = HashTable::new(4096, AddUp);
    for i in 0..1000 {
        good.insert(i * 256, i);
        poor.insert(i * 256, i);
    }

    let good = good.distribution();
    let poor = poor.distribution();
    assert!(good.used_buckets() > poor.used_buckets());
    assert!(good.average_used_bucket_size() < poor.average_used_bucket_size());
}

#[test]
fn test_seeded_hasher() {
    let mut m: HashTable<u64, u64, Seeded> = HashTable::new(8, Seeded::new());
    for i in 0..100 {
        m.insert(i, i * i);
    }
    for i in 0..100 {
        assert_eq!(m.get(&i), Some(i * i));
    }

    let a = Seeded::with_seeds(1, 2, 3, 4);
    let b = a.clone();
    let bytes = 99u64.key_bytes();
    assert_eq!(a.hash_bytes(&bytes), b.hash_bytes(&bytes));
}

#[test]
fn test_lookup_hashes_once() {
    let hasher = CountingHasher {
        calls: Cell::new(0),
    };
    let mut m: HashTable<u32, u32, CountingHasher> = HashTable::new(64, hasher);
    m.insert(1, 1);
    let before = m.hasher().calls.get();
    assert_eq!(m.get(&1), Some(1));
    assert_eq!(m.hasher().calls.get(), before + 1);
}

#[test]
fn test_resize_rehashes_each_entry_once() {
    let hasher = CountingHasher {
        calls: Cell::new(0),
    };
    // 4 * 0.7 = 2.8; the 4th key triggers a resize of 3 entries
    let mut m: HashTable<u32, u32, CountingHasher> = HashTable::new(4, hasher);
    for k in 0..3 {
        m.insert(k, k);
    }
    assert_eq!(m.hasher().calls.get(), 3);
    m.insert(3, 3);
    // initial hash, 3 rehashes, recomputed index for the new key
    assert_eq!(m.hasher().calls.get(), 3 + 1 + 3 + 1);
    assert_eq!(m.bucket_count(), 8);
}
