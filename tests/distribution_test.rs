use hashtable_rs::{AddUp, HashTable};

#[test]
fn test_distribution_of_small_keys() {
    // with add-up, key k < 256 hashes to k
    let mut m: HashTable<u32, (), AddUp> = HashTable::new(8, AddUp);
    for k in 0..4 {
        m.insert(k, ());
    }

    let d = m.distribution();
    assert_eq!(d.bucket_sizes(), &[1, 1, 1, 1, 0, 0, 0, 0]);
    assert_eq!(d.used_buckets(), 4);
    assert_eq!(d.used_percent(), 50.0);
    assert_eq!(d.average_used_bucket_size(), Some(1.0));

    let text = d.to_string();
    assert!(text.starts_with("Hash Table Distribution:\n\n11110000\n"));
    assert!(text.contains("% used buckets: 50.0000\n"));
    assert!(text.contains("Average (used) bucket size: 1.0000\n"));
}

#[test]
fn test_distribution_shows_collisions() {
    // 1 and 256 both add up to 1
    let mut m: HashTable<u32, (), AddUp> = HashTable::new(4, AddUp);
    m.insert(1, ());
    m.insert(256, ());

    let d = m.distribution();
    assert_eq!(d.bucket_sizes(), &[0, 2, 0, 0]);
    assert_eq!(d.max_bucket_size(), 2);
    assert_eq!(d.average_used_bucket_size(), Some(2.0));
}

#[test]
fn test_distribution_saturates() {
    let mut m = HashTable::with_max_load_factor(64, |_: &[u8]| 5u32, 1.0);
    for k in 0..12u32 {
        m.insert(k, k);
    }
    let text = m.distribution().to_string();
    let row = text.lines().nth(2).unwrap();
    assert_eq!(row.len(), 64);
    assert_eq!(&row[..6], "00000+");
}

#[test]
fn test_distribution_of_empty_table() {
    let m: HashTable<u32, u32> = HashTable::with_buckets(3);
    let d = m.distribution();
    assert_eq!(d.bucket_sizes(), &[0, 0, 0]);
    assert_eq!(d.used_percent(), 0.0);
    assert_eq!(d.average_used_bucket_size(), None);
    assert!(d.to_string().contains("Average (used) bucket size: n/a"));
}

#[test]
fn test_distribution_percent_of_odd_bucket_count() {
    // 1 of 3 buckets used
    let mut m: HashTable<u32, (), AddUp> = HashTable::new(3, AddUp);
    m.insert(1, ());

    let text = m.distribution().to_string();
    assert!(text.contains("% used buckets: 33.3333\n"));
    assert!(text.contains("Average (used) bucket size: 1.0000\n"));
}
