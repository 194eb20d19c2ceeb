//! hashtable_rs: a chained hash table with pluggable byte-level hash functions.
//!
//! Keys are hashed through an explicit byte form ([`KeyBytes`]) by a [`ByteHasher`], which can be
//! a plain `fn(&[u8]) -> u32`, a closure, or a stateful strategy such as [`Seeded`]. The table
//! doubles its bucket count when the entry count passes `bucket_count * max_load_factor` and never
//! shrinks.
//!
//! ```
//! use hashtable_rs::{HashTable, OneAtATime};
//!
//! let mut uids: HashTable<u32, u32> = HashTable::new(2048, OneAtATime);
//! uids.insert(7, 0);
//! assert_eq!(uids.get(&7), Some(0));
//! assert!(uids.remove(&7));
//! assert!(!uids.remove(&7));
//! ```

mod config;
mod distribution;
mod error;
mod hash;
mod slots;
mod table;

pub use config::{TableConfig, DEFAULT_INITIAL_SIZE, DEFAULT_MAX_LOAD_FACTOR};
pub use distribution::Distribution;
pub use error::ConfigError;
pub use hash::{add_up_hash, one_at_a_time_hash, AddUp, ByteHasher, KeyBytes, OneAtATime, Seeded};
pub use slots::{PackedSlots, SlotId};
pub use table::{HashTable, Iter};
