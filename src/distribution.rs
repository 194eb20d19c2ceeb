//! Bucket occupancy diagnostics, for comparing hash functions offline.

use std::fmt;

/// Buckets holding this many pairs or more are drawn as `+`.
const SATURATION: usize = 10;

/// Per-bucket pair counts captured from a [`HashTable`](crate::HashTable).
///
/// Ideally every bucket holds 0 or 1 pairs. Long chains mean the hash function is clustering
/// keys and lookups degrade towards a linear scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    bucket_sizes: Vec<usize>,
}

impl Distribution {
    pub(crate) fn from_bucket_sizes(bucket_sizes: Vec<usize>) -> Self {
        Self { bucket_sizes }
    }

    /// Pair count of every bucket, in bucket order.
    pub fn bucket_sizes(&self) -> &[usize] {
        &self.bucket_sizes
    }

    /// Number of buckets holding at least one pair.
    pub fn used_buckets(&self) -> usize {
        self.bucket_sizes.iter().filter(|&&n| n > 0).count()
    }

    /// Longest chain in the table.
    pub fn max_bucket_size(&self) -> usize {
        self.bucket_sizes.iter().copied().max().unwrap_or(0)
    }

    /// Share of non-empty buckets, in percent.
    pub fn used_percent(&self) -> f32 {
        if self.bucket_sizes.is_empty() {
            return 0.0;
        }
        100.0 * self.used_buckets() as f32 / self.bucket_sizes.len() as f32
    }

    /// Mean chain length over non-empty buckets; `None` when the table is empty.
    pub fn average_used_bucket_size(&self) -> Option<f32> {
        let used = self.used_buckets();
        if used == 0 {
            return None;
        }
        let total: usize = self.bucket_sizes.iter().sum();
        Some(total as f32 / used as f32)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hash Table Distribution:")?;
        writeln!(f)?;
        for &n in &self.bucket_sizes {
            if n < SATURATION {
                write!(f, "{n}")?;
            } else {
                write!(f, "+")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "% used buckets: {:.4}", self.used_percent())?;
        match self.average_used_bucket_size() {
            Some(avg) => writeln!(f, "Average (used) bucket size: {avg:.4}"),
            None => writeln!(f, "Average (used) bucket size: n/a"),
        }
    }
}
