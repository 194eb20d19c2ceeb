//! Packed storage addressed by stable 32-bit identifiers.
//!
//! Values live contiguously in a `Vec` so they can be walked without gaps. A [`HashTable`] maps
//! each identifier to the value's current position; removing from the middle moves the last
//! value into the hole and re-points its identifier.

use crate::config::TableConfig;
use crate::hash::OneAtATime;
use crate::table::HashTable;

/// Identifier handed out by [`PackedSlots::insert`]. Ids are never reused by the same store.
pub type SlotId = u32;

/// Expected entry count when no capacity is given.
const DEFAULT_CAPACITY: usize = 1024;

/// Dense value array with O(1) amortized lookup and removal by [`SlotId`].
pub struct PackedSlots<T> {
    items: Vec<(SlotId, T)>,
    index: HashTable<SlotId, u32>,
    next_id: SlotId,
}

impl<T> PackedSlots<T> {
    /// Store sized for about 1024 values: 2048 buckets, 0.7 load factor, one-at-a-time hash.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let config = TableConfig::for_capacity(capacity);
        Self {
            items: Vec::with_capacity(capacity),
            index: HashTable::with_max_load_factor(
                config.initial_size,
                OneAtATime,
                config.max_load_factor,
            ),
            next_id: 0,
        }
    }

    /// Append `value` and return its new id.
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` ids have been handed out.
    pub fn insert(&mut self, value: T) -> SlotId {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .unwrap_or_else(|| panic!("slot id space exhausted"));
        let pos = self.items.len() as u32;
        self.items.push((id, value));
        self.index.insert(id, pos);
        id
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        let pos = self.index.get(&id)?;
        Some(&self.items[pos as usize].1)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        let pos = self.index.get(&id)?;
        Some(&mut self.items[pos as usize].1)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove and return the value for `id`, keeping the array packed.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let pos = self.index.get(&id)?;
        self.index.remove(&id);

        let (_, value) = self.items.swap_remove(pos as usize);
        if let Some(&(moved_id, _)) = self.items.get(pos as usize) {
            tracing::trace!(moved_id, from = self.items.len(), to = pos, "remapping slot");
            self.index.insert(moved_id, pos);
        }
        Some(value)
    }

    /// Drop every value. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        self.index.clear();
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate `(id, value)` in packed order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        self.items.iter().map(|(id, v)| (*id, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> + '_ {
        self.items.iter_mut().map(|(id, v)| (*id, v))
    }

    /// The packed `(id, value)` array.
    pub fn as_slice(&self) -> &[(SlotId, T)] {
        &self.items
    }

    /// The id-to-position table, for diagnostics.
    pub fn index(&self) -> &HashTable<SlotId, u32> {
        &self.index
    }
}

impl<T> Default for PackedSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}
