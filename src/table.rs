//! The elastic hash table: an ordered cascade of geometrically sized
//! sub-arrays with double-hashing probes bounded by per-level budgets.

use std::mem;

use crate::error::{Result, TableError};
use crate::hash::{dual_hash, probe_index};
use crate::level::{level_sizes, Entry, Slot, SubArray};

/// Smallest total capacity a table is created with; smaller requests are
/// floored to this.
pub const MIN_CAPACITY: usize = 64;
/// Slot count below which the layout builder stops splitting levels.
pub const DEFAULT_MIN_LEVEL_SIZE: usize = 16;
/// Live-entry fraction of total capacity that triggers a doubling rebuild.
pub const DEFAULT_MAX_LOAD: f64 = 0.90;
/// Tombstone fraction of total capacity that triggers a compacting rebuild.
pub const DEFAULT_TOMBSTONE_RATIO: f64 = 0.15;

/// Per-level occupancy snapshot, reported in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    /// Level index; 0 is the largest sub-array.
    pub level: usize,
    /// Slot count of the sub-array.
    pub capacity: usize,
    /// Live entries in the sub-array.
    pub live: usize,
    /// Tombstoned slots in the sub-array.
    pub tombstones: usize,
}

/// A byte-keyed hash table implementing elastic hashing.
///
/// The slot space is split into geometrically decreasing sub-arrays;
/// insertions cascade from the largest level to the smallest, each level
/// bounded by a probe budget derived from its fill. Keys and values are
/// arbitrary byte strings copied into table-owned storage.
///
/// Note: this structure is single-owner and single-threaded; callers
/// needing shared access must serialize externally.
#[derive(Debug)]
pub struct ElasticTable {
    /// Sub-arrays in decreasing capacity order
    levels: Vec<SubArray>,
    /// Sum of sub-array capacities
    total_capacity: usize,
    /// Live entries across all levels
    count: usize,
    /// Slot count below which no further level split happens
    min_level_size: usize,
    /// Live-load fraction that triggers a doubling rebuild
    max_load: f64,
    /// Tombstone fraction that triggers a compacting rebuild
    tombstone_ratio: f64,
}

impl ElasticTable {
    /// Creates a table with the minimum total capacity.
    pub fn new() -> Result<Self> {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates a table with at least `capacity` total slots.
    ///
    /// Requests below [`MIN_CAPACITY`] are floored to it.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let capacity = capacity.max(MIN_CAPACITY);
        let levels = build_levels(capacity, DEFAULT_MIN_LEVEL_SIZE)?;
        Ok(Self {
            levels,
            total_capacity: capacity,
            count: 0,
            min_level_size: DEFAULT_MIN_LEVEL_SIZE,
            max_load: DEFAULT_MAX_LOAD,
            tombstone_ratio: DEFAULT_TOMBSTONE_RATIO,
        })
    }

    /// Inserts a key/value pair, replacing the value if the key is present.
    ///
    /// Both slices are copied into table-owned storage. Replacement leaves
    /// the entry in its slot and does not change [`len`](Self::len).
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        if let Some((level_idx, slot_idx)) = self.find_key(key) {
            let new_value = copy_bytes(value)?;
            if let Slot::Occupied(entry) = &mut self.levels[level_idx].slots[slot_idx] {
                entry.value = new_value;
            }
            return Ok(());
        }

        if self.count >= (self.total_capacity as f64 * self.max_load) as usize {
            self.grow()?;
        }

        let tombstones = self.tombstones();
        if tombstones >= (self.total_capacity as f64 * self.tombstone_ratio) as usize {
            self.rebuild(self.total_capacity)?;
        }

        let entry = Entry { key: copy_bytes(key)?, value: copy_bytes(value)? };
        self.insert_owned(entry)
    }

    /// Returns the value stored for `key`, if any.
    ///
    /// The slice borrows the table's internal storage; copy it out if it
    /// must outlive the next mutation.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let (level_idx, slot_idx) = self.find_key(key)?;
        match &self.levels[level_idx].slots[slot_idx] {
            Slot::Occupied(entry) => Some(&entry.value[..]),
            _ => None,
        }
    }

    /// Returns a mutable view of the value stored for `key`, if any.
    ///
    /// The value's length is fixed; only its bytes can be rewritten.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut [u8]> {
        let (level_idx, slot_idx) = self.find_key(key)?;
        match &mut self.levels[level_idx].slots[slot_idx] {
            Slot::Occupied(entry) => Some(&mut entry.value[..]),
            _ => None,
        }
    }

    /// Removes `key`, returning true if it was present.
    ///
    /// The slot becomes a tombstone; the space is reclaimed on the next
    /// rebuild.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        let Some((level_idx, slot_idx)) = self.find_key(key) else {
            return false;
        };
        let sub = &mut self.levels[level_idx];
        sub.slots[slot_idx] = Slot::Tombstone;
        sub.live -= 1;
        sub.tombstones += 1;
        self.count -= 1;
        true
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.find_key(key).is_some()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the total slot count across all levels.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.total_capacity
    }

    /// Returns the number of sub-arrays.
    #[must_use]
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Returns the total tombstone count across all levels.
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.levels.iter().map(|sub| sub.tombstones).sum()
    }

    /// Returns the current live load factor.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.total_capacity as f64
    }

    /// Returns a per-level occupancy snapshot in construction order.
    #[must_use]
    pub fn level_stats(&self) -> Vec<LevelStats> {
        self.levels
            .iter()
            .map(|sub| LevelStats {
                level: sub.level,
                capacity: sub.capacity(),
                live: sub.live,
                tombstones: sub.tombstones,
            })
            .collect()
    }

    /// Sets the live-load fraction that triggers a doubling rebuild.
    pub fn set_max_load(&mut self, max_load: f64) {
        self.max_load = max_load.clamp(0.05, 0.95);
    }

    /// Sets the tombstone fraction that triggers a compacting rebuild.
    pub fn set_tombstone_ratio(&mut self, ratio: f64) {
        self.tombstone_ratio = ratio.clamp(0.01, 0.95);
    }

    /// Returns an iterator over the live (key, value) pairs.
    ///
    /// Entries come out in (level ascending, slot ascending) order, which
    /// is unspecified from the caller's point of view and changes across
    /// rebuilds.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_> {
        Iter { levels: &self.levels, level_idx: 0, slot_idx: 0 }
    }

    /// Removes every entry, keeping the current level layout.
    pub fn clear(&mut self) {
        for sub in &mut self.levels {
            for slot in &mut sub.slots {
                *slot = Slot::Empty;
            }
            sub.live = 0;
            sub.tombstones = 0;
        }
        self.count = 0;
    }

    /// Locates `key`, returning its (level index, slot index).
    ///
    /// An empty slot ends the search within a level: the probe sequence
    /// for this key was never forced past it. Tombstones do not, since the
    /// key may have been inserted past a later-deleted slot.
    fn find_key(&self, key: &[u8]) -> Option<(usize, usize)> {
        for (level_idx, sub) in self.levels.iter().enumerate() {
            if sub.live == 0 {
                continue;
            }
            let capacity = sub.capacity();
            let budget = sub.probe_budget();
            let (h1, h2) = dual_hash(key, sub.level);
            for attempt in 0..budget {
                let slot_idx = probe_index(h1, h2, attempt, capacity);
                match &sub.slots[slot_idx] {
                    Slot::Occupied(entry) if &entry.key[..] == key => {
                        return Some((level_idx, slot_idx));
                    }
                    Slot::Empty => break,
                    _ => {}
                }
            }
        }
        None
    }

    /// Places an already-owned entry, growing the table whenever every
    /// level's probe budget is exhausted. A doubling rebuild guarantees
    /// headroom, so the retry loop terminates.
    fn insert_owned(&mut self, mut entry: Entry) -> Result<()> {
        loop {
            match self.try_place(entry) {
                Ok(()) => {
                    self.count += 1;
                    return Ok(());
                }
                Err(unplaced) => {
                    entry = unplaced;
                    self.grow()?;
                }
            }
        }
    }

    /// Cascades the entry through the levels; hands it back on exhaustion.
    fn try_place(&mut self, entry: Entry) -> std::result::Result<(), Entry> {
        for sub in &mut self.levels {
            let capacity = sub.capacity();
            let budget = sub.probe_budget();
            let (h1, h2) = dual_hash(&entry.key, sub.level);
            for attempt in 0..budget {
                let slot_idx = probe_index(h1, h2, attempt, capacity);
                let was_tombstone = match &sub.slots[slot_idx] {
                    Slot::Occupied(_) => continue,
                    Slot::Empty => false,
                    Slot::Tombstone => true,
                };
                sub.slots[slot_idx] = Slot::Occupied(entry);
                if was_tombstone {
                    sub.tombstones -= 1;
                }
                sub.live += 1;
                return Ok(());
            }
        }
        Err(entry)
    }

    /// Doubles the total capacity via a rebuild.
    fn grow(&mut self) -> Result<()> {
        let doubled = self
            .total_capacity
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow { current: self.total_capacity })?;
        self.rebuild(doubled.max(MIN_CAPACITY))
    }

    /// Replaces the level structure with a fresh one of `new_capacity`
    /// slots, re-seating every live entry.
    ///
    /// Payload buffers are moved, never copied: entries are drained into a
    /// scratch vector (each vacated slot tagged empty immediately), the old
    /// levels are discarded, and the entries cascade into the new layout
    /// through the owning insert path.
    fn rebuild(&mut self, new_capacity: usize) -> Result<()> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(self.count)?;
        for sub in &mut self.levels {
            for slot in &mut sub.slots {
                if let Slot::Occupied(entry) = mem::replace(slot, Slot::Empty) {
                    entries.push(entry);
                }
            }
        }

        self.levels = Vec::new();
        self.count = 0;
        match build_levels(new_capacity, self.min_level_size) {
            Ok(levels) => {
                self.levels = levels;
                self.total_capacity = new_capacity;
            }
            Err(err) => {
                // Nothing to re-seat into: drop the collected entries and
                // leave the table empty but usable.
                self.total_capacity = 0;
                return Err(err);
            }
        }

        for entry in entries {
            self.insert_owned(entry)?;
        }
        Ok(())
    }
}

/// Builds the sub-array sequence for a total capacity.
fn build_levels(capacity: usize, min_level_size: usize) -> Result<Vec<SubArray>> {
    let sizes = level_sizes(capacity, min_level_size);
    let mut levels = Vec::new();
    levels.try_reserve_exact(sizes.len())?;
    for (level, &size) in sizes.iter().enumerate() {
        levels.push(SubArray::new(level, size)?);
    }
    Ok(levels)
}

/// Copies a byte slice into a table-owned buffer.
fn copy_bytes(src: &[u8]) -> Result<Box<[u8]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())?;
    buf.extend_from_slice(src);
    Ok(buf.into_boxed_slice())
}

/// Iterator over the live (key, value) pairs of a table.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// The table's sub-arrays
    levels: &'a [SubArray],
    /// Current level position
    level_idx: usize,
    /// Current slot position within the level
    slot_idx: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(sub) = self.levels.get(self.level_idx) {
            while self.slot_idx < sub.capacity() {
                let slot_idx = self.slot_idx;
                self.slot_idx += 1;
                if let Slot::Occupied(entry) = &sub.slots[slot_idx] {
                    return Some((&entry.key[..], &entry.value[..]));
                }
            }
            self.level_idx += 1;
            self.slot_idx = 0;
        }
        None
    }
}
