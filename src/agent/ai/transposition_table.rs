use crate::error::ConfigError;

/// Bound type for transposition table entries
///
/// This is crucial for alpha-beta pruning:
/// - Exact: The exact score for this position
/// - LowerBound: Score is at least this value (beta cutoff)
/// - UpperBound: Score is at most this value (all moves failed low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    LowerBound,
    UpperBound,
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionTableEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Search depth when this position was evaluated
    pub depth: u8,
    pub bound: Bound,
    pub value: i32,
}

/// Fixed-size transposition table with single-slot replacement
///
/// The slot for a hash is `hash & capacity`, where capacity is `2^n - 1`.
/// There is no probing and no chaining: a store always overwrites its slot,
/// whatever the depth of the entry it evicts, and a probe only returns an
/// entry whose full hash matches. Two positions sharing a slot therefore
/// evict each other and read as misses for one another.
pub struct TranspositionTable {
    slots: Vec<Option<TranspositionTableEntry>>,
    capacity: usize,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
    /// Statistics: number of stores
    pub stores: u64,
    /// Statistics: stores that evicted a different position
    pub collisions: u64,
}

impl TranspositionTable {
    pub const DEFAULT_CAPACITY: usize = 2047;

    /// Create a transposition table with the default capacity (2047)
    pub fn new() -> Self {
        Self::allocate(Self::DEFAULT_CAPACITY)
    }

    /// Create a transposition table indexed by `hash & capacity`
    ///
    /// # Arguments
    /// * `capacity` - Index mask, must be `2^n - 1` (e.g. 2047, 32767)
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        validate_capacity(capacity)?;
        Ok(Self::allocate(capacity))
    }

    fn allocate(capacity: usize) -> Self {
        // Indices run from 0 to capacity inclusive
        Self {
            slots: vec![None; capacity + 1],
            capacity,
            hits: 0,
            misses: 0,
            stores: 0,
            collisions: 0,
        }
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash & self.capacity as u64) as usize
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probe the transposition table for a position
    ///
    /// Returns the entry only if its stored hash matches; a slot holding a
    /// different position is a miss. Updates hit/miss statistics.
    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry> {
        match self.slots[self.index(hash)] {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(entry)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store an entry, unconditionally replacing whatever held the slot
    pub fn store(&mut self, hash: u64, depth: u8, bound: Bound, value: i32) {
        let idx = self.index(hash);
        if matches!(self.slots[idx], Some(old) if old.hash != hash) {
            self.collisions += 1;
        }
        self.stores += 1;
        self.slots[idx] = Some(TranspositionTableEntry {
            hash,
            depth,
            bound,
            value,
        });
    }

    /// Clear the transposition table
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.hits = 0;
        self.misses = 0;
        self.stores = 0;
        self.collisions = 0;
    }

    /// Number of slots currently holding an entry
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Memory held by the slot array in bytes
    pub fn memory_usage(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Option<TranspositionTableEntry>>()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacities must be one less than a power of two so `hash & capacity`
/// can stand in for a modulus.
pub fn validate_capacity(capacity: usize) -> Result<(), ConfigError> {
    match capacity.checked_add(1) {
        Some(slots) if capacity > 0 && slots.is_power_of_two() => Ok(()),
        _ => Err(ConfigError::Capacity(capacity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_probe() {
        let mut table = TranspositionTable::new();
        let hash = 0x1234567890ABCDEF;

        table.store(hash, 5, Bound::Exact, 3);

        let retrieved = table.probe(hash).unwrap();
        assert_eq!(retrieved.hash, hash);
        assert_eq!(retrieved.depth, 5);
        assert_eq!(retrieved.value, 3);
        assert_eq!(retrieved.bound, Bound::Exact);
    }

    #[test]
    fn test_alias_is_a_miss() {
        let mut table = TranspositionTable::with_capacity(15).unwrap();
        // Same low 4 bits, different hash
        let a = 0x0000_0000_0000_0013;
        let b = 0x0000_0000_0001_0003;

        table.store(a, 3, Bound::Exact, 7);
        assert!(table.probe(b).is_none());
        assert!(table.probe(a).is_some());
        assert_eq!(table.hits, 1);
        assert_eq!(table.misses, 1);
    }

    #[test]
    fn test_always_replace_regardless_of_depth() {
        let mut table = TranspositionTable::with_capacity(15).unwrap();
        let deep = 0x20;
        let shallow = 0x30;

        table.store(deep, 9, Bound::Exact, 1);
        table.store(shallow, 1, Bound::LowerBound, -4);

        // Deep entry is gone, the shallow one won the slot
        assert!(table.probe(deep).is_none());
        let entry = table.probe(shallow).unwrap();
        assert_eq!(entry.depth, 1);
        assert_eq!(entry.bound, Bound::LowerBound);
        assert_eq!(table.collisions, 1);
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn test_overwrite_same_position() {
        let mut table = TranspositionTable::new();
        table.store(77, 4, Bound::UpperBound, 0);
        table.store(77, 4, Bound::Exact, 2);

        assert_eq!(table.probe(77).unwrap().value, 2);
        assert_eq!(table.collisions, 0);
        assert_eq!(table.stores, 2);
    }

    #[test]
    fn test_highest_index_is_in_bounds() {
        let mut table = TranspositionTable::with_capacity(2047).unwrap();
        let hash = u64::MAX; // maps to slot 2047
        table.store(hash, 2, Bound::Exact, 0);
        assert!(table.probe(hash).is_some());
    }

    #[test]
    fn test_capacity_validation() {
        for ok in [1, 3, 2047, 32767] {
            assert!(TranspositionTable::with_capacity(ok).is_ok(), "{} should be valid", ok);
        }
        for bad in [0, 2, 1000, 2048, usize::MAX] {
            assert_eq!(
                TranspositionTable::with_capacity(bad).err(),
                Some(ConfigError::Capacity(bad))
            );
        }
    }

    #[test]
    fn test_capacity_and_memory_usage() {
        let table = TranspositionTable::with_capacity(15).unwrap();
        assert_eq!(table.capacity(), 15);
        let slot = std::mem::size_of::<Option<TranspositionTableEntry>>();
        assert_eq!(table.memory_usage(), 16 * slot);

        let table = TranspositionTable::default();
        assert_eq!(table.capacity(), TranspositionTable::DEFAULT_CAPACITY);
        assert_eq!(table.memory_usage(), 2048 * slot);
    }

    #[test]
    fn test_clear() {
        let mut table = TranspositionTable::new();
        table.store(123, 5, Bound::Exact, 1);
        table.probe(123);

        assert_eq!(table.occupied(), 1);

        table.clear();

        assert_eq!(table.occupied(), 0);
        assert_eq!(table.hits, 0);
        assert_eq!(table.misses, 0);
        assert!(table.probe(123).is_none());
    }

    #[test]
    fn test_hit_rate() {
        let mut table = TranspositionTable::new();
        assert_eq!(table.hit_rate(), 0.0);

        table.store(123, 5, Bound::Exact, 1);

        // One hit
        table.probe(123);
        // One miss
        table.probe(456);

        assert_eq!(table.hit_rate(), 0.5);
    }
}
