//! Per-query cache of decoded index records
//!
//! Decoding a record is the expensive part of every search step. A
//! [`RecordCache`] keeps the records it has fetched in an append-only list and
//! finds them again through a small open-addressed table keyed by node.
//!
//! The query methods take `&self` but fill the cache lazily, so the cache
//! lives behind a [`RefCell`]. That makes a `RecordCache` `!Sync`: the index
//! can be shared by any number of threads, but every thread (or other
//! concurrent query context) must build its own cache.
//!
//! Records are handed out as [`Rc`] handles. No borrow of the table outlives
//! a method call, so a caller may hold a record while the cache grows.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pathidx_core::{bucket, BidirectionalState, NodeId, Range, Record, RecordSource, SearchState};
use tracing::{debug, error, trace};

use crate::{Error, Result};

/// Default table capacity for caches reused across many records
pub const INITIAL_CAPACITY: usize = 256;

/// Table capacity for caches expected to hold a single record at a time
pub const SINGLE_CAPACITY: usize = 2;

/// Occupancy limit as a fraction of the table capacity
pub const MAX_LOAD_FACTOR: f64 = 0.77;

/// Configuration of the cache table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheConfig {
    /// Initial number of table slots (power of two)
    pub initial_capacity: usize,
    /// Rehash once more than this fraction of the slots is in use
    pub max_load_factor: f64,
}

impl CacheConfig {
    /// Config for scratch caches that hold one record at a time
    pub fn single_record() -> Self {
        Self {
            initial_capacity: SINGLE_CAPACITY,
            max_load_factor: MAX_LOAD_FACTOR,
        }
    }

    /// Config with at least `capacity` slots, rounded up to a power of two
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let initial_capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .ok_or(Error::InvalidConfig("cache capacity is too large"))?;
        Ok(Self {
            initial_capacity,
            max_load_factor: MAX_LOAD_FACTOR,
        })
    }

    /// Set the load factor that triggers a rehash
    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capacity.is_power_of_two() {
            return Err(Error::InvalidConfig("cache capacity must be a power of two"));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(Error::InvalidConfig("load factor must be in (0, 1)"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            max_load_factor: MAX_LOAD_FACTOR,
        }
    }
}

/// Table entry mapping a node to its position in the record list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    node: NodeId,
    offset: usize,
}

impl Slot {
    const EMPTY: Slot = Slot {
        node: NodeId::MAX,
        offset: usize::MAX,
    };

    fn is_empty(&self) -> bool {
        self.offset == usize::MAX
    }
}

/// Slot table and the records it points into
struct CacheTable<R> {
    slots: Vec<Slot>,
    records: Vec<Rc<R>>,
}

impl<R> CacheTable<R> {
    fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; capacity],
            records: Vec::with_capacity(capacity),
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot holding `node`, or the free slot where it belongs
    ///
    /// Probes with triangular offsets, which visit every slot of a
    /// power-of-two table within `capacity` attempts.
    fn index_offset(&self, node: NodeId) -> Result<usize> {
        let capacity = self.capacity();
        let mask = capacity - 1;
        let mut offset = bucket(node, capacity);
        for attempt in 0..capacity {
            let slot = self.slots[offset];
            if slot.is_empty() || slot.node == node {
                return Ok(offset);
            }
            offset = (offset + attempt + 1) & mask;
        }

        error!(
            node,
            size = self.records.len(),
            capacity,
            "record cache probe sequence exhausted"
        );
        Err(Error::ProbeExhausted {
            node,
            size: self.records.len(),
            capacity,
        })
    }

    fn over_load(&self, max_load_factor: f64) -> bool {
        self.records.len() as f64 > max_load_factor * self.capacity() as f64
    }

    /// Double the table and reinsert every occupied slot
    fn rehash(&mut self) -> Result<()> {
        let old_capacity = self.capacity();
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; 2 * old_capacity]);
        for slot in old_slots.into_iter().filter(|slot| !slot.is_empty()) {
            let offset = self.index_offset(slot.node)?;
            self.slots[offset] = slot;
        }
        debug!(
            records = self.records.len(),
            old_capacity,
            new_capacity = self.capacity(),
            "record cache rehashed"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.slots.fill(Slot::EMPTY);
        self.records.clear();
    }
}

/// Cache of decoded records over a shared immutable index
///
/// Slots returned by [`find_record`](Self::find_record) stay valid until
/// [`clear_cache`](Self::clear_cache).
pub struct RecordCache<'a, I: RecordSource> {
    index: &'a I,
    max_load_factor: f64,
    table: RefCell<CacheTable<I::Record>>,
}

impl<'a, I: RecordSource> RecordCache<'a, I> {
    /// Cache with the default capacity
    pub fn new(index: &'a I) -> Self {
        Self::from_parts(index, CacheConfig::default())
    }

    /// Cache sized for a single record at a time
    pub fn single_record(index: &'a I) -> Self {
        Self::from_parts(index, CacheConfig::single_record())
    }

    /// Cache with an explicit configuration
    pub fn with_config(index: &'a I, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(index, config))
    }

    fn from_parts(index: &'a I, config: CacheConfig) -> Self {
        Self {
            index,
            max_load_factor: config.max_load_factor,
            table: RefCell::new(CacheTable::new(config.initial_capacity)),
        }
    }

    /// The underlying index
    pub fn index(&self) -> &'a I {
        self.index
    }

    /// Number of cached records
    pub fn cache_size(&self) -> usize {
        self.table.borrow().records.len()
    }

    /// Number of table slots
    pub fn cache_capacity(&self) -> usize {
        self.table.borrow().capacity()
    }

    /// Whether the index has a record for `node`
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains(node)
    }

    /// Drop every cached record, keeping the table capacity
    pub fn clear_cache(&self) {
        let mut table = self.table.borrow_mut();
        let dropped = table.records.len();
        table.clear();
        debug!(dropped, capacity = table.capacity(), "record cache cleared");
    }

    /// Slot of the cached record of `node`, fetching it on a miss
    ///
    /// Each node is fetched from the index at most once between clears.
    pub fn find_record(&self, node: NodeId) -> Result<usize> {
        let mut table = self.table.borrow_mut();
        let index_offset = table.index_offset(node)?;
        let slot = table.slots[index_offset];
        if !slot.is_empty() {
            return Ok(slot.offset);
        }

        trace!(node, "record cache miss");
        let offset = table.records.len();
        table.records.push(Rc::new(self.index.record(node)));
        table.slots[index_offset] = Slot { node, offset };
        // Low load factors may need more than one doubling.
        while table.over_load(self.max_load_factor) {
            table.rehash()?;
        }

        Ok(offset)
    }

    /// Shared handle to the cached record at `slot`
    ///
    /// The handle stays usable across later cache calls, including
    /// [`clear_cache`](Self::clear_cache).
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not returned by `find_record` since the last clear.
    pub fn cached_record(&self, slot: usize) -> Rc<I::Record> {
        Rc::clone(&self.table.borrow().records[slot])
    }

    /// Target of the `i`-th outgoing edge of the record at `slot`
    pub fn successor(&self, slot: usize, i: usize) -> NodeId {
        self.cached_record(slot).successor(i)
    }

    /// Outdegree of the record at `slot`
    pub fn outdegree(&self, slot: usize) -> usize {
        self.cached_record(slot).outdegree()
    }

    /// All rows of `node`, or an empty state if the index lacks it
    pub fn find(&self, node: NodeId) -> Result<SearchState> {
        if !self.contains(node) {
            return Ok(SearchState::empty());
        }
        let slot = self.find_record(node)?;
        let size = self.cached_record(slot).size();
        Ok(SearchState::new(node, Range::prefix(size)))
    }

    /// Bidirectional state matching the single node `node`
    pub fn bd_find(&self, node: NodeId) -> Result<BidirectionalState> {
        let forward = self.find(node)?;
        if forward.is_empty() {
            return Ok(BidirectionalState::empty());
        }
        let backward = SearchState::new(self.index.reverse(node), forward.range);
        Ok(BidirectionalState::new(forward, backward))
    }

    /// Extend `state` along the `i`-th outgoing edge of the record at `slot`
    ///
    /// `slot` must hold the record of `state.node`. Empty states stay empty
    /// without touching the cache.
    pub fn extend(&self, state: SearchState, slot: usize, i: usize) -> SearchState {
        if state.is_empty() {
            return SearchState::empty();
        }
        let record = self.cached_record(slot);
        let node = record.successor(i);
        SearchState::new(node, record.lf(state.range, node))
    }

    /// Extend `state` to `node`, fetching the record of `state.node` as needed
    pub fn extend_to(&self, state: SearchState, node: NodeId) -> Result<SearchState> {
        if state.is_empty() {
            return Ok(SearchState::empty());
        }
        let slot = self.find_record(state.node)?;
        let range = self.cached_record(slot).lf(state.range, node);
        Ok(SearchState::new(node, range))
    }

    /// Extend the forward side along the `i`-th outgoing edge of the record at `slot`
    ///
    /// `slot` must hold the record of `state.forward.node`.
    pub fn extend_forward(
        &self,
        state: BidirectionalState,
        slot: usize,
        i: usize,
    ) -> BidirectionalState {
        if state.is_empty() {
            return BidirectionalState::empty();
        }
        let record = self.cached_record(slot);
        let node = record.successor(i);
        let (range, reverse_offset) = record.bd_lf(state.forward.range, node);
        shift_backward(state, node, range, reverse_offset)
    }

    /// Extend the backward side along the `i`-th outgoing edge of the record at `slot`
    ///
    /// `slot` must hold the record of `state.backward.node`.
    pub fn extend_backward(
        &self,
        mut state: BidirectionalState,
        slot: usize,
        i: usize,
    ) -> BidirectionalState {
        state.flip();
        let mut state = self.extend_forward(state, slot, i);
        state.flip();
        state
    }

    /// Append `node` to the pattern matched by `state`
    pub fn extend_forward_to(
        &self,
        state: BidirectionalState,
        node: NodeId,
    ) -> Result<BidirectionalState> {
        if state.is_empty() {
            return Ok(BidirectionalState::empty());
        }
        let slot = self.find_record(state.forward.node)?;
        let (range, reverse_offset) = self.cached_record(slot).bd_lf(state.forward.range, node);
        Ok(shift_backward(state, node, range, reverse_offset))
    }

    /// Prepend `node` to the pattern matched by `state`
    pub fn extend_backward_to(
        &self,
        mut state: BidirectionalState,
        node: NodeId,
    ) -> Result<BidirectionalState> {
        state.flip();
        let mut state = self.extend_forward_to(state, self.index.reverse(node))?;
        state.flip();
        Ok(state)
    }
}

/// Apply a bidirectional LF result, keeping both sides the same size
fn shift_backward(
    mut state: BidirectionalState,
    node: NodeId,
    range: Range,
    reverse_offset: usize,
) -> BidirectionalState {
    if range.is_empty() {
        return BidirectionalState::empty();
    }
    state.forward = SearchState::new(node, range);
    let start = state.backward.range.start + reverse_offset;
    state.backward.range = Range::new(start, start + range.len() - 1);
    state
}

impl<I: RecordSource> fmt::Debug for RecordCache<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCache")
            .field("cache_size", &self.cache_size())
            .field("cache_capacity", &self.cache_capacity())
            .field("max_load_factor", &self.max_load_factor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryIndex, MemoryRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Index wrapper that counts record fetches
    struct CountingIndex {
        inner: MemoryIndex,
        fetches: AtomicUsize,
    }

    impl CountingIndex {
        fn new(inner: MemoryIndex) -> Self {
            Self {
                inner,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::Relaxed)
        }
    }

    impl RecordSource for CountingIndex {
        type Record = MemoryRecord;

        fn record(&self, node: NodeId) -> MemoryRecord {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            self.inner.record(node)
        }

        fn contains(&self, node: NodeId) -> bool {
            self.inner.contains(node)
        }
    }

    fn example_paths() -> Vec<Vec<NodeId>> {
        vec![
            vec![2, 4, 6, 8, 12, 14],
            vec![2, 4, 10, 12, 14],
            vec![2, 4, 6, 8, 12, 14],
            vec![2, 4, 10, 12, 16],
            vec![4, 6, 8, 12],
        ]
    }

    fn example_index(bidirectional: bool) -> MemoryIndex {
        MemoryIndex::from_paths(&example_paths(), bidirectional).unwrap()
    }

    /// Unidirectional search for `pattern`
    fn search(cache: &RecordCache<'_, MemoryIndex>, pattern: &[NodeId]) -> SearchState {
        let mut state = cache.find(pattern[0]).unwrap();
        for &node in &pattern[1..] {
            state = cache.extend_to(state, node).unwrap();
        }
        state
    }

    #[test]
    fn test_find_record_is_stable() {
        let index = CountingIndex::new(example_index(false));
        let cache = RecordCache::new(&index);

        let first = cache.find_record(4).unwrap();
        let second = cache.find_record(8).unwrap();
        assert_ne!(first, second);
        assert_eq!(cache.find_record(4).unwrap(), first);
        assert_eq!(cache.find_record(8).unwrap(), second);
        assert_eq!(index.fetches(), 2);
        assert_eq!(cache.cache_size(), 2);
    }

    #[test]
    fn test_load_factor_and_rehash() {
        let index = CountingIndex::new(MemoryIndex::default());
        let cache = RecordCache::single_record(&index);
        assert_eq!(cache.cache_capacity(), SINGLE_CAPACITY);

        let mut slots = Vec::new();
        for node in 0..1000u64 {
            slots.push(cache.find_record(node).unwrap());
            let capacity = cache.cache_capacity();
            assert!(capacity.is_power_of_two());
            assert!(cache.cache_size() as f64 <= MAX_LOAD_FACTOR * capacity as f64);
        }
        assert_eq!(index.fetches(), 1000);

        // Rehashing moves slots, never records.
        for (node, &slot) in (0..1000u64).zip(&slots) {
            assert_eq!(cache.find_record(node).unwrap(), slot);
        }
        assert_eq!(index.fetches(), 1000);
        assert_eq!(cache.cache_capacity(), 2048);
    }

    #[test]
    fn test_low_load_factor_keeps_occupancy_bound() {
        let index = CountingIndex::new(MemoryIndex::default());
        let config = CacheConfig::with_capacity(2)
            .unwrap()
            .with_max_load_factor(0.1);
        let cache = RecordCache::with_config(&index, config).unwrap();

        for node in 0..200u64 {
            cache.find_record(node).unwrap();
            let capacity = cache.cache_capacity();
            assert!(capacity.is_power_of_two());
            assert!(
                cache.cache_size() as f64 <= 0.1 * capacity as f64,
                "{} records in {} slots",
                cache.cache_size(),
                capacity
            );
        }
        for node in 0..200u64 {
            assert_eq!(cache.find_record(node).unwrap(), node as usize);
        }
        assert_eq!(index.fetches(), 200);
    }

    #[test]
    fn test_record_handle_outlives_cache_growth() {
        let index = example_index(true);
        let cache = RecordCache::single_record(&index);

        let slot = cache.find_record(4).unwrap();
        let record = cache.cached_record(slot);
        let next = cache.find_record(record.successor(0)).unwrap();
        assert_ne!(next, slot);

        // Fill past a rehash while the handle is alive.
        for node in index.nodes() {
            cache.find_record(node).unwrap();
        }
        let state = cache.extend_to(cache.find(4).unwrap(), record.successor(0)).unwrap();
        assert!(!state.is_empty());
        assert_eq!(record.outdegree(), cache.outdegree(slot));

        cache.clear_cache();
        assert_eq!(record.successor(0), index.record(4).successor(0));
    }

    #[test]
    fn test_clear_cache_keeps_capacity() {
        let index = CountingIndex::new(MemoryIndex::default());
        let cache = RecordCache::single_record(&index);
        for node in 0..10u64 {
            cache.find_record(node).unwrap();
        }
        let capacity = cache.cache_capacity();

        cache.clear_cache();
        assert_eq!(cache.cache_size(), 0);
        assert_eq!(cache.cache_capacity(), capacity);

        assert_eq!(cache.find_record(5).unwrap(), 0);
        assert_eq!(index.fetches(), 11);
    }

    #[test]
    fn test_full_table_is_reported() {
        let mut table: CacheTable<MemoryRecord> = CacheTable::new(4);
        for (offset, node) in [10u64, 11, 12, 13].into_iter().enumerate() {
            table.slots[offset] = Slot { node, offset };
            table.records.push(Rc::new(MemoryRecord::default()));
        }
        assert_eq!(table.index_offset(11).unwrap(), 1);

        let err = table.index_offset(99).unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(
            err,
            Error::ProbeExhausted {
                node: 99,
                size: 4,
                capacity: 4
            }
        ));
    }

    #[test]
    fn test_config_validation() {
        let index = MemoryIndex::default();
        assert_eq!(CacheConfig::with_capacity(100).unwrap().initial_capacity, 128);
        assert_eq!(CacheConfig::with_capacity(0).unwrap().initial_capacity, 1);
        assert!(RecordCache::with_config(&index, CacheConfig::with_capacity(100).unwrap()).is_ok());
        assert_eq!(
            CacheConfig::with_capacity(usize::MAX / 2 + 1).unwrap().initial_capacity,
            usize::MAX / 2 + 1
        );
        assert!(matches!(
            CacheConfig::with_capacity(usize::MAX / 2 + 2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::with_capacity(usize::MAX),
            Err(Error::InvalidConfig(_))
        ));

        let bad_capacity = CacheConfig {
            initial_capacity: 3,
            ..CacheConfig::default()
        };
        assert!(matches!(
            RecordCache::with_config(&index, bad_capacity),
            Err(Error::InvalidConfig(_))
        ));

        let bad_load = CacheConfig::default().with_max_load_factor(1.0);
        assert!(matches!(
            RecordCache::with_config(&index, bad_load),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_states_skip_cache() {
        let index = CountingIndex::new(example_index(true));
        let cache = RecordCache::new(&index);

        // No record is cached, so any slot access would panic.
        assert!(cache.extend(SearchState::empty(), 7, 0).is_empty());
        assert!(cache
            .extend_forward(BidirectionalState::empty(), 7, 0)
            .is_empty());
        assert!(cache
            .extend_backward(BidirectionalState::empty(), 7, 0)
            .is_empty());
        assert!(cache.extend_to(SearchState::empty(), 4).unwrap().is_empty());
        assert_eq!(index.fetches(), 0);
        assert_eq!(cache.cache_size(), 0);
    }

    #[test]
    fn test_find_missing_node() {
        let index = example_index(false);
        let cache = RecordCache::new(&index);
        assert!(cache.find(100).unwrap().is_empty());
        assert!(cache.bd_find(100).unwrap().is_empty());
        assert_eq!(cache.cache_size(), 0);
    }

    #[test]
    fn test_extend_by_successor_matches_counts() {
        let index = example_index(false);
        let cache = RecordCache::new(&index);

        let state = cache.find(4).unwrap();
        assert_eq!(state.size(), 5);
        let slot = cache.find_record(4).unwrap();
        assert_eq!(cache.outdegree(slot), 2);

        for i in 0..cache.outdegree(slot) {
            let next = cache.extend(state, slot, i);
            assert_eq!(next.node, cache.successor(slot, i));
            assert_eq!(next.size(), index.count_occurrences(&[4, next.node]));
        }
    }

    #[test]
    fn test_unidirectional_search() {
        let index = example_index(false);
        let cache = RecordCache::new(&index);
        for pattern in [
            vec![2, 4, 6],
            vec![4, 6, 8, 12],
            vec![10, 12, 14],
            vec![12, 16],
            vec![2, 4, 6, 8, 12, 14],
        ] {
            let state = search(&cache, &pattern);
            assert_eq!(state.node, *pattern.last().unwrap());
            assert_eq!(
                state.size(),
                index.count_occurrences(&pattern),
                "pattern {pattern:?}"
            );
        }
        assert!(search(&cache, &[6, 10]).is_empty());
        assert!(search(&cache, &[6, 10, 12]).is_empty());
    }

    #[test]
    fn test_bidirectional_search_matches_both_orientations() {
        let index = example_index(true);
        let cache = RecordCache::new(&index);

        for path in example_paths() {
            for i in 0..path.len() {
                for j in i..path.len() {
                    let pattern = &path[i..=j];
                    let reverse: Vec<NodeId> =
                        pattern.iter().rev().map(|&node| node ^ 1).collect();
                    let expected = index.count_occurrences(pattern);

                    let mut forward = cache.bd_find(pattern[0]).unwrap();
                    for &node in &pattern[1..] {
                        forward = cache.extend_forward_to(forward, node).unwrap();
                        assert_eq!(forward.forward.size(), forward.backward.size());
                    }

                    let mut backward = cache.bd_find(pattern[pattern.len() - 1]).unwrap();
                    for &node in pattern[..pattern.len() - 1].iter().rev() {
                        backward = cache.extend_backward_to(backward, node).unwrap();
                        assert_eq!(backward.forward.size(), backward.backward.size());
                    }

                    assert_eq!(forward.size(), expected, "pattern {pattern:?}");
                    assert_eq!(forward, backward, "pattern {pattern:?}");
                    assert_eq!(forward.forward, search(&cache, pattern));
                    assert_eq!(forward.backward, search(&cache, &reverse));
                }
            }
        }
    }

    #[test]
    fn test_cached_extend_matches_extend_to() {
        let index = example_index(true);
        let cache = RecordCache::single_record(&index);

        let start = cache.bd_find(4).unwrap();
        let slot = cache.find_record(4).unwrap();
        for i in 0..cache.outdegree(slot) {
            let node = cache.successor(slot, i);
            let by_slot = cache.extend_forward(start, slot, i);
            let by_node = cache.extend_forward_to(start, node).unwrap();
            assert_eq!(by_slot, by_node);
        }

        // Backward extension uses the record of the backward node.
        let back_slot = cache.find_record(start.backward.node).unwrap();
        for i in 0..cache.outdegree(back_slot) {
            let reverse_node = cache.successor(back_slot, i);
            let by_slot = cache.extend_backward(start, back_slot, i);
            let by_node = cache.extend_backward_to(start, reverse_node ^ 1).unwrap();
            assert_eq!(by_slot, by_node);
            assert_eq!(by_slot.forward.size(), by_slot.backward.size());
        }
    }

    #[test]
    fn test_repeated_backward_extension_keeps_sizes() {
        let index = example_index(true);
        let cache = RecordCache::new(&index);

        let mut state = cache.bd_find(12).unwrap();
        for node in [8, 6, 4, 2] {
            let slot = cache.find_record(state.backward.node).unwrap();
            let i = cache
                .cached_record(slot)
                .edge_to(node ^ 1)
                .expect("reverse edge exists");
            state = cache.extend_backward(state, slot, i);
            assert!(!state.is_empty());
            assert_eq!(state.forward.size(), state.backward.size());
        }
        assert_eq!(state.size(), index.count_occurrences(&[2, 4, 6, 8, 12]));
    }

    #[test]
    fn test_one_cache_per_thread() {
        use rayon::prelude::*;

        let index = example_index(true);
        let patterns: Vec<Vec<NodeId>> = example_paths()
            .into_iter()
            .flat_map(|path| (1..=path.len()).map(move |len| path[..len].to_vec()))
            .collect();

        let sizes: Vec<usize> = patterns
            .par_iter()
            .map_init(
                || RecordCache::single_record(&index),
                |cache, pattern| search(cache, pattern).size(),
            )
            .collect();

        for (pattern, size) in patterns.iter().zip(sizes) {
            assert_eq!(size, index.count_occurrences(pattern));
        }
    }
}
