//! Key Order Module
//!
//! Ordered key sequence shared by the FIFO, LRU and TTL strategies.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::mem;

// == Key Order ==
/// Keeps keys in the order they were last stamped.
///
/// Each key carries a monotonically increasing tick:
/// - Lowest tick = oldest (next eviction candidate)
/// - Highest tick = newest
///
/// Stamping, moving and removing a key are all `O(log n)`.
#[derive(Debug)]
pub struct KeyOrder<K> {
    /// Key -> tick lookup
    ticks: HashMap<K, u64>,
    /// Tick -> key, iterated oldest first
    order: BTreeMap<u64, K>,
    /// Next tick to hand out
    next_tick: u64,
}

impl<K> Default for KeyOrder<K> {
    fn default() -> Self {
        Self {
            ticks: HashMap::new(),
            order: BTreeMap::new(),
            next_tick: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> KeyOrder<K> {
    // == Constructor ==
    /// Creates a new empty order.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Newest ==
    /// Appends a key at the newest end.
    ///
    /// A key that is already tracked is moved rather than duplicated.
    pub fn push_newest(&mut self, key: K) {
        self.remove(&key);
        let tick = self.stamp();
        self.order.insert(tick, key.clone());
        self.ticks.insert(key, tick);
    }

    // == Touch ==
    /// Moves a tracked key to the newest end.
    ///
    /// Returns false (and does nothing) if the key is not tracked.
    pub fn touch(&mut self, key: &K) -> bool {
        let Some(old) = self.ticks.get(key).copied() else {
            return false;
        };
        let tick = self.stamp();
        if let Some(owned) = self.order.remove(&old) {
            self.order.insert(tick, owned);
        }
        self.ticks.insert(key.clone(), tick);
        true
    }

    // == Remove ==
    /// Removes a key. Returns whether it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.ticks.remove(key) {
            Some(tick) => {
                self.order.remove(&tick);
                true
            }
            None => false,
        }
    }

    // == Iterate ==
    /// Iterates keys from oldest to newest.
    pub fn iter_oldest(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.values()
    }

    /// Position stamp of a key, usable as an insertion-order tie breaker.
    pub fn tick_of(&self, key: &K) -> Option<u64> {
        self.ticks.get(key).copied()
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Checks if a key is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.ticks.contains_key(key)
    }

    /// Rough byte count of the two indexes.
    pub fn approximate_bytes(&self) -> usize {
        let per_key = mem::size_of::<K>() + mem::size_of::<u64>();
        (self.ticks.capacity() + self.order.len()) * per_key
    }

    fn stamp(&mut self) -> u64 {
        let tick = self.next_tick;
        self.next_tick += 1;
        tick
    }
}
