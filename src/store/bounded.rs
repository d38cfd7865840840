//! Bounded Store Module
//!
//! Main store engine combining the record table with a capacity limit, an
//! eviction policy and statistics.

use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::{Result, StoreError};
use crate::store::{
    EvictionPolicy, EvictionStrategy, Expiry, Policy, StoreStatistics, DEFAULT_TTL,
};

// == Store Options ==
/// Construction parameters of a [`BoundedStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum number of records, `None` for unbounded
    pub max_size: Option<usize>,
    /// Victim selection strategy
    pub policy: EvictionPolicy,
    /// TTL given to records created without an explicit one
    pub default_ttl: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_size: None,
            policy: EvictionPolicy::Fifo,
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl StoreOptions {
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn policy(mut self, policy: EvictionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

// == Bounded Store ==
/// Key-value store with an optional capacity and policy-driven eviction.
///
/// Missing and duplicate keys are never errors: `create`, `update` and
/// `delete` return `false`, `read` returns `None`. The only failure is a
/// zero capacity at construction.
#[derive(Debug)]
pub struct BoundedStore<K, V> {
    /// Record table
    records: HashMap<K, V>,
    /// Order metadata of the active policy
    policy: Policy<K>,
    /// Cumulative counters
    stats: StoreStatistics,
    /// Maximum number of records, `None` for unbounded
    max_size: Option<usize>,
    /// TTL for records created without an explicit one
    default_ttl: Duration,
}

impl<K, V> BoundedStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a store from options.
    ///
    /// # Errors
    /// [`StoreError::InvalidCapacity`] if `max_size` is `Some(0)`.
    pub fn new(options: StoreOptions) -> Result<Self> {
        if let Some(0) = options.max_size {
            return Err(StoreError::InvalidCapacity(0));
        }

        Ok(Self {
            records: HashMap::new(),
            policy: Policy::new(options.policy),
            stats: StoreStatistics::new(),
            max_size: options.max_size,
            default_ttl: options.default_ttl,
        })
    }

    /// Creates an unbounded store. Nothing is ever evicted.
    pub fn unbounded(policy: EvictionPolicy) -> Self {
        Self {
            records: HashMap::new(),
            policy: Policy::new(policy),
            stats: StoreStatistics::new(),
            max_size: None,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Creates a store holding at most `max_size` records.
    pub fn with_capacity(max_size: usize, policy: EvictionPolicy) -> Result<Self> {
        Self::new(StoreOptions::default().max_size(max_size).policy(policy))
    }

    // == Create ==
    /// Inserts `value` under `key` if the key is free.
    ///
    /// Returns false without touching the store when the key already exists.
    /// On success the capacity is enforced before returning, which may evict
    /// other records (never the one just created).
    pub fn create(&mut self, key: K, value: V) -> bool {
        let ttl = self.default_ttl;
        self.create_with_ttl(key, value, ttl)
    }

    /// Same as [`create`](Self::create) with a TTL for this record only.
    ///
    /// Only the TTL policy looks at the TTL.
    pub fn create_with_ttl(&mut self, key: K, value: V, ttl: Duration) -> bool {
        if self.records.contains_key(&key) {
            trace!("create rejected: key already present");
            return false;
        }

        let now = Instant::now();
        self.policy.record_insert(&key, Expiry::new(now, ttl));
        self.records.insert(key.clone(), value);
        self.stats.set_total_records(self.records.len());

        self.enforce_capacity(&key, now);
        true
    }

    // == Read ==
    /// Returns the record under `key`.
    ///
    /// Every call counts as a hit or a miss. Under LRU a hit also makes the
    /// key the most recently used.
    pub fn read(&mut self, key: &K) -> Option<&V> {
        if self.records.contains_key(key) {
            self.stats.record_hit();
            self.policy.record_access(key);
            self.records.get(key)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Update ==
    /// Replaces the record under `key`.
    ///
    /// Returns false if the key is absent. Insertion time and TTL expiry are
    /// left alone; LRU recency is refreshed. Never evicts.
    pub fn update(&mut self, key: &K, value: V) -> bool {
        match self.records.get_mut(key) {
            Some(slot) => {
                *slot = value;
                self.policy.record_access(key);
                true
            }
            None => false,
        }
    }

    // == Delete ==
    /// Removes the record under `key`. Not counted as an eviction.
    pub fn delete(&mut self, key: &K) -> bool {
        if self.records.remove(key).is_some() {
            self.policy.record_remove(key);
            self.stats.set_total_records(self.records.len());
            true
        } else {
            false
        }
    }

    // == List ==
    /// All live records, in no particular order.
    pub fn list(&self) -> Vec<&V> {
        self.records.values().collect()
    }

    // == Statistics ==
    /// Snapshot of the counters with a fresh timestamp and memory estimate.
    ///
    /// Does not count as a read.
    pub fn statistics(&self) -> StoreStatistics {
        let mut stats = self.stats.snapshot(self.estimate_memory());
        stats.set_total_records(self.records.len());
        stats
    }

    /// Checks for a key without touching statistics or recency.
    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    /// Returns the current number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.max_size
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy.kind()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Remaining lifetime of a record under the TTL policy.
    pub fn ttl_remaining(&self, key: &K) -> Option<Duration> {
        self.policy
            .expiry(key)
            .map(|expiry| expiry.remaining_at(Instant::now()))
    }

    // == Eviction ==
    /// Evicts until the store is back within capacity.
    fn enforce_capacity(&mut self, inserted: &K, now: Instant) {
        let Some(max_size) = self.max_size else {
            return;
        };
        if self.records.len() <= max_size {
            return;
        }

        let excess = self.records.len() - max_size;
        let victims = self.policy.select_victims(excess, inserted, now);
        debug!(
            policy = %self.policy.kind(),
            excess,
            victims = victims.len(),
            "capacity exceeded, evicting"
        );

        for victim in victims {
            if self.records.remove(&victim).is_some() {
                self.policy.record_remove(&victim);
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_records(self.records.len());
    }

    /// Best-effort estimate: inline size of the table slots plus metadata.
    fn estimate_memory(&self) -> usize {
        let slot = mem::size_of::<K>() + mem::size_of::<V>();
        mem::size_of::<Self>() + self.records.capacity() * slot + self.policy.metadata_bytes()
    }

    /// Verifies that the record table, order metadata and counters agree.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.policy.tracked() != self.records.len() {
            return Err(format!(
                "metadata tracks {} keys, table holds {}",
                self.policy.tracked(),
                self.records.len()
            ));
        }
        if self.records.keys().any(|k| !self.policy.tracks(k)) {
            return Err("record without order metadata".to_string());
        }
        if self.stats.total_records != self.records.len() {
            return Err(format!(
                "total_records {} != table size {}",
                self.stats.total_records,
                self.records.len()
            ));
        }
        if let Some(max_size) = self.max_size {
            if self.records.len() > max_size {
                return Err(format!("size {} over capacity {}", self.records.len(), max_size));
            }
        }
        Ok(())
    }
}
