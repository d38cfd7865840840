//! Eviction Policy Module
//!
//! Selects eviction victims. Every policy owns exactly the order metadata
//! it needs:
//!
//! | Policy | Metadata                          | Victims                          |
//! |--------|-----------------------------------|----------------------------------|
//! | FIFO   | insertion order                   | oldest inserted                  |
//! | LRU    | recency order (read/update touch) | least recently touched           |
//! | TTL    | expiry map + insertion order      | expired first, then oldest       |

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::order::KeyOrder;
use crate::store::ttl::{Expiry, TtlOrder};

// == Eviction Policy ==
/// Name of the strategy a store is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// First in, first out
    #[default]
    Fifo,
    /// Least recently used
    Lru,
    /// Time to live
    Ttl,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Fifo => "FIFO",
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Ttl => "TTL",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(EvictionPolicy::Fifo),
            "LRU" => Ok(EvictionPolicy::Lru),
            "TTL" => Ok(EvictionPolicy::Ttl),
            _ => Err(StoreError::UnknownPolicy(s.to_string())),
        }
    }
}

// == Eviction Strategy ==
/// Bookkeeping hooks the store calls on every mutation, plus victim selection.
pub trait EvictionStrategy<K> {
    /// A record was created. `expiry` is only consulted by TTL.
    fn record_insert(&mut self, key: &K, expiry: Expiry);

    /// A record was read or updated successfully.
    fn record_access(&mut self, key: &K);

    /// A record left the store, by delete or by eviction.
    fn record_remove(&mut self, key: &K);

    /// Picks up to `excess` keys to evict, never `protected`.
    fn select_victims(&self, excess: usize, protected: &K, now: Instant) -> Vec<K>;

    /// Number of keys currently tracked.
    fn tracked(&self) -> usize;

    /// Whether `key` is tracked.
    fn tracks(&self, key: &K) -> bool;

    /// Best-effort size of the metadata in bytes.
    fn metadata_bytes(&self) -> usize;
}

// == FIFO ==
/// Insertion order; accesses never reorder.
#[derive(Debug)]
pub struct FifoOrder<K>(KeyOrder<K>);

impl<K> Default for FifoOrder<K> {
    fn default() -> Self {
        Self(KeyOrder::default())
    }
}

impl<K: Eq + Hash + Clone> EvictionStrategy<K> for FifoOrder<K> {
    fn record_insert(&mut self, key: &K, _expiry: Expiry) {
        self.0.push_newest(key.clone());
    }

    fn record_access(&mut self, _key: &K) {}

    fn record_remove(&mut self, key: &K) {
        self.0.remove(key);
    }

    fn select_victims(&self, excess: usize, protected: &K, _now: Instant) -> Vec<K> {
        oldest_except(&self.0, excess, protected)
    }

    fn tracked(&self) -> usize {
        self.0.len()
    }

    fn tracks(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    fn metadata_bytes(&self) -> usize {
        self.0.approximate_bytes()
    }
}

// == LRU ==
/// Recency order; reads and updates move a key to the newest end.
#[derive(Debug)]
pub struct LruOrder<K>(KeyOrder<K>);

impl<K> Default for LruOrder<K> {
    fn default() -> Self {
        Self(KeyOrder::default())
    }
}

impl<K: Eq + Hash + Clone> EvictionStrategy<K> for LruOrder<K> {
    fn record_insert(&mut self, key: &K, _expiry: Expiry) {
        self.0.push_newest(key.clone());
    }

    fn record_access(&mut self, key: &K) {
        self.0.touch(key);
    }

    fn record_remove(&mut self, key: &K) {
        self.0.remove(key);
    }

    fn select_victims(&self, excess: usize, protected: &K, _now: Instant) -> Vec<K> {
        oldest_except(&self.0, excess, protected)
    }

    fn tracked(&self) -> usize {
        self.0.len()
    }

    fn tracks(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    fn metadata_bytes(&self) -> usize {
        self.0.approximate_bytes()
    }
}

fn oldest_except<K: Eq + Hash + Clone>(order: &KeyOrder<K>, excess: usize, protected: &K) -> Vec<K> {
    order
        .iter_oldest()
        .filter(|key| *key != protected)
        .take(excess)
        .cloned()
        .collect()
}

// == Policy ==
/// The closed set of strategies a store can run.
#[derive(Debug)]
pub enum Policy<K> {
    Fifo(FifoOrder<K>),
    Lru(LruOrder<K>),
    Ttl(TtlOrder<K>),
}

impl<K: Eq + Hash + Clone> Policy<K> {
    /// Creates empty metadata for the named policy.
    pub fn new(kind: EvictionPolicy) -> Self {
        match kind {
            EvictionPolicy::Fifo => Policy::Fifo(FifoOrder::default()),
            EvictionPolicy::Lru => Policy::Lru(LruOrder::default()),
            EvictionPolicy::Ttl => Policy::Ttl(TtlOrder::new()),
        }
    }

    pub fn kind(&self) -> EvictionPolicy {
        match self {
            Policy::Fifo(_) => EvictionPolicy::Fifo,
            Policy::Lru(_) => EvictionPolicy::Lru,
            Policy::Ttl(_) => EvictionPolicy::Ttl,
        }
    }

    /// Expiry data, present only under TTL.
    pub fn expiry(&self, key: &K) -> Option<&Expiry> {
        match self {
            Policy::Ttl(ttl) => ttl.expiry(key),
            _ => None,
        }
    }

    fn strategy(&self) -> &dyn EvictionStrategy<K> {
        match self {
            Policy::Fifo(s) => s,
            Policy::Lru(s) => s,
            Policy::Ttl(s) => s,
        }
    }

    fn strategy_mut(&mut self) -> &mut dyn EvictionStrategy<K> {
        match self {
            Policy::Fifo(s) => s,
            Policy::Lru(s) => s,
            Policy::Ttl(s) => s,
        }
    }
}

impl<K: Eq + Hash + Clone> EvictionStrategy<K> for Policy<K> {
    fn record_insert(&mut self, key: &K, expiry: Expiry) {
        self.strategy_mut().record_insert(key, expiry)
    }

    fn record_access(&mut self, key: &K) {
        self.strategy_mut().record_access(key)
    }

    fn record_remove(&mut self, key: &K) {
        self.strategy_mut().record_remove(key)
    }

    fn select_victims(&self, excess: usize, protected: &K, now: Instant) -> Vec<K> {
        self.strategy().select_victims(excess, protected, now)
    }

    fn tracked(&self) -> usize {
        self.strategy().tracked()
    }

    fn tracks(&self, key: &K) -> bool {
        self.strategy().tracks(key)
    }

    fn metadata_bytes(&self) -> usize {
        self.strategy().metadata_bytes()
    }
}
