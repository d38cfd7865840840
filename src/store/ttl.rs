//! TTL Metadata Module
//!
//! Per-record expiry bookkeeping for the TTL eviction strategy.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::mem;
use std::time::{Duration, Instant};

use crate::store::order::KeyOrder;
use crate::store::policy::EvictionStrategy;

// == Expiry ==
/// Insertion time and expiry deadline of one record.
///
/// Both are fixed when the record is created; updates never move them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    /// When the record was created
    pub inserted_at: Instant,
    /// `inserted_at + ttl`
    pub expires_at: Instant,
}

impl Expiry {
    // == Constructor ==
    /// Computes the deadline for a record created at `now`.
    ///
    /// A TTL too large to represent saturates to "never within this process".
    pub fn new(now: Instant, ttl: Duration) -> Self {
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + Duration::from_secs(u32::MAX as u64));
        Self {
            inserted_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the record has expired at `now`.
    ///
    /// Boundary condition: a record is expired as soon as `now` reaches the
    /// deadline, so a zero TTL is expired immediately.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime at `now`; zero once expired.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

// == TTL Order ==
/// Expiry map plus insertion order for the TTL strategy.
///
/// Expired records are chosen first, earliest deadline first. When not
/// enough records have expired the remainder comes from insertion order,
/// so an eviction pass always brings the store back under capacity.
#[derive(Debug)]
pub struct TtlOrder<K> {
    expiries: HashMap<K, Expiry>,
    insertion: KeyOrder<K>,
}

impl<K> Default for TtlOrder<K> {
    fn default() -> Self {
        Self {
            expiries: HashMap::new(),
            insertion: KeyOrder::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> TtlOrder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expiry bookkeeping for a tracked key.
    pub fn expiry(&self, key: &K) -> Option<&Expiry> {
        self.expiries.get(key)
    }

    /// Keys whose deadline has passed at `now`, earliest deadline first.
    pub fn expired_at(&self, now: Instant) -> Vec<&K> {
        let mut expired: Vec<(Instant, u64, &K)> = self
            .expiries
            .iter()
            .filter(|(_, expiry)| expiry.is_expired_at(now))
            .map(|(key, expiry)| {
                let tick = self.insertion.tick_of(key).unwrap_or(u64::MAX);
                (expiry.expires_at, tick, key)
            })
            .collect();
        expired.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        expired.into_iter().map(|(_, _, key)| key).collect()
    }
}

impl<K: Eq + Hash + Clone> EvictionStrategy<K> for TtlOrder<K> {
    fn record_insert(&mut self, key: &K, expiry: Expiry) {
        self.insertion.push_newest(key.clone());
        self.expiries.insert(key.clone(), expiry);
    }

    fn record_access(&mut self, _key: &K) {}

    fn record_remove(&mut self, key: &K) {
        self.expiries.remove(key);
        self.insertion.remove(key);
    }

    fn select_victims(&self, excess: usize, protected: &K, now: Instant) -> Vec<K> {
        let mut victims: Vec<K> = self
            .expired_at(now)
            .into_iter()
            .filter(|key| *key != protected)
            .take(excess)
            .cloned()
            .collect();

        if victims.len() < excess {
            let chosen: HashSet<K> = victims.iter().cloned().collect();
            let remainder = excess - victims.len();
            victims.extend(
                self.insertion
                    .iter_oldest()
                    .filter(|key| *key != protected && !chosen.contains(*key))
                    .take(remainder)
                    .cloned(),
            );
        }

        victims
    }

    fn tracked(&self) -> usize {
        self.expiries.len()
    }

    fn tracks(&self, key: &K) -> bool {
        self.expiries.contains_key(key) && self.insertion.contains(key)
    }

    fn metadata_bytes(&self) -> usize {
        let per_key = mem::size_of::<K>() + mem::size_of::<Expiry>();
        self.expiries.capacity() * per_key + self.insertion.approximate_bytes()
    }
}
