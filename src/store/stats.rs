//! Store Statistics Module
//!
//! Tracks store metrics including hits, misses, evictions and record count.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Store Statistics ==
/// Runtime metrics of a store.
///
/// Counters are cumulative over the store's lifetime and never reset.
/// `memory_usage` and `timestamp` are filled in when a snapshot is taken.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStatistics {
    /// Current number of records in the store
    pub total_records: usize,
    /// Number of reads that found a record
    pub hit_count: u64,
    /// Number of reads that found nothing
    pub miss_count: u64,
    /// Number of records removed by policy eviction
    pub eviction_count: u64,
    /// Approximate bytes held by records and order metadata
    pub memory_usage: usize,
    /// When this snapshot was taken
    pub timestamp: DateTime<Utc>,
}

impl StoreStatistics {
    // == Constructor ==
    /// Creates a new StoreStatistics with all counters at zero.
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the read hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_reads();
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    /// Number of reads recorded so far.
    pub fn total_reads(&self) -> u64 {
        self.hit_count + self.miss_count
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.eviction_count += 1;
    }

    // == Update Record Count ==
    pub fn set_total_records(&mut self, count: usize) {
        self.total_records = count;
    }

    // == Snapshot ==
    /// Copy of the counters stamped with `memory_usage` and the current time.
    pub fn snapshot(&self, memory_usage: usize) -> Self {
        Self {
            memory_usage,
            timestamp: Utc::now(),
            ..self.clone()
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStatistics::new();
        assert_eq!(stats.hit_count, 0);
        assert_eq!(stats.miss_count, 0);
        assert_eq!(stats.eviction_count, 0);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.memory_usage, 0);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        let stats = StoreStatistics::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = StoreStatistics::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.total_reads(), 4);
    }

    #[test]
    fn test_record_eviction() {
        let mut stats = StoreStatistics::new();
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.eviction_count, 2);
    }

    #[test]
    fn test_snapshot_keeps_counters_and_refreshes_time() {
        let mut stats = StoreStatistics::new();
        stats.record_hit();
        stats.set_total_records(3);
        let before = stats.timestamp;

        let snapshot = stats.snapshot(4096);
        assert_eq!(snapshot.hit_count, 1);
        assert_eq!(snapshot.total_records, 3);
        assert_eq!(snapshot.memory_usage, 4096);
        assert!(snapshot.timestamp >= before);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = StoreStatistics::new();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["hit_count"], 0);
        assert!(json["timestamp"].is_string());
    }
}
