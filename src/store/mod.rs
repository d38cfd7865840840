//! Store Module
//!
//! Bounded in-memory key-value store with FIFO, LRU or TTL eviction.

mod bounded;
mod order;
mod policy;
mod shared;
mod stats;
mod ttl;


use std::time::Duration;

// Re-export public types
pub use bounded::{BoundedStore, StoreOptions};
pub use order::KeyOrder;
pub use policy::{EvictionPolicy, EvictionStrategy, FifoOrder, LruOrder, Policy};
pub use shared::SharedStore;
pub use stats::StoreStatistics;
pub use ttl::{Expiry, TtlOrder};

// == Public Constants ==
/// TTL for records created without an explicit one
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
