//! Bounded Store - An in-memory key-value store with a size limit
//!
//! Records are evicted by FIFO, LRU or TTL order once the store is full.
//! A small task console is built on top of the store.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod todo;

pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{
    BoundedStore, EvictionPolicy, SharedStore, StoreOptions, StoreStatistics, DEFAULT_TTL,
};
