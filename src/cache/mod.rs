//! Durable local cache holding last-known-good datasets.
//!
//! The namespace is a flat string map with three well-known keys:
//! `cachedStudents`, `cachedCandidates`, and `lastSync`. Snapshots are
//! written only after a confirmed successful fetch, together with the
//! sync timestamp, and survive process restarts.

pub mod store;

pub use store::{CacheStore, FileStore, KeyValueStore, MemoryStore};
