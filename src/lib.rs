//! Offline-first data access for a spreadsheet-backed student council
//! voting app.
//!
//! The crate fetches the student roster and the candidate list from a web
//! endpoint backed by a spreadsheet, keeps last-known-good copies in a
//! durable local cache, and reconciles shared application state - vote
//! tally included - with freshly fetched data. Every fetch falls back
//! live → cache → built-in defaults, so consumers always receive a
//! non-empty dataset and never see a network error.

pub mod api;
pub mod cache;
pub mod config;
pub mod connectivity;
pub mod defaults;
pub mod models;
pub mod notify;
pub mod service;
pub mod state;
pub mod sync;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::{ApiError, SheetClient};
pub use cache::{CacheStore, FileStore, KeyValueStore, MemoryStore};
pub use config::Config;
pub use connectivity::{ConnectivityEvent, ConnectivityMonitor};
pub use models::{Candidate, Student};
pub use notify::OfflineNotifier;
pub use service::{DataService, Fetched, Tier};
pub use state::{shared_state, AppState, SharedState, VoteTally};
pub use sync::Synchronizer;
