//! Fetch-or-fallback data access.
//!
//! Every operation tries the tiers in order: live endpoint, local cache,
//! built-in defaults. Results are therefore never empty, and no failure
//! from the endpoint propagates past this module - the only externally
//! visible signal of trouble is the offline banner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::SheetClient;
use crate::cache::CacheStore;
use crate::defaults;
use crate::models::{Candidate, Student};
use crate::notify::OfflineNotifier;

/// Source a dataset was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Fresh from the remote endpoint.
    Live,
    /// Last-known-good copy from the local cache.
    Cached,
    /// Built-in sample data; nothing was ever fetched.
    Default,
}

/// A dataset together with the tier that produced it.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub tier: Tier,
}

/// Orchestrates fetch-or-fallback for both datasets.
///
/// The online flag is owned by the connectivity monitor and shared here;
/// when it reads false the network is skipped entirely rather than probed
/// per call.
pub struct DataService {
    client: SheetClient,
    cache: CacheStore,
    online: Arc<AtomicBool>,
    notifier: Arc<OfflineNotifier>,
}

impl DataService {
    pub fn new(
        client: SheetClient,
        cache: CacheStore,
        online: Arc<AtomicBool>,
        notifier: Arc<OfflineNotifier>,
    ) -> Self {
        Self {
            client,
            cache,
            online,
            notifier,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn notifier(&self) -> &OfflineNotifier {
        &self.notifier
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Fetch the student roster. Never empty.
    pub async fn fetch_students(&self) -> Fetched<Vec<Student>> {
        if !self.is_online() {
            debug!("Offline - skipping student fetch");
            return self.fall_back("students", self.cache.load_students(), defaults::default_students, false);
        }

        match self.client.get_students().await {
            Ok(students) => {
                if let Err(e) = self.cache.save_students(&students) {
                    warn!(error = %e, "Failed to cache student roster");
                }
                Fetched {
                    data: students,
                    tier: Tier::Live,
                }
            }
            Err(e) => {
                warn!(error = %e, "Student fetch failed - falling back");
                self.fall_back("students", self.cache.load_students(), defaults::default_students, true)
            }
        }
    }

    /// Fetch the candidate list. Never empty.
    pub async fn fetch_candidates(&self) -> Fetched<Vec<Candidate>> {
        if !self.is_online() {
            debug!("Offline - skipping candidate fetch");
            return self.fall_back(
                "candidates",
                self.cache.load_candidates(),
                defaults::default_candidates,
                false,
            );
        }

        match self.client.get_candidates().await {
            Ok(candidates) => {
                if let Err(e) = self.cache.save_candidates(&candidates) {
                    warn!(error = %e, "Failed to cache candidate list");
                }
                Fetched {
                    data: candidates,
                    tier: Tier::Live,
                }
            }
            Err(e) => {
                warn!(error = %e, "Candidate fetch failed - falling back");
                self.fall_back(
                    "candidates",
                    self.cache.load_candidates(),
                    defaults::default_candidates,
                    true,
                )
            }
        }
    }

    /// Fetch both datasets with one endpoint call.
    ///
    /// On success both caches and the sync timestamp are overwritten as a
    /// unit; on failure nothing is written and each dataset falls back on
    /// its own (their tiers can differ when only one was ever cached).
    pub async fn fetch_both(&self) -> (Fetched<Vec<Student>>, Fetched<Vec<Candidate>>) {
        if !self.is_online() {
            debug!("Offline - skipping combined fetch");
            return (
                self.fall_back("students", self.cache.load_students(), defaults::default_students, false),
                self.fall_back(
                    "candidates",
                    self.cache.load_candidates(),
                    defaults::default_candidates,
                    false,
                ),
            );
        }

        match self.client.get_both().await {
            Ok(payload) => {
                if let Err(e) = self.cache.save_both(&payload.students, &payload.candidates) {
                    warn!(error = %e, "Failed to cache combined snapshot");
                }
                (
                    Fetched {
                        data: payload.students,
                        tier: Tier::Live,
                    },
                    Fetched {
                        data: payload.candidates,
                        tier: Tier::Live,
                    },
                )
            }
            Err(e) => {
                warn!(error = %e, "Combined fetch failed - falling back");
                (
                    self.fall_back("students", self.cache.load_students(), defaults::default_students, true),
                    self.fall_back(
                        "candidates",
                        self.cache.load_candidates(),
                        defaults::default_candidates,
                        true,
                    ),
                )
            }
        }
    }

    /// Serve a dataset from cache, else defaults.
    ///
    /// `after_failure` distinguishes a failed live attempt (raises the
    /// offline banner when cached data exists) from a deliberate offline
    /// skip (stays quiet). Defaults never raise the banner.
    fn fall_back<T>(
        &self,
        dataset: &str,
        cached: anyhow::Result<Option<Vec<T>>>,
        fallback: fn() -> Vec<T>,
        after_failure: bool,
    ) -> Fetched<Vec<T>> {
        match cached {
            Ok(Some(data)) if !data.is_empty() => {
                if after_failure {
                    self.notifier.show();
                }
                debug!(dataset, count = data.len(), "Serving cached data");
                Fetched {
                    data,
                    tier: Tier::Cached,
                }
            }
            Ok(_) => {
                debug!(dataset, "Nothing cached - serving built-in defaults");
                Fetched {
                    data: fallback(),
                    tier: Tier::Default,
                }
            }
            Err(e) => {
                warn!(dataset, error = %e, "Cache read failed - serving built-in defaults");
                Fetched {
                    data: fallback(),
                    tier: Tier::Default,
                }
            }
        }
    }
}
