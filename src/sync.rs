//! State reconciliation against freshly fetched data.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::service::{DataService, Tier};
use crate::state::{rebuild_votes, SharedState};

type RefreshHook = Box<dyn Fn() + Send + Sync>;

/// Drives a synchronization cycle: pull both datasets and fold them into
/// shared state.
///
/// Consumers that want to repaint after a successful cycle register a
/// callback with [`Synchronizer::on_refresh`]; nothing is looked up
/// globally.
pub struct Synchronizer {
    service: Arc<DataService>,
    state: SharedState,
    refresh_hook: Mutex<Option<RefreshHook>>,
}

impl Synchronizer {
    pub fn new(service: Arc<DataService>, state: SharedState) -> Self {
        Self {
            service,
            state,
            refresh_hook: Mutex::new(None),
        }
    }

    /// Register a callback invoked after every successful reconciliation.
    pub fn on_refresh(&self, hook: impl Fn() + Send + Sync + 'static) {
        let mut refresh_hook = self.refresh_hook.lock().expect("refresh hook mutex poisoned");
        *refresh_hook = Some(Box::new(hook));
    }

    /// Synchronize shared state with the endpoint.
    ///
    /// Returns `false` - leaving state and banner untouched - when offline
    /// or when either dataset came back from a fallback tier. Returns
    /// `true` once both lists are replaced, the tally is rebuilt, and the
    /// offline banner is dismissed.
    pub async fn sync_data(&self) -> bool {
        if !self.service.is_online() {
            debug!("Offline - synchronization skipped");
            return false;
        }

        // Independent datasets, so both requests go out together.
        let (students, candidates) = tokio::join!(
            self.service.fetch_students(),
            self.service.fetch_candidates(),
        );

        if students.tier != Tier::Live || candidates.tier != Tier::Live {
            warn!(
                students = ?students.tier,
                candidates = ?candidates.tier,
                "Synchronization got fallback data - state left untouched"
            );
            return false;
        }

        {
            // One uninterrupted block between suspension points: no task
            // can observe a half-reconciled state.
            let mut state = self.state.lock().expect("state mutex poisoned");
            state.votes = rebuild_votes(&state.votes, &candidates.data);
            state.students = students.data;
            state.candidates = candidates.data;
            info!(
                students = state.students.len(),
                candidates = state.candidates.len(),
                "State synchronized"
            );
        }

        self.service.notifier().hide();

        let refresh_hook = self.refresh_hook.lock().expect("refresh hook mutex poisoned");
        if let Some(hook) = refresh_hook.as_ref() {
            hook();
        }

        true
    }
}
