//! Connectivity tracking.
//!
//! The monitor owns the process-wide online flag and reacts to the two
//! external connectivity signals. The flag gates every data-service call;
//! nothing probes live connectivity per request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::sync::Synchronizer;

/// External connectivity transition, as reported by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

pub struct ConnectivityMonitor {
    online: Arc<AtomicBool>,
}

impl ConnectivityMonitor {
    /// Create the monitor seeded with the environment's reported
    /// connectivity.
    pub fn new(initially_online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(initially_online)),
        }
    }

    /// Shared flag handle handed to the data service.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.online)
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    /// Consume connectivity events until the sender side closes.
    ///
    /// Going offline only flips the flag. Coming back online flips the
    /// flag and unconditionally kicks off a synchronization cycle.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<ConnectivityEvent>,
        synchronizer: Arc<Synchronizer>,
    ) {
        while let Some(event) = events.recv().await {
            match event {
                ConnectivityEvent::Offline => {
                    self.online.store(false, Ordering::SeqCst);
                    debug!("Connection lost");
                }
                ConnectivityEvent::Online => {
                    self.online.store(true, Ordering::SeqCst);
                    info!("Connection restored - synchronizing");
                    if !synchronizer.sync_data().await {
                        warn!("Synchronization after reconnect failed");
                    }
                }
            }
        }
        debug!("Connectivity event source closed");
    }
}
