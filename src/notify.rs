//! Offline notification state.
//!
//! One persistent, dismissible banner telling the user they are looking
//! at cached data. The component is headless: it owns visibility and the
//! manual retry action, while rendering belongs to the embedding UI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, info};

type RetryAction = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct OfflineNotifier {
    visible: AtomicBool,
    retry: Mutex<Option<RetryAction>>,
}

impl OfflineNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the banner visible. Idempotent: repeat calls keep it shown.
    pub fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            info!("Serving cached data - offline banner shown");
        }
    }

    /// Hide the banner. Idempotent: a no-op when already hidden.
    pub fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            debug!("Offline banner hidden");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Register the banner's manual retry action (re-runs a sync).
    pub fn set_retry(&self, action: impl Fn() + Send + Sync + 'static) {
        let mut retry = self.retry.lock().expect("retry mutex poisoned");
        *retry = Some(Box::new(action));
    }

    /// Invoke the retry action, if one is registered.
    pub fn retry(&self) {
        let retry = self.retry.lock().expect("retry mutex poisoned");
        if let Some(action) = retry.as_ref() {
            action();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_show_hide_idempotence() {
        let notifier = OfflineNotifier::new();
        assert!(!notifier.is_visible());

        notifier.show();
        notifier.show();
        assert!(notifier.is_visible());

        notifier.hide();
        notifier.hide();
        assert!(!notifier.is_visible());
    }

    #[test]
    fn test_retry_invokes_registered_action() {
        let notifier = OfflineNotifier::new();
        let calls = Arc::new(AtomicUsize::new(0));

        // Retry with nothing registered is a no-op.
        notifier.retry();

        let counter = Arc::clone(&calls);
        notifier.set_retry(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        notifier.retry();
        notifier.retry();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
