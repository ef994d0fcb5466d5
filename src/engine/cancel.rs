use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Checked between hosts/ports and before the catch-all pass begins.
/// Cloning shares the same underlying flag.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
