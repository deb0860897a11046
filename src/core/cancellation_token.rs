// src/core/cancellation_token.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation for the combiner's mask-enumeration loop (§5:
/// "cancellation is cooperative at mask-iteration granularity"). Cloning is
/// cheap - every clone shares the same underlying flag.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken { flag: Arc::new(AtomicBool::new(false)) }
    }

    /// Installs a Ctrl+C handler that cancels this token. Only the first
    /// call in a process actually registers a handler; `ctrlc::set_handler`
    /// itself enforces that.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let flag = self.flag.clone();
        ctrlc::set_handler(move || {
            log::warn!("received interrupt, cancelling at next mask-iteration boundary");
            flag.store(true, Ordering::SeqCst);
        })
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
