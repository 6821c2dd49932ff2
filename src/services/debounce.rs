//! Generation-stamped debouncer for type-ahead lookups.
//!
//! Every keystroke issues a new ticket and advances the shared generation
//! counter. A ticket whose generation is no longer current is stale, so its
//! result is dropped even when its quiet period happens to elapse after a
//! newer request already resolved.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default quiet period for search-as-you-type fields.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a new request, superseding every ticket issued before it.
    pub fn issue(&self) -> DebounceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            generation,
            current: Arc::clone(&self.generation),
            delay: self.delay,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

/// Handle for one debounced request.
#[derive(Debug)]
pub struct DebounceTicket {
    generation: u64,
    current: Arc<AtomicU64>,
    delay: Duration,
}

impl DebounceTicket {
    /// Sleep through the quiet period, then report whether this request is
    /// still the latest. Callers skip the lookup on `false`.
    pub async fn wait(&self) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current()
    }

    /// True while no newer ticket has been issued.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}
