//! Small shared helpers: the transaction id generator and a sleep wrapper.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Transaction ids stay below this ceiling so they round-trip through any
/// JSON number representation without losing precision (2^53, the IEEE-754
/// double safe-integer bound that the original Janus clients target).
const ID_CEILING: u64 = 1 << 53;

/// Monotonic counter seeded from a random start, wrapping at [`ID_CEILING`].
///
/// One instance lives per [`crate::transaction::TransactionManager`]; ids are
/// unique in practice, not cryptographically unique (see spec §4.3).
#[derive(Debug)]
pub(crate) struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub(crate) fn new() -> Self {
        let seed = rand::thread_rng().gen_range(0..ID_CEILING);
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Returns the next id as a decimal string and advances the counter.
    pub(crate) fn next_id(&self) -> String {
        let mut observed = self.next.load(Ordering::Relaxed);
        loop {
            let next = (observed + 1) % ID_CEILING;
            match self
                .next
                .compare_exchange_weak(observed, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(value) => return value.to_string(),
                Err(current) => observed = current,
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps for `secs` seconds. Thin wrapper kept so reconnect/keep-alive code
/// reads as intent ("delay before the next attempt") rather than a bare tokio call.
pub(crate) async fn delay_secs(secs: u64) {
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
}
