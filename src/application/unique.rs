use crate::domain::payment::OrderId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST: AtomicU64 = AtomicU64::new(0);

/// Time-derived order id: the hex token `{seconds:08x}{micros:05x}` read back
/// as a number, i.e. `seconds * 16^5 + micros`.
///
/// Strictly increasing within one process; two processes may still collide,
/// so callers needing hard uniqueness supply their own order id.
pub fn unique_number() -> OrderId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let candidate = (now.as_secs() << 20) + u64::from(now.subsec_micros());

    let previous = LAST
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(candidate.max(last + 1))
        })
        .unwrap_or(candidate);
    let value = candidate.max(previous + 1);
    // Stays far below i64::MAX for the next few hundred thousand years.
    OrderId::saturating(value)
}
