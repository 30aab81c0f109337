/*!
 * Signal Poller
 * Drains collected signals from ordinary threads
 *
 * Polling never blocks. Callers that want to wait own their retry loop.
 */

use super::record::RECORD;
use super::types::{SignalNumber, NONE_PENDING};
use tracing::trace;

/// Clear and return the lowest-numbered pending signal
///
/// Drain order is always ascending by signal number regardless of arrival
/// order. Repeated calls on an empty record keep returning `None`.
#[inline]
pub fn poll_next() -> Option<SignalNumber> {
    let next = RECORD.take_next();
    if let Some(signum) = next {
        trace!(signum = signum.raw(), "Drained collected signal");
    }
    next
}

/// [`poll_next`] with the C-style [`NONE_PENDING`] sentinel
#[inline]
pub fn poll_next_raw() -> i32 {
    poll_next().map_or(NONE_PENDING, SignalNumber::raw)
}

/// Whether any signal is waiting, without clearing it
#[inline]
pub fn has_pending() -> bool {
    !RECORD.is_empty()
}

/// Bit mask of pending signal numbers, without clearing them
#[inline]
pub fn pending_mask() -> u32 {
    RECORD.pending()
}

/// Iterator that polls until nothing is pending
pub fn drain_pending() -> DrainPending {
    DrainPending { _private: () }
}

/// See [`drain_pending`]
#[derive(Debug)]
pub struct DrainPending {
    _private: (),
}

impl Iterator for DrainPending {
    type Item = SignalNumber;

    fn next(&mut self) -> Option<Self::Item> {
        poll_next()
    }
}
