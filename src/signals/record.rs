/*!
 * Atomic Event Record
 * One lock-free bit per signal number, shared by the whole process
 */

use super::types::{SignalNumber, RECORD_WIDTH};
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(target_has_atomic = "32"))]
compile_error!("32-bit atomics must be lock free to be async-signal-safe");

/// Process-lifetime record written by the collector and drained by the poller.
/// Starts with every bit clear and is never destroyed.
pub(crate) static RECORD: EventRecord = EventRecord::new();

/// Pending-signal bit vector
///
/// Bit `n` set means signal `n` arrived at least once since it was last
/// drained. Counts are not kept: repeated deliveries coalesce into one bit.
///
/// # Ordering
/// All accesses are relaxed. The only cross-thread guarantee needed is that
/// a bit set before a poll is seen by that poll or a later one; no other
/// memory is published through the record.
#[derive(Debug)]
#[repr(transparent)]
pub struct EventRecord {
    bits: AtomicU32,
}

impl EventRecord {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Set the bit for `signum`. Async-signal-safe.
    ///
    /// A `signum` outside the record aborts the process.
    #[inline(always)]
    pub fn mark(&self, signum: u32) {
        crate::verify!(
            signum < RECORD_WIDTH,
            "record bit out of range: {}",
            signum
        );
        self.bits.fetch_or(1 << signum, Ordering::Relaxed);
    }

    /// Clear and return the lowest pending signal
    ///
    /// The clear is an atomic AND of a single-bit mask, so a concurrent
    /// `mark` of any other bit survives. If another poller cleared the same
    /// bit first the returned previous value shows it and the scan restarts,
    /// so each recorded bit is reported exactly once.
    pub fn take_next(&self) -> Option<SignalNumber> {
        loop {
            let snapshot = self.bits.load(Ordering::Relaxed);
            if snapshot == 0 {
                return None;
            }

            let signum = snapshot.trailing_zeros();
            let mask = 1u32 << signum;
            let previous = self.bits.fetch_and(!mask, Ordering::Relaxed);
            if previous & mask != 0 {
                return Some(SignalNumber::from_raw(signum as i32));
            }
        }
    }

    /// Non-destructive snapshot of every pending bit
    #[inline]
    pub fn pending(&self) -> u32 {
        self.bits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::new()
    }
}
