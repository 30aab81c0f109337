/*!
 * Signal Collector
 * The OS-level handler installed by `collect`
 *
 * Runs in interrupt context. It sets one bit in the event record and
 * returns: no allocation, no locks, no logging, no unbounded work.
 */

use super::platform::REARM_ON_DELIVERY;
use super::record::RECORD;
use super::types::RECORD_WIDTH;
use libc::c_int;

/// Handler invoked by the OS with the delivered signal number
///
/// An out-of-range number means the registrar was bypassed; the process
/// aborts with a diagnostic rather than touching a bogus bit.
pub extern "C" fn collect_signal(signum: c_int) {
    crate::verify!(
        signum >= 0 && (signum as u32) < RECORD_WIDTH,
        "signal number out of range: {}",
        signum
    );

    RECORD.mark(signum as u32);

    // Must stay last: the reinstall may itself be interrupted by the next delivery
    if REARM_ON_DELIVERY {
        rearm(signum);
    }
}

#[cfg(unix)]
#[inline(always)]
fn rearm(_signum: c_int) {}

#[cfg(not(unix))]
fn rearm(signum: c_int) {
    let handler = collect_signal as extern "C" fn(c_int) as libc::sighandler_t;
    // SAFETY: signal(3) is async-signal-safe for the signal being handled
    let previous = unsafe { libc::signal(signum, handler) };
    crate::verify!(previous != libc::SIG_ERR, "signal failed: {}", signum);
}
