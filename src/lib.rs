/*!
 * Runtime Signals
 * Signal collection and polling for managed language runtimes
 *
 * Signals are captured by an async-signal-safe handler into a lock-free
 * record and handed to the runtime later, one at a time, on an ordinary
 * thread where it may allocate and run arbitrary code.
 */

pub mod core;
pub mod directory;
pub mod monitoring;
pub mod signals;

// Re-exports
pub use crate::core::errors::{DirectoryError, DirectoryResult, SignalError, SignalResult};
pub use monitoring::init_tracing;
pub use signals::{
    collect, ignore, poll_next, raise_in_self, resolve, restore_default, send_to, Disposition,
    SignalIdentity, SignalNumber, SignalPolicy,
};
