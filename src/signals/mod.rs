/*!
 * Signals Module
 * Async-signal-safe collection of OS signals, drained by polling
 *
 * Data flow: OS -> collector (interrupt context) -> event record ->
 * poller (ordinary thread) -> the host runtime's own handling.
 * The resolver and registrar configure which signals reach the collector;
 * the sender injects signals into the same path.
 */

mod collector;
pub mod guard;
pub mod platform;
pub mod policy;
mod poller;
pub mod record;
mod registrar;
mod sender;
pub mod traits;
pub mod types;

// Re-export public API
pub use collector::collect_signal;
pub use guard::CollectionGuard;
pub use platform::{resolve, resolve_raw, supported, REARM_ON_DELIVERY};
pub use policy::{AppliedPolicy, SignalPolicy, POLICY_ENV};
pub use poller::{drain_pending, has_pending, pending_mask, poll_next, poll_next_raw, DrainPending};
pub use record::EventRecord;
pub use registrar::{collect, ignore, install, restore_default, OsRegistrar};
pub use sender::{raise_in_self, send_to};
pub use traits::SignalRegistrar;
pub use types::{
    Disposition, SignalIdentity, SignalNumber, SignalOperation, NONE_PENDING, RECORD_WIDTH,
    UNSUPPORTED,
};
