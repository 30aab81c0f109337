/*!
 * Signal Registrar
 * Installs ignore / default / collect dispositions through the OS
 */

use super::traits::SignalRegistrar;
use super::types::{Disposition, SignalNumber};
use crate::core::errors::{SignalError, SignalResult};
use tracing::{debug, warn};

/// Registrar backed by the host's signal-disposition API
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRegistrar;

impl SignalRegistrar for OsRegistrar {
    fn install(&self, signum: SignalNumber, disposition: Disposition) -> SignalResult<()> {
        install(signum, disposition)
    }
}

/// Discard future deliveries of `signum`
pub fn ignore(signum: SignalNumber) -> SignalResult<()> {
    install(signum, Disposition::Ignore)
}

/// Return `signum` to the platform default, which may terminate the process
pub fn restore_default(signum: SignalNumber) -> SignalResult<()> {
    install(signum, Disposition::Default)
}

/// Record future deliveries of `signum` for [`crate::signals::poll_next`]
pub fn collect(signum: SignalNumber) -> SignalResult<()> {
    install(signum, Disposition::Collect)
}

/// Install `disposition` for `signum`
///
/// Collection is refused up front for the null signal and for numbers
/// without a bit in the record, which keeps the collector's range guard unreachable through this API.
pub fn install(signum: SignalNumber, disposition: Disposition) -> SignalResult<()> {
    if disposition == Disposition::Collect && !signum.is_collectable() {
        warn!(signum = signum.raw(), "Refusing to collect signal outside the record");
        return Err(SignalError::InvalidSignal(signum.raw()));
    }

    os::install(signum, disposition).map_err(|e| {
        warn!(signum = signum.raw(), ?disposition, error = %e, "Signal registration rejected");
        e
    })?;

    debug!(signum = %signum, ?disposition, "Signal disposition installed");
    Ok(())
}

#[cfg(unix)]
mod os {
    use super::*;
    use crate::signals::collector::collect_signal;
    use crate::signals::platform::os_signal;
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet};

    pub(super) fn install(signum: SignalNumber, disposition: Disposition) -> SignalResult<()> {
        let signal = os_signal(signum)?;
        let handler = match disposition {
            Disposition::Ignore => SigHandler::SigIgn,
            Disposition::Default => SigHandler::SigDfl,
            Disposition::Collect => SigHandler::Handler(collect_signal),
        };
        // No SA_RESTART: blocking calls return EINTR so the runtime can poll
        let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());

        // SAFETY: collect_signal is async-signal-safe; it only updates an atomic
        unsafe { sigaction(signal, &action) }
            .map(drop)
            .map_err(|errno| SignalError::rejected(disposition.into(), signum.raw(), errno))
    }
}

#[cfg(not(unix))]
mod os {
    use super::*;
    use crate::signals::collector::collect_signal;
    use crate::signals::types::SignalOperation;
    use libc::c_int;

    pub(super) fn install(signum: SignalNumber, disposition: Disposition) -> SignalResult<()> {
        let handler = match disposition {
            Disposition::Ignore => libc::SIG_IGN,
            Disposition::Default => libc::SIG_DFL,
            Disposition::Collect => collect_signal as extern "C" fn(c_int) as libc::sighandler_t,
        };

        // SAFETY: collect_signal is async-signal-safe; it only updates an atomic
        let previous = unsafe { libc::signal(signum.raw(), handler) };
        if previous == libc::SIG_ERR {
            let operation: SignalOperation = disposition.into();
            return Err(SignalError::rejected(
                operation,
                signum.raw(),
                std::io::Error::last_os_error(),
            ));
        }
        Ok(())
    }
}
