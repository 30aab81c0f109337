/*!
 * Signal Sender
 * Injects signals into this process or another one
 */

use super::types::{SignalNumber, SignalOperation};
use crate::core::errors::{SignalError, SignalResult};
use tracing::{debug, warn};

/// Deliver `signum` to the calling process through the normal signal path
///
/// The signal goes through whatever disposition is installed, exactly as an
/// external delivery would. For a collected signal the bit is recorded by
/// the time this returns.
pub fn raise_in_self(signum: SignalNumber) -> SignalResult<()> {
    os::raise(signum).map_err(|e| {
        warn!(signum = signum.raw(), error = %e, "Raise failed");
        e
    })?;
    debug!(signum = %signum, "Raised signal in current process");
    Ok(())
}

/// Best-effort delivery of `signum` to process `pid`
///
/// Where cross-process delivery does not exist, a `pid` naming the current
/// process falls back to [`raise_in_self`] and anything else is
/// [`SignalError::Unsupported`].
pub fn send_to(pid: u32, signum: SignalNumber) -> SignalResult<()> {
    os::kill(pid, signum).map_err(|e| {
        warn!(pid, signum = signum.raw(), error = %e, "Send failed");
        e
    })?;
    debug!(pid, signum = %signum, "Sent signal");
    Ok(())
}

#[cfg(unix)]
mod os {
    use super::*;
    use crate::signals::platform::os_signal;
    use nix::unistd::Pid;

    pub(super) fn raise(signum: SignalNumber) -> SignalResult<()> {
        let signal = os_signal(signum)?;
        nix::sys::signal::raise(signal)
            .map_err(|errno| SignalError::rejected(SignalOperation::Raise, signum.raw(), errno))
    }

    pub(super) fn kill(pid: u32, signum: SignalNumber) -> SignalResult<()> {
        let signal = os_signal(signum)?;
        // Zero and negative pids address process groups, which this API does not expose
        let raw_pid = i32::try_from(pid)
            .ok()
            .filter(|raw| *raw > 0)
            .ok_or_else(|| {
                SignalError::rejected(
                    SignalOperation::Send,
                    signum.raw(),
                    format!("invalid pid {}", pid),
                )
            })?;
        nix::sys::signal::kill(Pid::from_raw(raw_pid), signal)
            .map_err(|errno| SignalError::rejected(SignalOperation::Send, signum.raw(), errno))
    }
}

#[cfg(not(unix))]
mod os {
    use super::*;

    pub(super) fn raise(signum: SignalNumber) -> SignalResult<()> {
        // SAFETY: raise(3) has no memory-safety preconditions
        if unsafe { libc::raise(signum.raw()) } != 0 {
            return Err(SignalError::rejected(
                SignalOperation::Raise,
                signum.raw(),
                std::io::Error::last_os_error(),
            ));
        }
        Ok(())
    }

    pub(super) fn kill(pid: u32, signum: SignalNumber) -> SignalResult<()> {
        if pid == std::process::id() {
            return raise(signum);
        }
        Err(SignalError::unsupported(
            SignalOperation::Send,
            format!("cannot deliver signal {} to process {}", signum.raw(), pid),
        ))
    }
}
