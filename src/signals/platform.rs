/*!
 * Platform Signal Resolver
 * Maps logical identities to the host's signal numbers
 *
 * This is the only place that knows platform signal names. Everything else
 * works on resolved `SignalNumber`s.
 */

use super::types::{SignalIdentity, SignalNumber, UNSUPPORTED};
#[cfg(unix)]
use crate::core::errors::{SignalError, SignalResult};

/// Whether the OS resets a handler to the default disposition on every
/// delivery, so the collector has to reinstall itself
#[cfg(unix)]
pub const REARM_ON_DELIVERY: bool = false;
#[cfg(not(unix))]
pub const REARM_ON_DELIVERY: bool = true;

/// Resolve an identity, or `None` if it has no meaning on this platform
#[cfg(unix)]
pub fn resolve(identity: SignalIdentity) -> Option<SignalNumber> {
    let signum = match identity {
        SignalIdentity::Interrupt => libc::SIGINT,
        SignalIdentity::Terminate => libc::SIGTERM,
        SignalIdentity::Hangup => libc::SIGHUP,
        SignalIdentity::Quit => libc::SIGQUIT,
        SignalIdentity::Abort => libc::SIGABRT,
        SignalIdentity::IllegalInstruction => libc::SIGILL,
        SignalIdentity::Trap => libc::SIGTRAP,
        SignalIdentity::Fault => libc::SIGSEGV,
        SignalIdentity::FloatingPoint => libc::SIGFPE,
        SignalIdentity::User1 => libc::SIGUSR1,
        SignalIdentity::User2 => libc::SIGUSR2,
    };
    Some(SignalNumber::from_raw(signum))
}

/// Resolve an identity, or `None` if it has no meaning on this platform
#[cfg(not(unix))]
pub fn resolve(identity: SignalIdentity) -> Option<SignalNumber> {
    let signum = match identity {
        SignalIdentity::Interrupt => libc::SIGINT,
        SignalIdentity::Terminate => libc::SIGTERM,
        SignalIdentity::Abort => libc::SIGABRT,
        SignalIdentity::IllegalInstruction => libc::SIGILL,
        SignalIdentity::Fault => libc::SIGSEGV,
        SignalIdentity::FloatingPoint => libc::SIGFPE,
        SignalIdentity::Hangup
        | SignalIdentity::Quit
        | SignalIdentity::Trap
        | SignalIdentity::User1
        | SignalIdentity::User2 => return None,
    };
    Some(SignalNumber::from_raw(signum))
}

/// Resolve to a raw number, [`UNSUPPORTED`] when platform-absent
#[inline]
pub fn resolve_raw(identity: SignalIdentity) -> i32 {
    resolve(identity).map_or(UNSUPPORTED, SignalNumber::raw)
}

/// Identities this platform supports
pub fn supported() -> impl Iterator<Item = (SignalIdentity, SignalNumber)> {
    SignalIdentity::ALL
        .into_iter()
        .filter_map(|identity| resolve(identity).map(|signum| (identity, signum)))
}

/// Convert a resolved number into nix's signal type
///
/// Numbers the host does not define are reported as invalid before any
/// OS call is made.
#[cfg(unix)]
pub(crate) fn os_signal(signum: SignalNumber) -> SignalResult<nix::sys::signal::Signal> {
    nix::sys::signal::Signal::try_from(signum.raw())
        .map_err(|_| SignalError::InvalidSignal(signum.raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolved_numbers_are_distinct_and_recordable() {
        let mut seen = HashSet::new();
        for (identity, signum) in supported() {
            assert!(signum.is_recordable(), "{} -> {}", identity, signum.raw());
            assert!(seen.insert(signum), "{} collides", identity);
        }
    }

    #[test]
    fn test_raw_matches_option() {
        for identity in SignalIdentity::ALL {
            match resolve(identity) {
                Some(signum) => assert_eq!(resolve_raw(identity), signum.raw()),
                None => assert_eq!(resolve_raw(identity), UNSUPPORTED),
            }
        }
    }

    #[test]
    fn test_reverse_lookup() {
        for (identity, signum) in supported() {
            assert_eq!(signum.identity(), Some(identity));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_posix_numbers() {
        assert_eq!(resolve(SignalIdentity::Interrupt), Some(SignalNumber::from_raw(2)));
        assert_eq!(resolve(SignalIdentity::FloatingPoint), Some(SignalNumber::from_raw(8)));
        assert_eq!(resolve(SignalIdentity::Fault), Some(SignalNumber::from_raw(11)));
        assert!(!REARM_ON_DELIVERY);
    }

    #[cfg(unix)]
    #[test]
    fn test_os_signal_rejects_unknown_numbers() {
        assert!(os_signal(SignalNumber::from_raw(libc::SIGUSR1)).is_ok());
        assert_eq!(
            os_signal(SignalNumber::from_raw(0)).unwrap_err(),
            SignalError::InvalidSignal(0)
        );
        assert_eq!(
            os_signal(SignalNumber::from_raw(-3)).unwrap_err(),
            SignalError::InvalidSignal(-3)
        );
    }

    #[cfg(not(unix))]
    #[test]
    fn test_absent_identities() {
        assert_eq!(resolve(SignalIdentity::Hangup), None);
        assert_eq!(resolve_raw(SignalIdentity::User1), UNSUPPORTED);
        assert!(REARM_ON_DELIVERY);
    }
}
