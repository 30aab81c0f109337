/*!
 * Signal Types
 * Logical signal identities, resolved numbers and dispositions
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinguishable signal numbers in the event record
pub const RECORD_WIDTH: u32 = 32;

/// Raw poll result meaning "nothing pending"
pub const NONE_PENDING: i32 = -1;

/// Raw resolver result meaning "not available on this platform"
pub const UNSUPPORTED: i32 = -1;

/// Logical signal identities a runtime may ask about
///
/// Mapping to OS numbers lives entirely in [`crate::signals::platform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalIdentity {
    /// Interrupt from keyboard (Ctrl+C)
    Interrupt,
    /// Termination request
    Terminate,
    /// Hangup on controlling terminal
    Hangup,
    /// Quit from keyboard
    Quit,
    /// Abort
    Abort,
    /// Illegal instruction
    IllegalInstruction,
    /// Trace/breakpoint trap
    Trap,
    /// Invalid memory reference
    Fault,
    /// Floating-point exception
    FloatingPoint,
    /// User-defined signal 1
    User1,
    /// User-defined signal 2
    User2,
}

impl SignalIdentity {
    pub const ALL: [SignalIdentity; 11] = [
        SignalIdentity::Interrupt,
        SignalIdentity::Terminate,
        SignalIdentity::Hangup,
        SignalIdentity::Quit,
        SignalIdentity::Abort,
        SignalIdentity::IllegalInstruction,
        SignalIdentity::Trap,
        SignalIdentity::Fault,
        SignalIdentity::FloatingPoint,
        SignalIdentity::User1,
        SignalIdentity::User2,
    ];

    /// Configuration name, as used by serde and `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            SignalIdentity::Interrupt => "interrupt",
            SignalIdentity::Terminate => "terminate",
            SignalIdentity::Hangup => "hangup",
            SignalIdentity::Quit => "quit",
            SignalIdentity::Abort => "abort",
            SignalIdentity::IllegalInstruction => "illegal_instruction",
            SignalIdentity::Trap => "trap",
            SignalIdentity::Fault => "fault",
            SignalIdentity::FloatingPoint => "floating_point",
            SignalIdentity::User1 => "user1",
            SignalIdentity::User2 => "user2",
        }
    }
}

impl fmt::Display for SignalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignalIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalIdentity::ALL
            .into_iter()
            .find(|identity| identity.name() == s)
            .ok_or_else(|| format!("unknown signal identity: {}", s))
    }
}

/// A platform-specific numeric signal value
///
/// Obtained from the resolver for portable code, or built from a raw number
/// when the caller already speaks the host's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalNumber(i32);

impl SignalNumber {
    #[inline]
    pub const fn from_raw(signum: i32) -> Self {
        Self(signum)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether this number has a bit in the event record
    #[inline]
    pub const fn is_recordable(self) -> bool {
        self.0 >= 0 && (self.0 as u32) < RECORD_WIDTH
    }

    /// Whether `collect` may install the collector for this number:
    /// recordable and a real signal (0 is the null signal)
    #[inline]
    pub const fn is_collectable(self) -> bool {
        self.0 >= 1 && self.is_recordable()
    }

    /// Reverse lookup of the identity on the current platform
    pub fn identity(self) -> Option<SignalIdentity> {
        SignalIdentity::ALL
            .into_iter()
            .find(|identity| crate::signals::platform::resolve(*identity) == Some(self))
    }
}

impl From<SignalNumber> for i32 {
    fn from(signum: SignalNumber) -> Self {
        signum.0
    }
}

impl fmt::Display for SignalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity() {
            Some(identity) => write!(f, "{}({})", identity, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// What the OS does when a signal is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Discard the signal
    Ignore,
    /// Platform default action (may terminate the process)
    Default,
    /// Record the signal for a later poll
    Collect,
}

/// Operations that can fail with an OS rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOperation {
    Ignore,
    RestoreDefault,
    Collect,
    Raise,
    Send,
}

impl From<Disposition> for SignalOperation {
    fn from(disposition: Disposition) -> Self {
        match disposition {
            Disposition::Ignore => SignalOperation::Ignore,
            Disposition::Default => SignalOperation::RestoreDefault,
            Disposition::Collect => SignalOperation::Collect,
        }
    }
}

impl fmt::Display for SignalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalOperation::Ignore => "ignore",
            SignalOperation::RestoreDefault => "restore_default",
            SignalOperation::Collect => "collect",
            SignalOperation::Raise => "raise",
            SignalOperation::Send => "send",
        })
    }
}
