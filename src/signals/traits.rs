/*!
 * Signal Traits
 * Seams between policy code and the OS
 */

use super::types::{Disposition, SignalNumber};
use crate::core::errors::SignalResult;

/// Installs dispositions for resolved signal numbers
///
/// Each call replaces the previous disposition of that signal. A rejected
/// call leaves it unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait SignalRegistrar: Send + Sync {
    /// Install `disposition` for `signum`
    fn install(&self, signum: SignalNumber, disposition: Disposition) -> SignalResult<()>;

    fn ignore(&self, signum: SignalNumber) -> SignalResult<()> {
        self.install(signum, Disposition::Ignore)
    }

    fn restore_default(&self, signum: SignalNumber) -> SignalResult<()> {
        self.install(signum, Disposition::Default)
    }

    fn collect(&self, signum: SignalNumber) -> SignalResult<()> {
        self.install(signum, Disposition::Collect)
    }
}
