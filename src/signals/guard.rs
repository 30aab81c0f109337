/*!
 * Collection Guard
 * Scoped collection that hands the signal back to the OS default on drop
 */

use super::registrar;
use super::types::SignalNumber;
use crate::core::errors::SignalResult;
use tracing::warn;

/// Collects a signal for as long as the guard lives
///
/// # Example
///
/// ```ignore
/// let _guard = CollectionGuard::new(signum)?;
/// raise_in_self(signum)?;
/// assert_eq!(poll_next(), Some(signum));
/// // default disposition restored here
/// ```
#[derive(Debug)]
#[must_use = "the signal returns to its default disposition when the guard is dropped"]
pub struct CollectionGuard {
    signum: SignalNumber,
    armed: bool,
}

impl CollectionGuard {
    pub fn new(signum: SignalNumber) -> SignalResult<Self> {
        registrar::collect(signum)?;
        Ok(Self {
            signum,
            armed: true,
        })
    }

    pub fn signum(&self) -> SignalNumber {
        self.signum
    }

    /// Keep collecting after the guard goes away
    pub fn forget(mut self) {
        self.armed = false;
    }
}

impl Drop for CollectionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = registrar::restore_default(self.signum) {
            warn!(signum = self.signum.raw(), error = %e, "Failed to restore default disposition");
        }
    }
}
