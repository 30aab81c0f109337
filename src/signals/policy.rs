/*!
 * Signal Policy
 * Declarative identity -> disposition table, loadable from JSON or the environment
 */

use super::platform;
use super::traits::SignalRegistrar;
use super::types::{Disposition, SignalIdentity, SignalNumber};
use crate::core::errors::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use tracing::{debug, info, instrument};

/// Environment variable holding a JSON policy, e.g.
/// `{"interrupt":"collect","user1":"ignore"}`
pub const POLICY_ENV: &str = "RUNTIME_SIGNALS_POLICY";

/// Dispositions to install, keyed by logical identity
///
/// Entries are applied in identity declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalPolicy {
    entries: BTreeMap<SignalIdentity, Disposition>,
}

/// Outcome of [`SignalPolicy::apply`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedPolicy {
    /// Installed entries with the number they resolved to
    pub installed: Vec<(SignalIdentity, SignalNumber, Disposition)>,
    /// Identities skipped because this platform lacks them
    pub unsupported: Vec<SignalIdentity>,
}

impl SignalPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SignalPolicy::set`]
    pub fn with(mut self, identity: SignalIdentity, disposition: Disposition) -> Self {
        self.set(identity, disposition);
        self
    }

    /// Set the disposition for `identity`, returning the previous one
    pub fn set(&mut self, identity: SignalIdentity, disposition: Disposition) -> Option<Disposition> {
        self.entries.insert(identity, disposition)
    }

    pub fn get(&self, identity: SignalIdentity) -> Option<Disposition> {
        self.entries.get(&identity).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalIdentity, Disposition)> + '_ {
        self.entries.iter().map(|(identity, disposition)| (*identity, *disposition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(json: &str) -> SignalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from [`POLICY_ENV`]; `None` when the variable is unset
    pub fn from_env() -> SignalResult<Option<Self>> {
        match env::var(POLICY_ENV) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(SignalError::Config(format!(
                "{} is not valid unicode",
                POLICY_ENV
            ))),
        }
    }

    /// Install every entry through `registrar`
    ///
    /// Platform-absent identities are skipped without a registrar call.
    /// The first rejection stops the walk; entries before it stay installed.
    #[instrument(level = "debug", skip_all, fields(entries = self.len()))]
    pub fn apply<R>(&self, registrar: &R) -> SignalResult<AppliedPolicy>
    where
        R: SignalRegistrar + ?Sized,
    {
        self.apply_with(registrar, platform::resolve)
    }

    pub(crate) fn apply_with<R, F>(&self, registrar: &R, resolve: F) -> SignalResult<AppliedPolicy>
    where
        R: SignalRegistrar + ?Sized,
        F: Fn(SignalIdentity) -> Option<SignalNumber>,
    {
        let mut applied = AppliedPolicy::default();

        for (identity, disposition) in self.iter() {
            let Some(signum) = resolve(identity) else {
                debug!(%identity, "Signal not available on this platform, skipping");
                applied.unsupported.push(identity);
                continue;
            };

            registrar.install(signum, disposition)?;
            applied.installed.push((identity, signum, disposition));
        }

        info!(
            installed = applied.installed.len(),
            unsupported = applied.unsupported.len(),
            "Signal policy applied"
        );
        Ok(applied)
    }
}
