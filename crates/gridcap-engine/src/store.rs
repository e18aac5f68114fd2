//! Hot-reloadable rule-set storage.
//!
//! [`RuleSetStore`] holds the current `Arc<RuleSet>`. A reload validates
//! and builds a complete new snapshot before touching the lock, then only
//! stamps the version and swaps the `Arc` under the write lock. Readers
//! clone the `Arc` under a read lock and keep it for the whole decision,
//! so a decision never sees half of a reload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use gridcap_core::{RuleSet, RuleSetProvider, RuleSetVersion};

use crate::config::{ConfigError, LimiterConfig};

/// Shared, read-mostly home of the current rule set.
///
/// Versions are stamped by the store and increase by one per successful
/// publish. A rejected config leaves the current snapshot and version
/// untouched.
pub struct RuleSetStore {
    current: RwLock<Arc<RuleSet>>,
    /// Mirror of `current.version`, readable without the lock.
    version: AtomicU64,
}

// Compile-time assertion: RuleSetStore must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<RuleSetStore>();
};

impl RuleSetStore {
    /// A store holding the permissive default rule set at version 0.
    pub fn empty() -> Self {
        Self {
            current: RwLock::new(Arc::new(RuleSet::default())),
            version: AtomicU64::new(0),
        }
    }

    /// A store whose first snapshot (version 1) is built from `config`.
    pub fn new(config: LimiterConfig) -> Result<Self, ConfigError> {
        let store = Self::empty();
        store.publish(config)?;
        Ok(store)
    }

    /// Validate `config` and make it the current snapshot.
    ///
    /// Returns the version stamped on the new snapshot.
    pub fn publish(&self, config: LimiterConfig) -> Result<RuleSetVersion, ConfigError> {
        // Stamped for real under the lock; concurrent publishers are
        // serialized there.
        let mut rules = config.into_rule_set(RuleSetVersion(0))?;
        let (enabled, rule_count, exception_count) =
            (rules.enabled, rules.rules.len(), rules.exceptions.len());

        let version = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let version = RuleSetVersion(current.version.0 + 1);
            rules.version = version;
            *current = Arc::new(rules);
            // Release-store pairs with the Acquire in `version()`.
            self.version.store(version.0, Ordering::Release);
            version
        };

        if !enabled {
            tracing::warn!(%version, "published rule set has limits disabled");
        }
        tracing::info!(
            %version,
            rules = rule_count,
            exceptions = exception_count,
            "published rule set"
        );
        Ok(version)
    }

    /// Parse, validate, and publish a JSON document.
    pub fn publish_json(&self, json: &str) -> Result<RuleSetVersion, ConfigError> {
        let config = LimiterConfig::from_json_str(json).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected rule set document");
        })?;
        self.publish(config)
    }

    /// Version of the current snapshot.
    pub fn version(&self) -> RuleSetVersion {
        RuleSetVersion(self.version.load(Ordering::Acquire))
    }
}

impl Default for RuleSetStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl RuleSetProvider for RuleSetStore {
    fn snapshot(&self) -> Arc<RuleSet> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }
}
