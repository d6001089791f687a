//! Expiry configuration: the closed set of built-in policies as one value.
//!
//! [`ExpiryConfig`] is what gets written to configuration files and sent to
//! other nodes.  It is itself an [`ExpiryPolicy`], so a cache can hold it
//! directly without knowing which variant it carries.
//!
//! ```toml
//! policy = "created"
//! duration = { unit = "seconds", amount = 60 }
//! ```
//!
//! # Example
//! ```
//! use lapse::{Duration, ExpiryConfig, ExpiryDecision, ExpiryPolicy, TimeUnit};
//!
//! let config = ExpiryConfig::from_toml_str(
//!     r#"
//!     policy = "created"
//!     duration = { unit = "seconds", amount = 60 }
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config, ExpiryConfig::created(Duration::of(TimeUnit::Seconds, 60)));
//! assert_eq!(config.expiry_for_accessed_entry("k"), ExpiryDecision::NoChange);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::duration::Duration;
use crate::error::ExpiryResult;
use crate::expiry::{
    AccessedExpiryPolicy, CreatedExpiryPolicy, EternalExpiryPolicy, ExpiryDecision,
    ExpiryPolicy, ModifiedExpiryPolicy, TouchedExpiryPolicy,
};

/// Which built-in policy to use, and with what duration.
///
/// Variants are never equal to each other, even when they carry the same
/// duration: `Created(1 min)` and `Accessed(1 min)` behave differently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExpiryConfig {
    /// No expiry: entries live until evicted for capacity.
    #[default]
    Eternal,
    /// Expire a fixed time after **creation**.
    Created(CreatedExpiryPolicy),
    /// Expire a fixed time after the last **read**.
    Accessed(AccessedExpiryPolicy),
    /// Expire a fixed time after the last **write**.
    Modified(ModifiedExpiryPolicy),
    /// Expire a fixed time after the last read or write.
    Touched(TouchedExpiryPolicy),
}

impl ExpiryConfig {
    pub const fn created(duration: Duration) -> Self {
        ExpiryConfig::Created(CreatedExpiryPolicy::new(duration))
    }

    pub const fn accessed(duration: Duration) -> Self {
        ExpiryConfig::Accessed(AccessedExpiryPolicy::new(duration))
    }

    pub const fn modified(duration: Duration) -> Self {
        ExpiryConfig::Modified(ModifiedExpiryPolicy::new(duration))
    }

    pub const fn touched(duration: Duration) -> Self {
        ExpiryConfig::Touched(TouchedExpiryPolicy::new(duration))
    }

    /// Name of the policy, as written in the `policy` field.
    pub const fn kind(&self) -> &'static str {
        match self {
            ExpiryConfig::Eternal => "eternal",
            ExpiryConfig::Created(_) => "created",
            ExpiryConfig::Accessed(_) => "accessed",
            ExpiryConfig::Modified(_) => "modified",
            ExpiryConfig::Touched(_) => "touched",
        }
    }

    /// The configured duration; [`Duration::ETERNAL`] for `Eternal`.
    pub const fn duration(&self) -> Duration {
        match self {
            ExpiryConfig::Eternal => Duration::ETERNAL,
            ExpiryConfig::Created(p) => p.expiry_duration(),
            ExpiryConfig::Accessed(p) => p.expiry_duration(),
            ExpiryConfig::Modified(p) => p.expiry_duration(),
            ExpiryConfig::Touched(p) => p.expiry_duration(),
        }
    }

    pub fn is_eternal(&self) -> bool {
        matches!(self, ExpiryConfig::Eternal)
    }

    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(s: &str) -> ExpiryResult<Self> {
        let config: ExpiryConfig = toml::from_str(s)?;
        tracing::debug!(policy = %config, "loaded expiry configuration");
        Ok(config)
    }

    /// Encodes the configuration as a TOML document.
    ///
    /// Fails for amounts above `i64::MAX`, which TOML integers cannot hold.
    pub fn to_toml_string(&self) -> ExpiryResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Moves the configuration behind an `Arc` for sharing across a cache.
    pub fn into_shared<K: ?Sized>(self) -> Arc<dyn ExpiryPolicy<K>> {
        Arc::new(self)
    }
}

impl fmt::Display for ExpiryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryConfig::Eternal => f.write_str("eternal"),
            other => write!(f, "{}({})", other.kind(), other.duration()),
        }
    }
}

impl<K: ?Sized> ExpiryPolicy<K> for ExpiryConfig {
    fn expiry_for_created_entry(&self, key: &K) -> ExpiryDecision {
        match self {
            ExpiryConfig::Eternal => EternalExpiryPolicy.expiry_for_created_entry(key),
            ExpiryConfig::Created(p) => p.expiry_for_created_entry(key),
            ExpiryConfig::Accessed(p) => p.expiry_for_created_entry(key),
            ExpiryConfig::Modified(p) => p.expiry_for_created_entry(key),
            ExpiryConfig::Touched(p) => p.expiry_for_created_entry(key),
        }
    }

    fn expiry_for_accessed_entry(&self, key: &K) -> ExpiryDecision {
        match self {
            ExpiryConfig::Eternal => EternalExpiryPolicy.expiry_for_accessed_entry(key),
            ExpiryConfig::Created(p) => p.expiry_for_accessed_entry(key),
            ExpiryConfig::Accessed(p) => p.expiry_for_accessed_entry(key),
            ExpiryConfig::Modified(p) => p.expiry_for_accessed_entry(key),
            ExpiryConfig::Touched(p) => p.expiry_for_accessed_entry(key),
        }
    }

    fn expiry_for_modified_entry(&self, key: &K) -> ExpiryDecision {
        match self {
            ExpiryConfig::Eternal => EternalExpiryPolicy.expiry_for_modified_entry(key),
            ExpiryConfig::Created(p) => p.expiry_for_modified_entry(key),
            ExpiryConfig::Accessed(p) => p.expiry_for_modified_entry(key),
            ExpiryConfig::Modified(p) => p.expiry_for_modified_entry(key),
            ExpiryConfig::Touched(p) => p.expiry_for_modified_entry(key),
        }
    }
}

impl From<EternalExpiryPolicy> for ExpiryConfig {
    fn from(_: EternalExpiryPolicy) -> Self {
        ExpiryConfig::Eternal
    }
}

impl From<CreatedExpiryPolicy> for ExpiryConfig {
    fn from(p: CreatedExpiryPolicy) -> Self {
        ExpiryConfig::Created(p)
    }
}

impl From<AccessedExpiryPolicy> for ExpiryConfig {
    fn from(p: AccessedExpiryPolicy) -> Self {
        ExpiryConfig::Accessed(p)
    }
}

impl From<ModifiedExpiryPolicy> for ExpiryConfig {
    fn from(p: ModifiedExpiryPolicy) -> Self {
        ExpiryConfig::Modified(p)
    }
}

impl From<TouchedExpiryPolicy> for ExpiryConfig {
    fn from(p: TouchedExpiryPolicy) -> Self {
        ExpiryConfig::Touched(p)
    }
}
