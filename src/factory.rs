//! Shared-instance factories and policy interning.
//!
//! Caches hold their policy behind an `Arc` so one instance can serve every
//! shard and thread.  [`SingletonFactory`] hands out that one instance;
//! [`PolicyInterner`] goes further and collapses equal configurations
//! coming from different places (for example, many caches configured from
//! the same file) onto a single shared allocation.
//!
//! # Example
//! ```
//! use lapse::{CreatedExpiryPolicy, Duration, ExpiryFactory, ExpiryPolicy};
//! use std::sync::Arc;
//!
//! let factory = CreatedExpiryPolicy::factory_of(Duration::ONE_HOUR);
//! let a: Arc<dyn ExpiryPolicy<str>> = factory.create();
//! let b: Arc<dyn ExpiryPolicy<str>> = factory.create();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use std::any::type_name;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::config::ExpiryConfig;
use crate::expiry::ExpiryPolicy;

// ---------------------------------------------------------------------------
// ExpiryFactory trait
// ---------------------------------------------------------------------------

/// Produces the policy a cache should use.
pub trait ExpiryFactory<K: ?Sized>: Send + Sync {
    fn create(&self) -> Arc<dyn ExpiryPolicy<K>>;
}

/// Always returns the same shared instance.
pub struct SingletonFactory<P> {
    instance: Arc<P>,
}

impl<P> SingletonFactory<P> {
    pub fn new(policy: P) -> Self {
        tracing::trace!(policy = type_name::<P>(), "created singleton expiry factory");
        SingletonFactory {
            instance: Arc::new(policy),
        }
    }

    /// The shared instance, with its concrete type.
    pub fn instance(&self) -> Arc<P> {
        Arc::clone(&self.instance)
    }
}

impl<P> Clone for SingletonFactory<P> {
    fn clone(&self) -> Self {
        SingletonFactory {
            instance: Arc::clone(&self.instance),
        }
    }
}

impl<K, P> ExpiryFactory<K> for SingletonFactory<P>
where
    K: ?Sized,
    P: ExpiryPolicy<K> + 'static,
{
    fn create(&self) -> Arc<dyn ExpiryPolicy<K>> {
        self.instance.clone()
    }
}

/// An [`ExpiryFactory`] backed by a closure.
pub struct FnFactory<F>(pub F);

impl<K, F> ExpiryFactory<K> for FnFactory<F>
where
    K: ?Sized,
    F: Fn() -> Arc<dyn ExpiryPolicy<K>> + Send + Sync,
{
    fn create(&self) -> Arc<dyn ExpiryPolicy<K>> {
        (self.0)()
    }
}

// ---------------------------------------------------------------------------
// PolicyInterner
// ---------------------------------------------------------------------------

/// Deduplicates equal policy configurations into shared instances.
///
/// Lookups of an already-interned configuration take only a read lock.
#[derive(Default)]
pub struct PolicyInterner {
    policies: RwLock<AHashMap<ExpiryConfig, Arc<ExpiryConfig>>>,
}

impl PolicyInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared instance equal to `config`, storing it first if
    /// no equal configuration has been seen.
    pub fn intern(&self, config: ExpiryConfig) -> Arc<ExpiryConfig> {
        if let Some(existing) = self.policies.read().get(&config) {
            return Arc::clone(existing);
        }
        let mut policies = self.policies.write();
        let shared = policies.entry(config).or_insert_with_key(|config| {
            tracing::debug!(policy = %config, "interned expiry policy");
            Arc::new(*config)
        });
        Arc::clone(shared)
    }

    /// Number of distinct configurations interned.
    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }

    /// Forgets every interned configuration.  Instances already handed out
    /// stay valid.
    pub fn clear(&self) {
        self.policies.write().clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
