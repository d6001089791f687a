//! Expiry policies for in-memory caches.
//!
//! A policy answers one question per cache-entry lifecycle event: how long
//! should this entry live from now?  See [`ExpiryPolicy`] for the contract
//! and [`expiry`] for the built-in family.
//!
//! # Example
//! ```
//! use lapse::{CreatedExpiryPolicy, Duration, ExpiryPolicy};
//! use std::time::Instant;
//!
//! let policy = CreatedExpiryPolicy::new(Duration::FIVE_MINUTES);
//! let now = Instant::now();
//!
//! let deadline = policy.expiry_for_created_entry("session").resolve(now, None);
//! // Reading the entry later does not push the deadline back.
//! let after_read = policy.expiry_for_accessed_entry("session").resolve(now, deadline);
//! assert_eq!(after_read, deadline);
//! ```

mod config;
mod duration;
mod error;
mod factory;
pub mod expiry;

pub use config::ExpiryConfig;
pub use duration::{Duration, TimeUnit};
pub use error::{ExpiryError, ExpiryResult};
pub use expiry::{
    AccessedExpiryPolicy, CreatedExpiryPolicy, EternalExpiryPolicy, ExpiryDecision,
    ExpiryPolicy, ModifiedExpiryPolicy, TouchedExpiryPolicy,
};
pub use factory::{ExpiryFactory, FnFactory, PolicyInterner, SingletonFactory};
