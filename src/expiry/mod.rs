//! Expiry policies: how long a cache entry lives after each lifecycle event.
//!
//! A cache calls one query per event (creation, access, modification) and
//! gets back an [`ExpiryDecision`]:
//!
//! - [`ExpiryDecision::Apply`] sets the entry's deadline to `now + d`.
//! - [`ExpiryDecision::NoChange`] keeps whatever deadline the entry already
//!   has.
//!
//! Re-applying the same duration on an access would restart the clock, which
//! is why "leave it alone" is its own variant rather than a repeat of the
//! configured duration.
//!
//! | Policy | created | accessed | modified |
//! |---|---|---|---|
//! | [`EternalExpiryPolicy`] | `ETERNAL` | no change | no change |
//! | [`CreatedExpiryPolicy`] | `d` | no change | no change |
//! | [`AccessedExpiryPolicy`] | `d` | `d` | no change |
//! | [`ModifiedExpiryPolicy`] | `d` | no change | `d` |
//! | [`TouchedExpiryPolicy`] | `d` | `d` | `d` |

mod accessed;
mod created;
mod eternal;
mod modified;
mod touched;

pub use accessed::AccessedExpiryPolicy;
pub use created::CreatedExpiryPolicy;
pub use eternal::EternalExpiryPolicy;
pub use modified::ModifiedExpiryPolicy;
pub use touched::TouchedExpiryPolicy;

use std::sync::Arc;
use std::time::Instant;

use crate::duration::Duration;

// ---------------------------------------------------------------------------
// ExpiryDecision
// ---------------------------------------------------------------------------

/// What a policy wants done to an entry's deadline after a lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpiryDecision {
    /// Time the entry from now using this duration.
    Apply(Duration),
    /// Leave the entry's current deadline untouched.
    NoChange,
}

impl ExpiryDecision {
    /// The duration to apply, if any.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            ExpiryDecision::Apply(d) => Some(*d),
            ExpiryDecision::NoChange => None,
        }
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self, ExpiryDecision::NoChange)
    }

    /// Computes the entry's deadline after the event.
    ///
    /// `current` is the deadline the entry carries now (`None` = never
    /// expires).  Returns the new deadline in the same form.  No comparison
    /// against `now` happens here: deciding whether the deadline has passed
    /// is up to the cache.
    pub fn resolve(self, now: Instant, current: Option<Instant>) -> Option<Instant> {
        match self {
            ExpiryDecision::Apply(d) => d.expires_at(now),
            ExpiryDecision::NoChange => current,
        }
    }
}

impl From<Duration> for ExpiryDecision {
    fn from(d: Duration) -> Self {
        ExpiryDecision::Apply(d)
    }
}

// ---------------------------------------------------------------------------
// ExpiryPolicy
// ---------------------------------------------------------------------------

/// Decides how long cache entries live.
///
/// Implementations are immutable and shared across threads, so every query
/// must be a pure function of the policy's configuration and its argument.
/// The key is passed for policies that want to vary by key; none of the
/// built-in policies look at it.
pub trait ExpiryPolicy<K: ?Sized>: Send + Sync {
    /// Called when an entry is first inserted.
    fn expiry_for_created_entry(&self, key: &K) -> ExpiryDecision;

    /// Called when an existing entry is read.
    fn expiry_for_accessed_entry(&self, key: &K) -> ExpiryDecision {
        let _ = key;
        ExpiryDecision::NoChange
    }

    /// Called when an existing entry's value is replaced.
    fn expiry_for_modified_entry(&self, key: &K) -> ExpiryDecision {
        let _ = key;
        ExpiryDecision::NoChange
    }
}

impl<K: ?Sized, P: ExpiryPolicy<K> + ?Sized> ExpiryPolicy<K> for Arc<P> {
    #[inline]
    fn expiry_for_created_entry(&self, key: &K) -> ExpiryDecision {
        (**self).expiry_for_created_entry(key)
    }

    #[inline]
    fn expiry_for_accessed_entry(&self, key: &K) -> ExpiryDecision {
        (**self).expiry_for_accessed_entry(key)
    }

    #[inline]
    fn expiry_for_modified_entry(&self, key: &K) -> ExpiryDecision {
        (**self).expiry_for_modified_entry(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
