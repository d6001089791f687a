use serde::{Deserialize, Serialize};

use super::{ExpiryDecision, ExpiryPolicy};
use crate::duration::Duration;
use crate::error::{ExpiryError, ExpiryResult};
use crate::factory::SingletonFactory;

/// Entries expire a fixed duration after they were **created**.
///
/// Reads and updates never move the deadline: the clock is set once at
/// insertion and never renewed.
///
/// # Example
/// ```
/// use lapse::{CreatedExpiryPolicy, Duration, ExpiryDecision, ExpiryPolicy, TimeUnit};
///
/// let policy = CreatedExpiryPolicy::new(Duration::of(TimeUnit::Seconds, 60));
/// assert_eq!(
///     policy.expiry_for_created_entry("k1"),
///     ExpiryDecision::Apply(Duration::ONE_MINUTE)
/// );
/// assert_eq!(policy.expiry_for_accessed_entry("k1"), ExpiryDecision::NoChange);
/// assert_eq!(policy.expiry_for_modified_entry("k1"), ExpiryDecision::NoChange);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatedExpiryPolicy {
    #[serde(rename = "duration")]
    expiry_duration: Duration,
}

impl CreatedExpiryPolicy {
    pub const fn new(expiry_duration: Duration) -> Self {
        CreatedExpiryPolicy { expiry_duration }
    }

    /// A factory handing out one shared instance configured with `duration`.
    pub fn factory_of(duration: Duration) -> SingletonFactory<Self> {
        SingletonFactory::new(Self::new(duration))
    }

    pub const fn expiry_duration(&self) -> Duration {
        self.expiry_duration
    }
}

impl TryFrom<Option<Duration>> for CreatedExpiryPolicy {
    type Error = ExpiryError;

    /// A created-expiry policy without a duration has nothing to apply on
    /// creation, so `None` is rejected rather than read as "never expires".
    fn try_from(duration: Option<Duration>) -> ExpiryResult<Self> {
        duration
            .map(Self::new)
            .ok_or_else(|| ExpiryError::invalid("created expiry policy requires a duration"))
    }
}

impl<K: ?Sized> ExpiryPolicy<K> for CreatedExpiryPolicy {
    #[inline]
    fn expiry_for_created_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::Apply(self.expiry_duration)
    }

    #[inline]
    fn expiry_for_accessed_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::NoChange
    }

    #[inline]
    fn expiry_for_modified_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::NoChange
    }
}
