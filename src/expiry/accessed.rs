use serde::{Deserialize, Serialize};

use super::{ExpiryDecision, ExpiryPolicy};
use crate::duration::Duration;
use crate::factory::SingletonFactory;

/// Entries expire a fixed duration after they were last **read**
/// (time-to-idle).  Creation starts the clock, every access restarts it and
/// updates leave it alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessedExpiryPolicy {
    #[serde(rename = "duration")]
    expiry_duration: Duration,
}

impl AccessedExpiryPolicy {
    pub const fn new(expiry_duration: Duration) -> Self {
        AccessedExpiryPolicy { expiry_duration }
    }

    pub fn factory_of(duration: Duration) -> SingletonFactory<Self> {
        SingletonFactory::new(Self::new(duration))
    }

    pub const fn expiry_duration(&self) -> Duration {
        self.expiry_duration
    }
}

impl<K: ?Sized> ExpiryPolicy<K> for AccessedExpiryPolicy {
    #[inline]
    fn expiry_for_created_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::Apply(self.expiry_duration)
    }

    #[inline]
    fn expiry_for_accessed_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::Apply(self.expiry_duration)
    }

    #[inline]
    fn expiry_for_modified_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::NoChange
    }
}
