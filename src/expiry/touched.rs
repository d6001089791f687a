use serde::{Deserialize, Serialize};

use super::{ExpiryDecision, ExpiryPolicy};
use crate::duration::Duration;
use crate::factory::SingletonFactory;

/// Entries expire a fixed duration after they were last **touched**, i.e.
/// created, read or updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchedExpiryPolicy {
    #[serde(rename = "duration")]
    expiry_duration: Duration,
}

impl TouchedExpiryPolicy {
    pub const fn new(expiry_duration: Duration) -> Self {
        TouchedExpiryPolicy { expiry_duration }
    }

    pub fn factory_of(duration: Duration) -> SingletonFactory<Self> {
        SingletonFactory::new(Self::new(duration))
    }

    pub const fn expiry_duration(&self) -> Duration {
        self.expiry_duration
    }
}

impl<K: ?Sized> ExpiryPolicy<K> for TouchedExpiryPolicy {
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
        ExpiryDecision::Apply(self.expiry_duration)
    }
}
