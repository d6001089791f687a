use serde::{Deserialize, Serialize};

use super::{ExpiryDecision, ExpiryPolicy};
use crate::duration::Duration;
use crate::factory::SingletonFactory;

/// Entries never expire.  Creation applies [`Duration::ETERNAL`]; nothing
/// after that changes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EternalExpiryPolicy;

impl EternalExpiryPolicy {
    pub fn factory() -> SingletonFactory<Self> {
        SingletonFactory::new(EternalExpiryPolicy)
    }
}

impl<K: ?Sized> ExpiryPolicy<K> for EternalExpiryPolicy {
    #[inline]
    fn expiry_for_created_entry(&self, _key: &K) -> ExpiryDecision {
        ExpiryDecision::Apply(Duration::ETERNAL)
    }
}
