//! Drives a toy session store with a policy loaded from TOML.
//!
//! The store keeps only what a real cache would: a value and a deadline per
//! key.  The policy decides the deadline, the store decides when it has
//! passed.
//!
//! Run with:
//!     RUST_LOG=debug cargo run --example created_ttl

use ahash::AHashMap;
use lapse::{ExpiryConfig, ExpiryPolicy, ExpiryResult};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
policy = "created"
duration = { unit = "milliseconds", amount = 200 }
"#;

struct Slot {
    value: String,
    expires_at: Option<Instant>,
}

struct SessionStore {
    policy: Arc<dyn ExpiryPolicy<str>>,
    slots: Mutex<AHashMap<String, Slot>>,
}

impl SessionStore {
    fn new(policy: Arc<dyn ExpiryPolicy<str>>) -> Self {
        SessionStore {
            policy,
            slots: Mutex::new(AHashMap::new()),
        }
    }

    fn insert(&self, key: &str, value: &str) {
        let now = Instant::now();
        let mut slots = self.slots.lock();
        match slots.get_mut(key) {
            Some(slot) => {
                slot.value = value.to_string();
                slot.expires_at = self
                    .policy
                    .expiry_for_modified_entry(key)
                    .resolve(now, slot.expires_at);
            }
            None => {
                let expires_at = self.policy.expiry_for_created_entry(key).resolve(now, None);
                slots.insert(
                    key.to_string(),
                    Slot {
                        value: value.to_string(),
                        expires_at,
                    },
                );
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let mut slots = self.slots.lock();
        let expired = slots
            .get(key)
            .and_then(|slot| slot.expires_at)
            .is_some_and(|deadline| now >= deadline);
        if expired {
            slots.remove(key);
            tracing::info!(key, "session expired");
            return None;
        }
        let slot = slots.get_mut(key)?;
        slot.expires_at = self
            .policy
            .expiry_for_accessed_entry(key)
            .resolve(now, slot.expires_at);
        Some(slot.value.clone())
    }
}

fn main() -> ExpiryResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ExpiryConfig::from_toml_str(CONFIG)?;
    println!("policy: {config}");
    let store = SessionStore::new(config.into_shared());

    store.insert("alice", "token-1");
    for step in 0..5 {
        std::thread::sleep(Duration::from_millis(60));
        store.insert("alice", &format!("token-{}", step + 2));
        match store.get("alice") {
            Some(token) => println!("t+{:>3}ms  alice -> {token}", (step + 1) * 60),
            None => println!("t+{:>3}ms  alice expired despite activity", (step + 1) * 60),
        }
    }
    Ok(())
}
