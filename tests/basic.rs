use lapse::{
    CreatedExpiryPolicy, Duration, ExpiryConfig, ExpiryDecision, ExpiryError, ExpiryFactory,
    ExpiryPolicy, PolicyInterner, TimeUnit, TouchedExpiryPolicy,
};
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::{Arc, Barrier};
use std::time::Instant;

fn secs(n: u64) -> Duration {
    Duration::new(TimeUnit::Seconds, n as i64).unwrap()
}

/// Minimal stand-in for a cache entry: just the deadline a cache would keep.
struct Entry {
    expires_at: Option<Instant>,
}

impl Entry {
    fn create<P: ExpiryPolicy<str> + ?Sized>(policy: &P, key: &str, now: Instant) -> Self {
        Entry {
            expires_at: policy.expiry_for_created_entry(key).resolve(now, None),
        }
    }

    fn read<P: ExpiryPolicy<str> + ?Sized>(&mut self, policy: &P, key: &str, now: Instant) {
        self.expires_at = policy
            .expiry_for_accessed_entry(key)
            .resolve(now, self.expires_at);
    }

    fn write<P: ExpiryPolicy<str> + ?Sized>(&mut self, policy: &P, key: &str, now: Instant) {
        self.expires_at = policy
            .expiry_for_modified_entry(key)
            .resolve(now, self.expires_at);
    }
}

// ---------------------------------------------------------------------------
// Created-expiry scenarios
// ---------------------------------------------------------------------------

#[test]
fn sixty_second_policy_answers_every_event() {
    let policy = CreatedExpiryPolicy::new(secs(60));
    assert_eq!(
        policy.expiry_for_created_entry("k1"),
        ExpiryDecision::Apply(Duration::of(TimeUnit::Seconds, 60))
    );
    assert_eq!(policy.expiry_for_accessed_entry("k1"), ExpiryDecision::NoChange);
    assert_eq!(policy.expiry_for_modified_entry("k1"), ExpiryDecision::NoChange);
}

#[test]
fn equal_durations_make_equal_policies_with_equal_hashes() {
    let a = CreatedExpiryPolicy::new(secs(60));
    let b = CreatedExpiryPolicy::new(secs(60));
    let state = RandomState::new();
    assert_eq!(a, b);
    assert_eq!(state.hash_one(a), state.hash_one(b));
}

#[test]
fn different_durations_make_different_policies() {
    assert_ne!(
        CreatedExpiryPolicy::new(secs(60)),
        CreatedExpiryPolicy::new(secs(120))
    );
}

#[test]
fn absent_duration_cannot_build_a_policy() {
    let err = CreatedExpiryPolicy::try_from(None::<Duration>).unwrap_err();
    assert!(matches!(err, ExpiryError::InvalidArgument(_)));
}

#[test]
fn negative_duration_is_invalid_argument() {
    let err = Duration::new(TimeUnit::Minutes, -1).unwrap_err();
    assert!(matches!(err, ExpiryError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// Deadlines over an entry's life
// ---------------------------------------------------------------------------

#[test]
fn created_deadline_survives_reads_and_writes() {
    let policy = CreatedExpiryPolicy::new(secs(60));
    let t0 = Instant::now();
    let mut entry = Entry::create(&policy, "k", t0);
    let deadline = entry.expires_at;
    assert_eq!(deadline, Some(t0 + std::time::Duration::from_secs(60)));

    let later = t0 + std::time::Duration::from_secs(30);
    entry.read(&policy, "k", later);
    entry.write(&policy, "k", later);
    assert_eq!(entry.expires_at, deadline, "created expiry is never renewed");
}

#[test]
fn touched_deadline_moves_on_every_event() {
    let policy = TouchedExpiryPolicy::new(secs(60));
    let t0 = Instant::now();
    let mut entry = Entry::create(&policy, "k", t0);

    let t1 = t0 + std::time::Duration::from_secs(10);
    entry.read(&policy, "k", t1);
    assert_eq!(entry.expires_at, Some(t1 + std::time::Duration::from_secs(60)));

    let t2 = t1 + std::time::Duration::from_secs(10);
    entry.write(&policy, "k", t2);
    assert_eq!(entry.expires_at, Some(t2 + std::time::Duration::from_secs(60)));
}

#[test]
fn eternal_config_never_sets_a_deadline() {
    let policy = ExpiryConfig::Eternal;
    let t0 = Instant::now();
    let mut entry = Entry::create(&policy, "k", t0);
    entry.read(&policy, "k", t0);
    entry.write(&policy, "k", t0);
    assert_eq!(entry.expires_at, None);
}

#[test]
fn zero_duration_is_due_at_creation() {
    let policy = CreatedExpiryPolicy::new(Duration::ZERO);
    let t0 = Instant::now();
    let entry = Entry::create(&policy, "k", t0);
    assert_eq!(entry.expires_at, Some(t0));
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn one_policy_serves_many_threads() {
    let factory = CreatedExpiryPolicy::factory_of(secs(60));
    let policy: Arc<dyn ExpiryPolicy<str>> = factory.create();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let policy = Arc::clone(&policy);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for i in 0..1_000 {
                    let key = format!("t{t}-k{i}");
                    assert_eq!(
                        policy.expiry_for_created_entry(key.as_str()),
                        ExpiryDecision::Apply(Duration::ONE_MINUTE)
                    );
                    assert!(policy.expiry_for_accessed_entry(key.as_str()).is_no_change());
                    assert!(policy.expiry_for_modified_entry(key.as_str()).is_no_change());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn configs_from_different_sources_share_one_instance() {
    let interner = PolicyInterner::new();
    let from_toml = ExpiryConfig::from_toml_str(
        "policy = \"created\"\nduration = { unit = \"seconds\", amount = 60 }",
    )
    .unwrap();
    let from_json: ExpiryConfig = serde_json::from_str(
        r#"{"policy":"created","duration":{"unit":"minutes","amount":1}}"#,
    )
    .unwrap();

    let a = interner.intern(from_toml);
    let b = interner.intern(from_json);
    assert!(Arc::ptr_eq(&a, &b));
}

// ---------------------------------------------------------------------------
// Serialization boundary
// ---------------------------------------------------------------------------

#[test]
fn policy_survives_json_transport() {
    let config = ExpiryConfig::created(secs(60));
    let wire = serde_json::to_vec(&config).unwrap();
    let received: ExpiryConfig = serde_json::from_slice(&wire).unwrap();
    assert_eq!(received, config);
    assert_eq!(
        received.expiry_for_created_entry("k1"),
        config.expiry_for_created_entry("k1")
    );
    assert!(received.expiry_for_accessed_entry("k1").is_no_change());
}

#[test]
fn json_layout_names_the_policy() {
    let json = serde_json::to_string(&ExpiryConfig::created(secs(60))).unwrap();
    assert_eq!(
        json,
        r#"{"policy":"created","duration":{"unit":"seconds","amount":60}}"#
    );
    assert_eq!(
        serde_json::to_string(&ExpiryConfig::Eternal).unwrap(),
        r#"{"policy":"eternal"}"#
    );
}
