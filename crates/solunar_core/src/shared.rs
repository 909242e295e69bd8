//! Thread-safe, append-only threshold registry.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use crate::engine::Ephemeris;

/// An [`Ephemeris`] that many threads can read while others register
/// thresholds.
///
/// Readers take an `Arc` snapshot; registering swaps in a new table, so a
/// snapshot (and every result computed from it) never changes afterwards.
#[derive(Debug, Default)]
pub struct SharedEphemeris {
    inner: RwLock<Arc<Ephemeris>>,
}

impl SharedEphemeris {
    pub fn new(engine: Ephemeris) -> Self {
        Self { inner: RwLock::new(Arc::new(engine)) }
    }

    /// Current engine. Later registrations do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Ephemeris> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Appends a threshold for all subsequent snapshots.
    pub fn add_threshold(&self, angle: f64, rise: impl Into<String>, set: impl Into<String>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // clones the table only if a snapshot is still alive
        Arc::make_mut(&mut guard).add_threshold(angle, rise, set);
    }

    /// Replaces the whole engine, e.g. after loading a configuration.
    pub fn replace(&self, engine: Ephemeris) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(engine);
    }
}

/// The process-wide engine behind the free functions, seeded with the six
/// default thresholds on first use.
pub fn global() -> &'static SharedEphemeris {
    static GLOBAL: OnceLock<SharedEphemeris> = OnceLock::new();
    GLOBAL.get_or_init(SharedEphemeris::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_is_immutable() {
        let shared = SharedEphemeris::default();
        let before = shared.snapshot();
        shared.add_threshold(-4.0, "customDawn", "customDusk");
        let after = shared.snapshot();

        assert_eq!(before.thresholds().len(), 6);
        assert_eq!(after.thresholds().len(), 7);
    }

    #[test]
    fn test_concurrent_registration() {
        let shared = Arc::new(SharedEphemeris::new(Ephemeris::empty()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    shared.add_threshold(-f64::from(i), format!("rise{}", i), format!("set{}", i));
                    shared.snapshot().thresholds().len()
                })
            })
            .collect();

        for h in handles {
            let seen = h.join().unwrap();
            assert!((1..=8).contains(&seen));
        }
        assert_eq!(shared.snapshot().thresholds().len(), 8);
    }

    #[test]
    fn test_replace() {
        let shared = SharedEphemeris::default();
        shared.replace(Ephemeris::empty());
        assert!(shared.snapshot().thresholds().is_empty());
    }
}
