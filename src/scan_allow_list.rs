use std::time::Duration;

use parking_lot::Mutex;

use super::scan_error::MonitorError;
use super::scan_sample::Identifier;

/// Authorized networks, shared by every task that needs to classify an SSID.
///
/// Readers never block forever on the lock: after `lock_wait` they get
/// `MonitorError::LockBusy` and must treat the SSID as not verified.
pub struct AllowListStore {
    entries: Mutex<Vec<Identifier>>,
    lock_wait: Duration,
}

impl AllowListStore {
    pub fn new(entries: Vec<Identifier>, lock_wait: Duration) -> Self {
        Self {
            entries: Mutex::new(entries),
            lock_wait,
        }
    }

    /// `Ok(true)` on an exact match with any entry, `Ok(false)` otherwise.
    pub fn is_authorized(&self, ssid: &Identifier) -> Result<bool, MonitorError> {
        // Bounded wait on the lock
        let Some(entries) = self.entries.try_lock_for(self.lock_wait) else {
            return Err(MonitorError::LockBusy);
        };

        Ok(entries.iter().any(|entry| entry == ssid))
    }

    // Simulates contention from another task.
    #[cfg(test)]
    pub(crate) fn hold(&self) -> parking_lot::MutexGuard<'_, Vec<Identifier>> {
        self.entries.lock()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use proptest::prelude::*;

    use super::*;

    fn store(entries: &[&str], lock_wait: Duration) -> AllowListStore {
        let entries = entries
            .iter()
            .map(|ssid| Identifier::new(ssid).unwrap())
            .collect();
        AllowListStore::new(entries, lock_wait)
    }

    #[test]
    fn listed_ssid_is_authorized() {
        let store = store(&["AlphaNet-Pro", "SecureOps_24"], Duration::from_millis(100));

        let ssid = Identifier::new("SecureOps_24").unwrap();
        assert!(store.is_authorized(&ssid).unwrap());
    }

    #[test]
    fn match_is_case_sensitive_and_exact() {
        let store = store(&["AlphaNet-Pro"], Duration::from_millis(100));

        for candidate in ["alphanet-pro", "AlphaNet-Pro ", "AlphaNet", "AlphaNet-Pro2"] {
            let ssid = Identifier::new(candidate).unwrap();
            assert!(!store.is_authorized(&ssid).unwrap(), "{candidate:?} matched");
        }
    }

    #[test]
    fn empty_store_blocks_everything() {
        let store = store(&[], Duration::from_millis(100));
        let ssid = Identifier::new("AlphaNet-Pro").unwrap();

        assert!(!store.is_authorized(&ssid).unwrap());
    }

    #[test]
    fn held_lock_reports_busy_after_bounded_wait() {
        let store = store(&["AlphaNet-Pro"], Duration::from_millis(30));
        let ssid = Identifier::new("AlphaNet-Pro").unwrap();

        let _guard = store.hold();
        let started = Instant::now();
        let result = store.is_authorized(&ssid);

        assert!(matches!(result, Err(MonitorError::LockBusy)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    proptest! {
        #[test]
        fn membership_matches_list(
            entries in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 0..8),
            candidate in "[A-Za-z0-9_-]{1,12}",
        ) {
            let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
            let store = store(&refs, Duration::from_millis(100));

            for entry in &entries {
                let ssid = Identifier::new(entry).unwrap();
                prop_assert!(store.is_authorized(&ssid).unwrap());
            }

            let ssid = Identifier::new(&candidate).unwrap();
            prop_assert_eq!(store.is_authorized(&ssid).unwrap(), entries.contains(&candidate));
        }
    }
}
