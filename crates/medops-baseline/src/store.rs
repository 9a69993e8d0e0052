//! Versioned, process-wide baseline store.
//!
//! ```text
//!   readers ──► snapshot() ──► Arc<BaselineSnapshot>   (held for one call)
//!
//!   trainer ──► publish(next)                     ┐
//!                 ├── version = current + 1          │ save lock held
//!                 ├── swap Arc under write lock      │ (publishes persist in
//!                 └── persistence.save(next)         ┘  version order)
//! ```
//!
//! Readers never wait on the save lock; a failed save is reported and the
//! swap is kept.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{BaselineError, BaselineResult};
use crate::persistence::BaselinePersistence;
use crate::types::BaselineSnapshot;

pub struct BaselineStore {
    current: RwLock<Arc<BaselineSnapshot>>,
    /// Serializes publish (swap + save) so the file never goes backwards.
    save_lock: Mutex<()>,
    persistence: Box<dyn BaselinePersistence>,
}

impl BaselineStore {
    /// Load the persisted snapshot, or generate and persist the defaults.
    ///
    /// A failed save of freshly generated defaults is logged and tolerated;
    /// a persisted snapshot that cannot be read or validated is an error.
    pub fn open(persistence: impl BaselinePersistence + 'static) -> BaselineResult<Self> {
        let snapshot = match persistence.load()? {
            Some(mut snapshot) => {
                snapshot.validate()?;
                info!(version = snapshot.version, "baseline loaded");
                snapshot
            }
            None => {
                let snapshot = BaselineSnapshot::defaults();
                match persistence.save(&snapshot) {
                    Ok(()) => info!("baseline defaults generated and saved"),
                    Err(e) => warn!(error = %e, "baseline defaults generated but not saved"),
                }
                snapshot
            }
        };

        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            save_lock: Mutex::new(()),
            persistence: Box::new(persistence),
        })
    }

    /// A store seeded with `snapshot`, not touching persistence until the first publish.
    pub fn with_snapshot(
        snapshot: BaselineSnapshot,
        persistence: impl BaselinePersistence + 'static,
    ) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            save_lock: Mutex::new(()),
            persistence: Box::new(persistence),
        }
    }

    /// The current complete snapshot.
    pub fn snapshot(&self) -> Arc<BaselineSnapshot> {
        // The guarded value is a single Arc, so a poisoned lock still holds a whole snapshot.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Publish `next` as the new current snapshot and persist it.
    ///
    /// The version is assigned here. On a save failure the new snapshot stays
    /// published and `SaveFailed` is returned.
    pub fn publish(&self, mut next: BaselineSnapshot) -> BaselineResult<Arc<BaselineSnapshot>> {
        next.validate()?;

        let _saving = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let published = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            next.version = guard.version + 1;
            next.updated_at = Utc::now();
            let published = Arc::new(next);
            *guard = Arc::clone(&published);
            published
        };

        if let Err(e) = self.persistence.save(&published) {
            warn!(version = published.version, error = %e, "baseline published but not saved");
            return Err(BaselineError::SaveFailed {
                version: published.version,
                reason: e.to_string(),
            });
        }

        info!(version = published.version, "baseline published");
        Ok(published)
    }
}

impl std::fmt::Debug for BaselineStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaselineStore")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{InMemoryBaseline, JsonFileBaseline};
    use crate::types::{category, metric, NormalRange};
    use std::time::Duration;

    struct FailingPersistence;

    /// Records saved versions; saving version 1 is slow.
    struct SlowFirstSave {
        saved: Arc<Mutex<Vec<u64>>>,
    }

    impl BaselinePersistence for SlowFirstSave {
        fn save(&self, snapshot: &BaselineSnapshot) -> BaselineResult<()> {
            if snapshot.version == 1 {
                std::thread::sleep(Duration::from_millis(200));
            }
            self.saved.lock().unwrap().push(snapshot.version);
            Ok(())
        }

        fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
            Ok(None)
        }
    }

    impl BaselinePersistence for FailingPersistence {
        fn save(&self, _snapshot: &BaselineSnapshot) -> BaselineResult<()> {
            Err(BaselineError::PersistenceError("read-only volume".into()))
        }

        fn load(&self) -> BaselineResult<Option<BaselineSnapshot>> {
            Ok(None)
        }
    }

    fn with_bed_mean(base: &BaselineSnapshot, mean: f64) -> BaselineSnapshot {
        let mut next = base.clone();
        next.normal_ranges
            .entry(category::RESOURCE.to_string())
            .or_default()
            .insert(metric::BED_OCCUPANCY.to_string(), NormalRange::new(mean, 5.0));
        next
    }

    #[test]
    fn first_open_persists_defaults() {
        let dir = std::env::temp_dir().join(format!("medops_store_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let store = BaselineStore::open(JsonFileBaseline::in_dir(&dir)).unwrap();
        assert_eq!(store.version(), 0);
        assert!(dir.join("baseline.json").exists());

        // Reopen reads the file back.
        let reopened = BaselineStore::open(JsonFileBaseline::in_dir(&dir)).unwrap();
        assert_eq!(reopened.snapshot().seasonal_profiles.len(), 8);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn open_tolerates_failed_default_save() {
        let store = BaselineStore::open(FailingPersistence).unwrap();
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn publish_bumps_version_and_persists() {
        let persistence = InMemoryBaseline::new();
        let store = BaselineStore::open(persistence).unwrap();
        let next = with_bed_mean(&store.snapshot(), 70.0);
        let published = store.publish(next).unwrap();
        assert_eq!(published.version, 1);
        assert_eq!(
            store.snapshot().range(category::RESOURCE, metric::BED_OCCUPANCY).mean,
            70.0
        );
    }

    #[test]
    fn failed_save_keeps_published_version() {
        let store = BaselineStore::open(FailingPersistence).unwrap();
        let next = with_bed_mean(&store.snapshot(), 60.0);
        let err = store.publish(next).unwrap_err();
        assert!(matches!(err, BaselineError::SaveFailed { version: 1, .. }));
        assert_eq!(store.version(), 1);
        assert_eq!(
            store.snapshot().range(category::RESOURCE, metric::BED_OCCUPANCY).mean,
            60.0
        );
    }

    #[test]
    fn readers_keep_their_version() {
        let store = BaselineStore::open(InMemoryBaseline::new()).unwrap();
        let held = store.snapshot();
        store.publish(with_bed_mean(&held, 90.0)).unwrap();

        assert_eq!(held.version, 0);
        assert_eq!(held.range(category::RESOURCE, metric::BED_OCCUPANCY).mean, 75.0);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn invalid_profile_rejected_before_swap() {
        let store = BaselineStore::open(InMemoryBaseline::new()).unwrap();
        let mut next = (*store.snapshot()).clone();
        if let Some(p) = next.seasonal_profiles.get_mut("Influenza") {
            p.peak_multiplier = -1.0;
        }
        assert!(matches!(
            store.publish(next),
            Err(BaselineError::InvalidProfile { .. })
        ));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn overlapping_publishes_persist_in_version_order() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(BaselineStore::with_snapshot(
            BaselineSnapshot::defaults(),
            SlowFirstSave {
                saved: Arc::clone(&saved),
            },
        ));

        let first = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let next = with_bed_mean(&store.snapshot(), 70.0);
                store.publish(next).unwrap();
            })
        };
        std::thread::sleep(Duration::from_millis(50));
        let next = with_bed_mean(&store.snapshot(), 80.0);
        store.publish(next).unwrap();
        first.join().unwrap();

        let saved = saved.lock().unwrap().clone();
        assert_eq!(saved, vec![1, 2]);
        assert_eq!(saved.last().copied(), Some(store.version()));
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(BaselineStore::open(InMemoryBaseline::new()).unwrap());
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..20 {
                    let base = store.snapshot();
                    let mut next = with_bed_mean(&base, 50.0 + i as f64);
                    next.normal_ranges
                        .get_mut(category::RESOURCE)
                        .unwrap()
                        .insert(metric::STAFF_UTILIZATION.to_string(), NormalRange::new(50.0 + i as f64, 5.0));
                    store.publish(next).unwrap();
                }
            })
        };
        for _ in 0..200 {
            let snap = store.snapshot();
            if snap.version > 0 {
                let bed = snap.range(category::RESOURCE, metric::BED_OCCUPANCY).mean;
                let staff = snap.range(category::RESOURCE, metric::STAFF_UTILIZATION).mean;
                assert_eq!(bed, staff);
            }
        }
        writer.join().unwrap();
        assert_eq!(store.version(), 20);
    }
}
