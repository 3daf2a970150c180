use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Course, Department, Faculty, Semester};

/// The four reference collections, exactly as last fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSnapshot {
    pub departments: Vec<Department>,
    pub courses: Vec<Course>,
    pub semesters: Vec<Semester>,
    pub faculties: Vec<Faculty>,
}

/// Issued at the start of a refresh; newer tickets win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Default)]
struct Slot {
    ticket: u64,
    snapshot: Arc<ReferenceSnapshot>,
}

/// Client-held copy of the reference data used to populate dropdowns.
///
/// Only ever replaced as a whole. A refresh that fails leaves the previous
/// snapshot in place, and a refresh that finishes after a newer one has
/// already been committed is discarded.
#[derive(Debug, Default)]
pub struct RelationalCache {
    issued: AtomicU64,
    slot: RwLock<Slot>,
}

impl RelationalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<ReferenceSnapshot> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Swaps in `snapshot` unless a newer ticket has already been committed.
    pub fn commit(&self, ticket: RefreshTicket, snapshot: ReferenceSnapshot) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 < slot.ticket {
            warn!(
                "discarding stale reference refresh #{} (already at #{})",
                ticket.0, slot.ticket
            );
            return false;
        }
        slot.ticket = ticket.0;
        slot.snapshot = Arc::new(snapshot);
        true
    }

    /// Fetches all four collections concurrently and commits them together.
    pub async fn refresh_all(&self, api: &ApiClient) -> Result<Arc<ReferenceSnapshot>, ApiError> {
        let ticket = self.begin_refresh();

        let fetched = tokio::try_join!(
            api.list::<Department>(),
            api.list::<Course>(),
            api.list::<Semester>(),
            api.list::<Faculty>(),
        );

        let (departments, courses, semesters, faculties) = match fetched {
            Ok(lists) => lists,
            Err(e) => {
                warn!("reference refresh #{} aborted, keeping previous data: {}", ticket.0, e);
                return Err(e);
            }
        };

        let committed = self.commit(
            ticket,
            ReferenceSnapshot {
                departments,
                courses,
                semesters,
                faculties,
            },
        );
        if committed {
            let snap = self.snapshot();
            info!(
                "reference data refreshed: {} departments, {} courses, {} semesters, {} faculties",
                snap.departments.len(),
                snap.courses.len(),
                snap.semesters.len(),
                snap.faculties.len()
            );
        }

        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::client::memory::MemoryTransport;
    use crate::toast::Toaster;

    fn seeded() -> Arc<MemoryTransport> {
        let transport = Arc::new(MemoryTransport::new());
        transport.seed("/departments/", vec![json!({"id": 1, "name": "Computing"})]);
        transport.seed(
            "/courses/",
            vec![json!({"id": 2, "name": "BSc CS", "department_id": 1})],
        );
        transport.seed(
            "/semesters/",
            vec![json!({"id": 5, "name": "Fall", "course_id": 2})],
        );
        transport.seed(
            "/faculties/",
            vec![json!({"id": 7, "name": "Dr. Rao", "department_id": 1, "max_hours_per_week": 18})],
        );
        transport
    }

    #[tokio::test]
    async fn refresh_replaces_all_four_collections() {
        let transport = seeded();
        let api = ApiClient::new(transport, Toaster::new());
        let cache = RelationalCache::new();

        let snap = cache.refresh_all(&api).await.unwrap();
        assert_eq!(snap.departments[0].name, "Computing");
        assert_eq!(snap.courses[0].department_id, 1);
        assert_eq!(snap.semesters[0].id, 5);
        assert_eq!(snap.faculties[0].max_hours_per_week, 18);
    }

    #[tokio::test]
    async fn any_failed_fetch_leaves_every_collection_untouched() {
        let transport = seeded();
        let api = ApiClient::new(transport.clone(), Toaster::new());
        let cache = RelationalCache::new();
        let before = cache.refresh_all(&api).await.unwrap();

        for failing in ["/departments/", "/courses/", "/semesters/", "/faculties/"] {
            transport.seed("/departments/", vec![json!({"id": 9, "name": "Changed"})]);
            transport.fail(failing, 500, "db error");

            let err = cache.refresh_all(&api).await.unwrap_err();
            assert_eq!(err.to_string(), "db error");
            assert_eq!(*cache.snapshot(), *before, "cache mutated when {} failed", failing);

            transport.recover(failing);
            transport.seed("/departments/", vec![json!({"id": 1, "name": "Computing"})]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_older_refresh_does_not_overwrite_newer_one() {
        let transport = seeded();
        transport.delay("/departments/", Duration::from_secs(5));
        let api = ApiClient::new(transport.clone(), Toaster::new());
        let cache = Arc::new(RelationalCache::new());

        let slow = {
            let cache = cache.clone();
            let api = api.clone();
            tokio::spawn(async move { cache.refresh_all(&api).await })
        };
        tokio::task::yield_now().await;

        transport.delay("/departments/", Duration::ZERO);
        transport.seed("/departments/", vec![json!({"id": 1, "name": "Renamed"})]);
        cache.refresh_all(&api).await.unwrap();

        slow.await.unwrap().unwrap();
        assert_eq!(cache.snapshot().departments[0].name, "Renamed");
    }

    #[test]
    fn commit_rejects_older_tickets() {
        let cache = RelationalCache::new();
        let older = cache.begin_refresh();
        let newer = cache.begin_refresh();

        assert!(cache.commit(newer, ReferenceSnapshot::default()));
        let stale = ReferenceSnapshot {
            departments: vec![Department { id: 1, name: "Old".to_string() }],
            ..Default::default()
        };
        assert!(!cache.commit(older, stale));
        assert!(cache.snapshot().departments.is_empty());
    }
}
