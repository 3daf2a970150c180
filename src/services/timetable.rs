use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::grid::{FilterDimension, GridFilter, GridMetadata};
use crate::models::Timetable;

/// Everything the grid page needs for one timetable.
#[derive(Debug, Clone)]
pub struct TimetablePage {
    pub timetable: Timetable,
    pub meta: GridMetadata,
}

/// Loads lookup metadata first, then the timetable itself.
pub async fn load_page(api: &ApiClient, id: i64) -> Result<TimetablePage, ApiError> {
    let meta = GridMetadata::load(api).await?;
    let timetable = api.timetable(id).await?;
    info!(
        "loaded timetable #{} ({} sessions, fitness {})",
        timetable.id,
        timetable.sessions.len(),
        timetable.fitness_score
    );
    Ok(TimetablePage { timetable, meta })
}

/// Picks the filter to render from the query string.
///
/// With no dimension the first semester is shown. A dimension without a
/// usable entity id falls back to the first entity of that dimension.
pub fn resolve_filter(meta: &GridMetadata, by: Option<&str>, entity: Option<&str>) -> Option<GridFilter> {
    let Some(dimension) = by.and_then(|raw| raw.parse::<FilterDimension>().ok()) else {
        return meta.first_filter(FilterDimension::Semester);
    };

    entity
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|id| GridFilter::new(dimension, id))
        .or_else(|| meta.first_filter(dimension))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::memory::MemoryTransport;
    use crate::models::{Classroom, Semester};
    use crate::toast::Toaster;

    fn meta() -> GridMetadata {
        GridMetadata::from_lists(
            vec![],
            vec![],
            vec![Classroom { id: 12, name: "LH-1".into(), capacity: 80, room_type: "Lecture".into() }],
            vec![
                Semester { id: 7, name: "Spring".into(), course_id: 1 },
                Semester { id: 5, name: "Fall".into(), course_id: 1 },
            ],
        )
    }

    #[test]
    fn default_filter_is_first_semester() {
        assert_eq!(resolve_filter(&meta(), None, None), Some(GridFilter::Semester(5)));
        assert_eq!(resolve_filter(&meta(), Some("bogus"), Some("3")), Some(GridFilter::Semester(5)));
    }

    #[test]
    fn explicit_filter_is_respected() {
        assert_eq!(
            resolve_filter(&meta(), Some("faculty"), Some("2")),
            Some(GridFilter::Faculty(2))
        );
    }

    #[test]
    fn missing_entity_falls_back_to_first_of_dimension() {
        assert_eq!(
            resolve_filter(&meta(), Some("classroom"), Some("")),
            Some(GridFilter::Classroom(12))
        );
        assert_eq!(resolve_filter(&meta(), Some("faculty"), None), None);
        assert_eq!(resolve_filter(&GridMetadata::default(), None, None), None);
    }

    #[tokio::test]
    async fn metadata_failure_skips_timetable_fetch() {
        let transport = Arc::new(MemoryTransport::new());
        transport.insert_timetable(json!({"id": 1, "fitness_score": 50.0, "sessions": []}));
        transport.fail("/classrooms/", 500, "db error");
        let api = ApiClient::new(transport.clone(), Toaster::new());

        let err = load_page(&api, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "db error");
        assert!(!transport.requests().iter().any(|r| r.starts_with("GET /timetables/")));
    }

    #[tokio::test]
    async fn page_loads_metadata_and_timetable() {
        let transport = Arc::new(MemoryTransport::new());
        transport.seed("/semesters/", vec![json!({"id": 5, "name": "Fall", "course_id": 1})]);
        transport.insert_timetable(json!({"id": 2, "fitness_score": 91.5, "sessions": []}));
        let api = ApiClient::new(transport, Toaster::new());

        let page = load_page(&api, 2).await.unwrap();
        assert_eq!(page.timetable.fitness_score, 91.5);
        assert_eq!(page.meta.semesters.len(), 1);
    }
}
