use tracing::{info, warn};

use crate::cache::RelationalCache;
use crate::client::ApiClient;
use crate::error::{ApiError, ConsoleError};
use crate::models::*;
use crate::services::form::{FormValues, NewEntity};
use crate::toast::ToastKind;

pub const NO_RECORDS: &str = "No records found.";
pub const LOAD_FAILED: &str = "Error loading data";
/// Column span of the placeholder rows.
pub const PLACEHOLDER_COLSPAN: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Muted,
    Strong,
    Mono,
    Badge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    fn muted(text: impl ToString) -> Self {
        Self { text: text.to_string(), style: CellStyle::Muted }
    }

    fn strong(text: impl ToString) -> Self {
        Self { text: text.to_string(), style: CellStyle::Strong }
    }

    fn mono(text: impl ToString) -> Self {
        Self { text: text.to_string(), style: CellStyle::Mono }
    }

    fn badge(text: impl ToString) -> Self {
        Self { text: text.to_string(), style: CellStyle::Badge }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Records(Vec<Row>),
    /// Collection fetched but empty.
    Empty,
    /// Fetch failed; the error has already been toasted.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub kind: EntityKind,
    pub headers: &'static [&'static str],
    pub body: ListBody,
}

impl ListView {
    pub fn rows(&self) -> &[Row] {
        match &self.body {
            ListBody::Records(rows) => rows,
            _ => &[],
        }
    }
}

/// Column layout of one collection's list view.
pub trait RowTemplate: Entity {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Row;
}

impl RowTemplate for Department {
    const HEADERS: &'static [&'static str] = &["ID", "Name"];

    fn row(&self) -> Row {
        Row { cells: vec![Cell::muted(self.id), Cell::strong(&self.name)] }
    }
}

impl RowTemplate for Course {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Department"];

    fn row(&self) -> Row {
        Row {
            cells: vec![Cell::muted(self.id), Cell::strong(&self.name), Cell::muted(self.department_id)],
        }
    }
}

impl RowTemplate for Semester {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Course"];

    fn row(&self) -> Row {
        Row {
            cells: vec![Cell::muted(self.id), Cell::strong(&self.name), Cell::muted(self.course_id)],
        }
    }
}

impl RowTemplate for Classroom {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Capacity", "Type"];

    fn row(&self) -> Row {
        Row {
            cells: vec![
                Cell::muted(self.id),
                Cell::strong(&self.name),
                Cell::muted(self.capacity),
                Cell::badge(&self.room_type),
            ],
        }
    }
}

impl RowTemplate for Faculty {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Department", "Load"];

    fn row(&self) -> Row {
        Row {
            cells: vec![
                Cell::muted(self.id),
                Cell::strong(&self.name),
                Cell::muted(self.department_id),
                Cell::muted(format!("{}h/week", self.max_hours_per_week)),
            ],
        }
    }
}

impl RowTemplate for Subject {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Code", "Load", "Links"];

    fn row(&self) -> Row {
        let faculty = self
            .faculty_id
            .map_or_else(|| "TBD".to_string(), |id| id.to_string());
        Row {
            cells: vec![
                Cell::muted(self.id),
                Cell::strong(&self.name),
                Cell::mono(&self.code),
                Cell::muted(format!("{} cr / {}x wk", self.credit_hours, self.weekly_frequency)),
                Cell::muted(format!("Sem: {} | Fac: {}", self.semester_id, faculty)),
            ],
        }
    }
}

async fn rows_of<E: RowTemplate>(api: &ApiClient) -> Result<Vec<Row>, ApiError> {
    Ok(api.list::<E>().await?.iter().map(E::row).collect())
}

pub fn headers(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Departments => Department::HEADERS,
        EntityKind::Courses => Course::HEADERS,
        EntityKind::Semesters => Semester::HEADERS,
        EntityKind::Faculties => Faculty::HEADERS,
        EntityKind::Classrooms => Classroom::HEADERS,
        EntityKind::Subjects => Subject::HEADERS,
    }
}

/// Fetches the collection afresh and lays it out as table rows.
pub async fn list(api: &ApiClient, kind: EntityKind) -> ListView {
    let fetched = match kind {
        EntityKind::Departments => rows_of::<Department>(api).await,
        EntityKind::Courses => rows_of::<Course>(api).await,
        EntityKind::Semesters => rows_of::<Semester>(api).await,
        EntityKind::Faculties => rows_of::<Faculty>(api).await,
        EntityKind::Classrooms => rows_of::<Classroom>(api).await,
        EntityKind::Subjects => rows_of::<Subject>(api).await,
    };

    let body = match fetched {
        Ok(rows) if rows.is_empty() => ListBody::Empty,
        Ok(rows) => ListBody::Records(rows),
        Err(e) => {
            warn!("failed to load {}: {}", kind, e);
            ListBody::Failed
        }
    };

    ListView {
        kind,
        headers: headers(kind),
        body,
    }
}

/// Validates and submits a create form, then refreshes the reference cache.
///
/// Nothing is changed locally until the server has accepted the record.
pub async fn create(
    api: &ApiClient,
    cache: &RelationalCache,
    kind: EntityKind,
    form: &FormValues,
) -> Result<(), ConsoleError> {
    let new = NewEntity::parse(kind, form)?;
    new.submit(api).await?;

    info!("created {} record", new.kind());
    api.toaster()
        .notify(format!("{} added successfully", kind.singular()), ToastKind::Success);

    if let Err(e) = cache.refresh_all(api).await {
        warn!("reference refresh after creating {} failed: {}", kind, e);
    }
    Ok(())
}

/// Sidebar entry for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub kind: EntityKind,
    pub href: String,
    pub selected: bool,
}

pub fn sidebar(selected: EntityKind) -> Vec<Tab> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| Tab {
            kind,
            href: format!("/panels/{}", kind.slug()),
            selected: kind == selected,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::memory::MemoryTransport;
    use crate::toast::Toaster;

    fn api_over(transport: Arc<MemoryTransport>) -> ApiClient {
        ApiClient::new(transport, Toaster::new())
    }

    #[test]
    fn subject_row_shows_tbd_for_missing_faculty() {
        let subject = Subject {
            id: 3,
            name: "Networks".into(),
            code: "CS320".into(),
            credit_hours: 4,
            weekly_frequency: 3,
            semester_id: 5,
            faculty_id: None,
        };
        let row = subject.row();
        assert_eq!(row.cells[2], Cell::mono("CS320"));
        assert_eq!(row.cells[3].text, "4 cr / 3x wk");
        assert_eq!(row.cells[4].text, "Sem: 5 | Fac: TBD");
    }

    #[test]
    fn faculty_and_classroom_rows_follow_their_templates() {
        let faculty = Faculty { id: 1, name: "Dr. Rao".into(), department_id: 2, max_hours_per_week: 18 };
        assert_eq!(faculty.row().cells[3].text, "18h/week");

        let room = Classroom { id: 4, name: "Lab 2".into(), capacity: 30, room_type: "Lab".into() };
        assert_eq!(room.row().cells[3], Cell::badge("Lab"));
        assert_eq!(room.row().cells.len(), Classroom::HEADERS.len());
    }

    #[tokio::test]
    async fn list_renders_one_row_per_record() {
        let transport = Arc::new(MemoryTransport::new());
        transport.seed(
            "/courses/",
            vec![
                json!({"id": 1, "name": "BSc CS", "department_id": 2}),
                json!({"id": 2, "name": "MSc CS", "department_id": 2}),
            ],
        );
        let view = list(&api_over(transport), EntityKind::Courses).await;

        assert_eq!(view.headers, &["ID", "Name", "Department"]);
        assert_eq!(view.rows().len(), 2);
        assert_eq!(view.rows()[1].cells[1].text, "MSc CS");
    }

    #[tokio::test]
    async fn empty_and_failed_lists_use_placeholders() {
        let transport = Arc::new(MemoryTransport::new());
        let api = api_over(transport.clone());
        assert_eq!(list(&api, EntityKind::Classrooms).await.body, ListBody::Empty);

        transport.fail("/classrooms/", 500, "db error");
        assert_eq!(list(&api, EntityKind::Classrooms).await.body, ListBody::Failed);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let transport = Arc::new(MemoryTransport::new());
        let api = api_over(transport.clone());
        let cache = RelationalCache::new();

        let err = create(&api, &cache, EntityKind::Courses, &FormValues::from_pairs([("name", "BSc")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn successful_create_notifies_and_refreshes_cache() {
        let transport = Arc::new(MemoryTransport::new());
        let api = api_over(transport.clone());
        let cache = RelationalCache::new();

        create(&api, &cache, EntityKind::Departments, &FormValues::from_pairs([("name", "Physics")]))
            .await
            .unwrap();

        assert_eq!(cache.snapshot().departments[0].name, "Physics");
        let toasts = api.toaster().active();
        assert_eq!(toasts[0].message, "Department added successfully");
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(transport.requests()[0], "POST /departments/");
    }

    #[tokio::test]
    async fn rejected_create_surfaces_server_message() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail("/departments/", 400, "Department already exists");
        let api = api_over(transport.clone());
        let cache = RelationalCache::new();

        let err = create(&api, &cache, EntityKind::Departments, &FormValues::from_pairs([("name", "Physics")]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Department already exists");
        assert!(transport.records("/departments/").is_empty());
    }

    #[test]
    fn sidebar_highlights_only_the_selected_panel() {
        let tabs = sidebar(EntityKind::Faculties);
        assert_eq!(tabs.len(), 6);
        let selected: Vec<_> = tabs.iter().filter(|t| t.selected).map(|t| t.kind).collect();
        assert_eq!(selected, vec![EntityKind::Faculties]);
        assert_eq!(tabs[3].href, "/panels/faculties");
    }
}
