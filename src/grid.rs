//! Weekly schedule grid: lays a timetable's flat session list onto a
//! weekday × hour matrix for one semester, faculty member or classroom.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;

use crate::client::ApiClient;
use crate::dropdown::SelectOption;
use crate::error::ApiError;
use crate::models::{Classroom, Entity, Faculty, Semester, Session, Subject, Timetable};

pub const DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const START_HOUR: u32 = 9;
/// Exclusive.
pub const END_HOUR: u32 = 17;

pub const UNKNOWN: &str = "Unknown";
pub const TBD: &str = "TBD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Semester,
    Faculty,
    Classroom,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::Semester,
        FilterDimension::Faculty,
        FilterDimension::Classroom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterDimension::Semester => "semester",
            FilterDimension::Faculty => "faculty",
            FilterDimension::Classroom => "classroom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Semester => "Semester",
            FilterDimension::Faculty => "Faculty",
            FilterDimension::Classroom => "Classroom",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterDimension::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown filter: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFilter {
    Semester(i64),
    Faculty(i64),
    Classroom(i64),
}

impl GridFilter {
    pub fn new(dimension: FilterDimension, id: i64) -> Self {
        match dimension {
            FilterDimension::Semester => GridFilter::Semester(id),
            FilterDimension::Faculty => GridFilter::Faculty(id),
            FilterDimension::Classroom => GridFilter::Classroom(id),
        }
    }

    pub fn dimension(self) -> FilterDimension {
        match self {
            GridFilter::Semester(_) => FilterDimension::Semester,
            GridFilter::Faculty(_) => FilterDimension::Faculty,
            GridFilter::Classroom(_) => FilterDimension::Classroom,
        }
    }

    pub fn entity_id(self) -> i64 {
        match self {
            GridFilter::Semester(id) | GridFilter::Faculty(id) | GridFilter::Classroom(id) => id,
        }
    }
}

/// Lookup tables used to resolve the ids inside a timetable's sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridMetadata {
    pub subjects: BTreeMap<i64, Subject>,
    pub faculties: BTreeMap<i64, Faculty>,
    pub classrooms: BTreeMap<i64, Classroom>,
    pub semesters: BTreeMap<i64, Semester>,
}

fn by_id<E: Entity>(records: Vec<E>) -> BTreeMap<i64, E> {
    records.into_iter().map(|r| (r.id(), r)).collect()
}

fn options_of<E: Entity>(records: &BTreeMap<i64, E>) -> Vec<SelectOption> {
    records.values().map(SelectOption::of).collect()
}

impl GridMetadata {
    pub fn from_lists(
        subjects: Vec<Subject>,
        faculties: Vec<Faculty>,
        classrooms: Vec<Classroom>,
        semesters: Vec<Semester>,
    ) -> Self {
        Self {
            subjects: by_id(subjects),
            faculties: by_id(faculties),
            classrooms: by_id(classrooms),
            semesters: by_id(semesters),
        }
    }

    /// Fetches the four lookup collections concurrently; any failure aborts the load.
    pub async fn load(api: &ApiClient) -> Result<Self, ApiError> {
        let (subjects, faculties, classrooms, semesters) = tokio::try_join!(
            api.list::<Subject>(),
            api.list::<Faculty>(),
            api.list::<Classroom>(),
            api.list::<Semester>(),
        )?;
        Ok(Self::from_lists(subjects, faculties, classrooms, semesters))
    }

    /// Entities selectable for a filter dimension, in id order.
    pub fn filter_options(&self, dimension: FilterDimension) -> Vec<SelectOption> {
        match dimension {
            FilterDimension::Semester => options_of(&self.semesters),
            FilterDimension::Faculty => options_of(&self.faculties),
            FilterDimension::Classroom => options_of(&self.classrooms),
        }
    }

    /// First entity of `dimension`, if it has any.
    pub fn first_filter(&self, dimension: FilterDimension) -> Option<GridFilter> {
        let id = match dimension {
            FilterDimension::Semester => self.semesters.keys().next(),
            FilterDimension::Faculty => self.faculties.keys().next(),
            FilterDimension::Classroom => self.classrooms.keys().next(),
        };
        id.map(|id| GridFilter::new(dimension, *id))
    }
}

/// Sessions belonging to the filter target. Sessions whose subject is unknown are dropped.
pub fn filter_sessions<'a>(
    timetable: &'a Timetable,
    meta: &GridMetadata,
    filter: GridFilter,
) -> Vec<&'a Session> {
    timetable
        .sessions
        .iter()
        .filter(|session| {
            let Some(subject) = meta.subjects.get(&session.subject_id) else {
                return false;
            };
            match filter {
                GridFilter::Semester(id) => subject.semester_id == id,
                GridFilter::Faculty(id) => session.faculty_id == Some(id),
                GridFilter::Classroom(id) => session.classroom_id == id,
            }
        })
        .collect()
}

fn slot_of(session: &Session) -> Option<(usize, usize)> {
    let hour = u32::try_from(session.start_time).ok()?;
    if !(START_HOUR..END_HOUR).contains(&hour) {
        return None;
    }
    let day = DAYS.iter().position(|d| *d == session.day_of_week)?;
    Some(((hour - START_HOUR) as usize, day))
}

/// Hour-by-day matrix of sessions. Later sessions overwrite earlier ones in the same slot.
pub fn assign_slots<'a>(sessions: &[&'a Session]) -> Vec<[Option<&'a Session>; 5]> {
    let mut grid = vec![[None; 5]; (END_HOUR - START_HOUR) as usize];
    for session in sessions {
        if let Some((row, day)) = slot_of(session) {
            grid[row][day] = Some(*session);
        }
    }
    grid
}

fn clock(hour: u32) -> String {
    NaiveTime::from_hms_opt(hour % 24, 0, 0)
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// `9` becomes `"9:00 AM - 10:00 AM"`.
pub fn hour_label(hour: u32) -> String {
    format!("{} - {}", clock(hour), clock(hour + 1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCard {
    pub subject: String,
    /// Hidden when filtering by faculty.
    pub faculty: Option<String>,
    /// Hidden when filtering by classroom.
    pub classroom: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Empty,
    Card(SessionCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub hour: u32,
    pub label: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub filter: GridFilter,
    /// True when any session matched the filter, even if none landed in a visible slot.
    pub found: bool,
    pub rows: Vec<GridRow>,
}

impl GridView {
    pub fn cell(&self, hour: u32, day: &str) -> Option<&GridCell> {
        let day = DAYS.iter().position(|d| *d == day)?;
        self.rows.iter().find(|r| r.hour == hour)?.cells.get(day)
    }

    pub fn populated(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| matches!(c, GridCell::Card(_)))
            .count()
    }
}

fn card(session: &Session, meta: &GridMetadata, filter: GridFilter) -> SessionCard {
    let subject = meta
        .subjects
        .get(&session.subject_id)
        .map_or(UNKNOWN, |s| s.name.as_str());
    let faculty = session
        .faculty_id
        .and_then(|id| meta.faculties.get(&id))
        .map_or(TBD, |f| f.name.as_str());
    let classroom = meta
        .classrooms
        .get(&session.classroom_id)
        .map_or(UNKNOWN, |c| c.name.as_str());

    SessionCard {
        subject: subject.to_string(),
        faculty: (filter.dimension() != FilterDimension::Faculty).then(|| faculty.to_string()),
        classroom: (filter.dimension() != FilterDimension::Classroom)
            .then(|| classroom.to_string()),
    }
}

/// Builds the grid view for one filter. Pure: same inputs, same grid.
pub fn render_grid(timetable: &Timetable, meta: &GridMetadata, filter: GridFilter) -> GridView {
    let sessions = filter_sessions(timetable, meta, filter);
    let slots = assign_slots(&sessions);

    let rows = (START_HOUR..END_HOUR)
        .zip(slots)
        .map(|(hour, days)| GridRow {
            hour,
            label: hour_label(hour),
            cells: days
                .iter()
                .map(|slot| match slot {
                    Some(session) => GridCell::Card(card(session, meta, filter)),
                    None => GridCell::Empty,
                })
                .collect(),
        })
        .collect();

    GridView {
        filter,
        found: !sessions.is_empty(),
        rows,
    }
}
