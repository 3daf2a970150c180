pub mod classroom;
pub mod course;
pub mod department;
pub mod faculty;
pub mod semester;
pub mod subject;
pub mod timetable;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ConsoleError;

pub use classroom::{Classroom, NewClassroomRequest};
pub use course::{Course, NewCourseRequest};
pub use department::{Department, NewDepartmentRequest};
pub use faculty::{Faculty, NewFacultyRequest};
pub use semester::{NewSemesterRequest, Semester};
pub use subject::{NewSubjectRequest, Subject};
pub use timetable::{Session, Timetable};

/// The six collections managed from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Departments,
    Courses,
    Semesters,
    Faculties,
    Classrooms,
    Subjects,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Departments,
        EntityKind::Courses,
        EntityKind::Semesters,
        EntityKind::Faculties,
        EntityKind::Classrooms,
        EntityKind::Subjects,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::Departments => "departments",
            EntityKind::Courses => "courses",
            EntityKind::Semesters => "semesters",
            EntityKind::Faculties => "faculties",
            EntityKind::Classrooms => "classrooms",
            EntityKind::Subjects => "subjects",
        }
    }

    /// Path of the collection on the remote API, e.g. `/departments/`.
    pub fn collection_path(self) -> String {
        format!("/{}/", self.slug())
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Departments => "Departments",
            EntityKind::Courses => "Courses",
            EntityKind::Semesters => "Semesters",
            EntityKind::Faculties => "Faculties",
            EntityKind::Classrooms => "Classrooms",
            EntityKind::Subjects => "Subjects",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Departments => "Department",
            EntityKind::Courses => "Course",
            EntityKind::Semesters => "Semester",
            EntityKind::Faculties => "Faculty",
            EntityKind::Classrooms => "Classroom",
            EntityKind::Subjects => "Subject",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EntityKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ConsoleError::UnknownPanel(s.to_string()))
    }
}

/// A record type served by one of the remote collections.
pub trait Entity: DeserializeOwned + Send + 'static {
    /// Body posted to create a record; the server assigns the id.
    type New: Serialize + Send + Sync;

    const KIND: EntityKind;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
}
