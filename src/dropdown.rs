use serde::Serialize;

use crate::cache::ReferenceSnapshot;
use crate::models::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Leading option with an empty value.
    pub fn blank(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn of<E: Entity>(record: &E) -> Self {
        Self::new(record.id().to_string(), record.name())
    }
}

/// Option list for one `<select>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub id: &'static str,
    /// Form field the selection is submitted as.
    pub field: &'static str,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownSet {
    pub course_dept: Dropdown,
    pub fac_dept: Dropdown,
    pub sem_course: Dropdown,
    pub sub_sem: Dropdown,
    pub sub_fac: Dropdown,
}

fn bind<E: Entity>(
    id: &'static str,
    field: &'static str,
    lead: SelectOption,
    records: &[E],
) -> Dropdown {
    let options = std::iter::once(lead)
        .chain(records.iter().map(SelectOption::of))
        .collect();
    Dropdown { id, field, options }
}

/// Projects the cached reference data into every foreign-key picker.
pub fn fill_dropdowns(snapshot: &ReferenceSnapshot) -> DropdownSet {
    DropdownSet {
        course_dept: bind(
            "course-dept",
            "department_id",
            SelectOption::blank("Select Department"),
            &snapshot.departments,
        ),
        fac_dept: bind(
            "fac-dept",
            "department_id",
            SelectOption::blank("Select Dept"),
            &snapshot.departments,
        ),
        sem_course: bind(
            "sem-course",
            "course_id",
            SelectOption::blank("Select Course"),
            &snapshot.courses,
        ),
        sub_sem: bind(
            "sub-sem",
            "semester_id",
            SelectOption::blank("Select Semester"),
            &snapshot.semesters,
        ),
        sub_fac: bind(
            "sub-fac",
            "faculty_id",
            SelectOption::blank("None / TBD"),
            &snapshot.faculties,
        ),
    }
}
