use std::collections::HashMap;

use serde::Deserialize;

use crate::client::ApiClient;
use crate::dropdown::{Dropdown, DropdownSet};
use crate::error::{ApiError, ConsoleError};
use crate::models::*;

/// Raw values of a submitted create form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Submitted value, or `""` when the field was absent.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    fn required(&self, field: &str, label: &str) -> Result<String, ConsoleError> {
        let value = self.get(field).trim();
        if value.is_empty() {
            return Err(ConsoleError::Validation(format!("{} is required", label)));
        }
        Ok(value.to_string())
    }

    fn integer(&self, field: &str, label: &str) -> Result<i64, ConsoleError> {
        self.required(field, label)?
            .parse::<i64>()
            .map_err(|_| ConsoleError::Validation(format!("{} must be a whole number", label)))
    }

    /// Empty selection means "no reference".
    fn optional_integer(&self, field: &str, label: &str) -> Result<Option<i64>, ConsoleError> {
        if self.get(field).trim().is_empty() {
            return Ok(None);
        }
        self.integer(field, label).map(Some)
    }
}

/// A validated create request for one of the six collections.
#[derive(Debug, Clone)]
pub enum NewEntity {
    Department(NewDepartmentRequest),
    Course(NewCourseRequest),
    Semester(NewSemesterRequest),
    Faculty(NewFacultyRequest),
    Classroom(NewClassroomRequest),
    Subject(NewSubjectRequest),
}

impl NewEntity {
    pub fn parse(kind: EntityKind, form: &FormValues) -> Result<Self, ConsoleError> {
        let new = match kind {
            EntityKind::Departments => NewEntity::Department(NewDepartmentRequest {
                name: form.required("name", "Name")?,
            }),
            EntityKind::Courses => NewEntity::Course(NewCourseRequest {
                name: form.required("name", "Name")?,
                department_id: form.integer("department_id", "Department")?,
            }),
            EntityKind::Semesters => NewEntity::Semester(NewSemesterRequest {
                name: form.required("name", "Name")?,
                course_id: form.integer("course_id", "Course")?,
            }),
            EntityKind::Faculties => NewEntity::Faculty(NewFacultyRequest {
                name: form.required("name", "Name")?,
                department_id: form.integer("department_id", "Department")?,
                max_hours_per_week: form.integer("max_hours_per_week", "Max hours per week")?,
            }),
            EntityKind::Classrooms => NewEntity::Classroom(NewClassroomRequest {
                name: form.required("name", "Name")?,
                capacity: form.integer("capacity", "Capacity")?,
                room_type: form.required("room_type", "Room type")?,
            }),
            EntityKind::Subjects => NewEntity::Subject(NewSubjectRequest {
                name: form.required("name", "Name")?,
                code: form.required("code", "Code")?,
                credit_hours: form.integer("credit_hours", "Credit hours")?,
                weekly_frequency: form.integer("weekly_frequency", "Weekly frequency")?,
                semester_id: form.integer("semester_id", "Semester")?,
                faculty_id: form.optional_integer("faculty_id", "Faculty")?,
            }),
        };
        Ok(new)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            NewEntity::Department(_) => EntityKind::Departments,
            NewEntity::Course(_) => EntityKind::Courses,
            NewEntity::Semester(_) => EntityKind::Semesters,
            NewEntity::Faculty(_) => EntityKind::Faculties,
            NewEntity::Classroom(_) => EntityKind::Classrooms,
            NewEntity::Subject(_) => EntityKind::Subjects,
        }
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<(), ApiError> {
        match self {
            NewEntity::Department(req) => api.create::<Department>(req).await.map(drop),
            NewEntity::Course(req) => api.create::<Course>(req).await.map(drop),
            NewEntity::Semester(req) => api.create::<Semester>(req).await.map(drop),
            NewEntity::Faculty(req) => api.create::<Faculty>(req).await.map(drop),
            NewEntity::Classroom(req) => api.create::<Classroom>(req).await.map(drop),
            NewEntity::Subject(req) => api.create::<Subject>(req).await.map(drop),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text { placeholder: &'static str },
    Number { min: i64 },
    Select(Dropdown),
}

/// One input of a create form, carrying the value to show in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub input: FieldInput,
    pub value: String,
}

fn field(name: &'static str, label: &'static str, input: FieldInput, values: &FormValues) -> FormField {
    FormField {
        name,
        label,
        required: true,
        input,
        value: values.get(name).to_string(),
    }
}

fn text(placeholder: &'static str) -> FieldInput {
    FieldInput::Text { placeholder }
}

fn number(min: i64) -> FieldInput {
    FieldInput::Number { min }
}

/// Inputs of the create form for `kind`, with foreign keys bound to `dropdowns`.
pub fn form_fields(kind: EntityKind, dropdowns: &DropdownSet, values: &FormValues) -> Vec<FormField> {
    let select = |d: &Dropdown| FieldInput::Select(d.clone());
    match kind {
        EntityKind::Departments => vec![field("name", "Name", text("e.g. Computer Science"), values)],
        EntityKind::Courses => vec![
            field("name", "Name", text("e.g. B.Tech CSE"), values),
            field("department_id", "Department", select(&dropdowns.course_dept), values),
        ],
        EntityKind::Semesters => vec![
            field("name", "Name", text("e.g. Semester 3"), values),
            field("course_id", "Course", select(&dropdowns.sem_course), values),
        ],
        EntityKind::Faculties => vec![
            field("name", "Name", text("e.g. Dr. A. Sharma"), values),
            field("department_id", "Department", select(&dropdowns.fac_dept), values),
            field("max_hours_per_week", "Max hours per week", number(1), values),
        ],
        EntityKind::Classrooms => vec![
            field("name", "Name", text("e.g. LH-101"), values),
            field("capacity", "Capacity", number(1), values),
            field("room_type", "Room type", text("Lecture / Lab"), values),
        ],
        EntityKind::Subjects => vec![
            field("name", "Name", text("e.g. Operating Systems"), values),
            field("code", "Code", text("e.g. CS301"), values),
            field("credit_hours", "Credit hours", number(1), values),
            field("weekly_frequency", "Weekly frequency", number(1), values),
            field("semester_id", "Semester", select(&dropdowns.sub_sem), values),
            FormField {
                required: false,
                ..field("faculty_id", "Faculty", select(&dropdowns.sub_fac), values)
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ReferenceSnapshot;
    use crate::dropdown::fill_dropdowns;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        FormValues::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn subject_with_empty_faculty_becomes_null() {
        let values = form(&[
            ("name", "Operating Systems"),
            ("code", "CS301"),
            ("credit_hours", "4"),
            ("weekly_frequency", "3"),
            ("semester_id", "5"),
            ("faculty_id", ""),
        ]);
        let NewEntity::Subject(req) = NewEntity::parse(EntityKind::Subjects, &values).unwrap() else {
            panic!("expected subject");
        };
        assert_eq!(req.faculty_id, None);
        assert_eq!(req.semester_id, 5);
        assert_eq!(
            serde_json::to_value(&req).unwrap()["faculty_id"],
            serde_json::Value::Null
        );
    }

    #[test]
    fn integer_fields_are_parsed() {
        let values = form(&[("name", "LH-1"), ("capacity", " 60 "), ("room_type", "Lecture")]);
        let NewEntity::Classroom(req) = NewEntity::parse(EntityKind::Classrooms, &values).unwrap() else {
            panic!("expected classroom");
        };
        assert_eq!(req.capacity, 60);
    }

    #[test]
    fn missing_and_malformed_fields_are_validation_errors() {
        let err = NewEntity::parse(EntityKind::Departments, &form(&[("name", "  ")])).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");

        let err = NewEntity::parse(
            EntityKind::Courses,
            &form(&[("name", "BSc"), ("department_id", "")]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Department is required");

        let err = NewEntity::parse(
            EntityKind::Faculties,
            &form(&[("name", "Dr. X"), ("department_id", "1"), ("max_hours_per_week", "lots")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(msg) if msg == "Max hours per week must be a whole number"));
    }

    #[test]
    fn form_fields_keep_submitted_values() {
        let dropdowns = fill_dropdowns(&ReferenceSnapshot::default());
        let values = form(&[("name", "Semester 1"), ("course_id", "3")]);
        let fields = form_fields(EntityKind::Semesters, &dropdowns, &values);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value, "Semester 1");
        assert_eq!(fields[1].value, "3");
        assert!(matches!(&fields[1].input, FieldInput::Select(d) if d.id == "sem-course"));
    }

    #[test]
    fn subject_faculty_field_is_optional() {
        let dropdowns = fill_dropdowns(&ReferenceSnapshot::default());
        let fields = form_fields(EntityKind::Subjects, &dropdowns, &FormValues::default());
        let faculty = fields.iter().find(|f| f.name == "faculty_id").unwrap();
        assert!(!faculty.required);
        assert!(fields.iter().filter(|f| f.name != "faculty_id").all(|f| f.required));
    }
}
