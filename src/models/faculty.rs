use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    #[serde(default = "default_max_hours")]
    pub max_hours_per_week: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFacultyRequest {
    pub name: String,
    pub department_id: i64,
    pub max_hours_per_week: i64,
}

/// Server-side default when the field is omitted.
fn default_max_hours() -> i64 {
    40
}

impl Entity for Faculty {
    type New = NewFacultyRequest;
    const KIND: EntityKind = EntityKind::Faculties;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
