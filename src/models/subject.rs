use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credit_hours: i64,
    pub weekly_frequency: i64,
    pub semester_id: i64,
    pub faculty_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubjectRequest {
    pub name: String,
    pub code: String,
    pub credit_hours: i64,
    pub weekly_frequency: i64,
    pub semester_id: i64,
    /// Serialized as `null` when unassigned.
    pub faculty_id: Option<i64>,
}

impl Entity for Subject {
    type New = NewSubjectRequest;
    const KIND: EntityKind = EntityKind::Subjects;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
