use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub room_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassroomRequest {
    pub name: String,
    pub capacity: i64,
    pub room_type: String,
}

impl Entity for Classroom {
    type New = NewClassroomRequest;
    const KIND: EntityKind = EntityKind::Classrooms;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
