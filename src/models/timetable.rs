use serde::{Deserialize, Serialize};

/// A generated schedule. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    pub id: i64,
    pub fitness_score: f64,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// One scheduled occurrence of a subject at a weekday and hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub id: Option<i64>,
    pub subject_id: i64,
    #[serde(default)]
    pub faculty_id: Option<i64>,
    pub classroom_id: i64,
    pub day_of_week: String,
    pub start_time: i64,
    #[serde(default)]
    pub end_time: Option<i64>,
}
