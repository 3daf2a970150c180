use serde::{Deserialize, Serialize};

/// Reply to `POST /generate/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub message: String,
    pub timetable_id: i64,
}
