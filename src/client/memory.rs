//! In-process stand-in for the remote timetable API.
//!
//! Serves the same paths as the real service from in-memory collections. Ids are
//! assigned on create, and failures or latency can be injected per path.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use super::{Transport, TransportResponse};
use crate::error::ApiError;
use crate::models::EntityKind;

#[derive(Debug, Default)]
struct MemoryState {
    collections: HashMap<String, Vec<Value>>,
    timetables: BTreeMap<i64, Value>,
    staged: Option<Value>,
    failures: HashMap<String, (u16, String)>,
    delays: HashMap<String, Duration>,
    requests: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the records served at a collection path such as `/subjects/`.
    pub fn seed(&self, path: &str, records: Vec<Value>) {
        self.state().collections.insert(path.to_string(), records);
    }

    pub fn records(&self, path: &str) -> Vec<Value> {
        self.state().collections.get(path).cloned().unwrap_or_default()
    }

    /// Stores a timetable under its `id` field.
    pub fn insert_timetable(&self, timetable: Value) {
        if let Some(id) = timetable.get("id").and_then(Value::as_i64) {
            self.state().timetables.insert(id, timetable);
        }
    }

    /// The next `POST /generate/` publishes this timetable under a fresh id.
    pub fn stage_generation(&self, timetable: Value) {
        self.state().staged = Some(timetable);
    }

    /// Every request to `path` answers with `status` and `body` until recovered.
    pub fn fail(&self, path: &str, status: u16, body: &str) {
        self.state()
            .failures
            .insert(path.to_string(), (status, body.to_string()));
    }

    pub fn recover(&self, path: &str) {
        self.state().failures.remove(path);
    }

    pub fn delay(&self, path: &str, latency: Duration) {
        self.state().delays.insert(path.to_string(), latency);
    }

    /// Requests seen so far, formatted as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }
}

fn reply(status: u16, body: String) -> TransportResponse {
    TransportResponse {
        status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    }
}

fn json_ok(value: Value) -> TransportResponse {
    reply(200, value.to_string())
}

fn detail(status: u16, message: &str) -> TransportResponse {
    reply(status, json!({ "detail": message }).to_string())
}

fn is_collection(path: &str) -> bool {
    EntityKind::ALL
        .iter()
        .any(|kind| kind.collection_path() == path)
}

impl MemoryState {
    fn route(&mut self, method: &Method, path: &str, body: Option<Value>) -> TransportResponse {
        if *method == Method::POST && path == "/generate/" {
            return self.generate();
        }

        if *method == Method::GET {
            if path == "/timetables/" {
                return json_ok(Value::Array(self.timetables.values().cloned().collect()));
            }
            if path == "/timetables/latest" {
                return match self.timetables.values().next_back() {
                    Some(tt) => json_ok(tt.clone()),
                    None => detail(404, "No timetables found"),
                };
            }
            if let Some(raw_id) = path.strip_prefix("/timetables/") {
                return match raw_id.parse::<i64>().ok().and_then(|id| self.timetables.get(&id)) {
                    Some(tt) => json_ok(tt.clone()),
                    None => detail(404, "Timetable not found"),
                };
            }
            if is_collection(path) {
                let records = self.collections.get(path).cloned().unwrap_or_default();
                return json_ok(Value::Array(records));
            }
        }

        if *method == Method::POST && is_collection(path) {
            let Some(Value::Object(mut record)) = body else {
                return detail(422, "Request body must be a JSON object");
            };
            let records = self.collections.entry(path.to_string()).or_default();
            let id = records
                .iter()
                .filter_map(|r| r.get("id").and_then(Value::as_i64))
                .max()
                .unwrap_or(0)
                + 1;
            record.insert("id".to_string(), json!(id));
            let record = Value::Object(record);
            records.push(record.clone());
            return json_ok(record);
        }

        detail(404, "Not Found")
    }

    fn generate(&mut self) -> TransportResponse {
        let Some(mut timetable) = self.staged.take() else {
            return detail(400, "No subjects found to schedule");
        };
        let id = self.timetables.keys().next_back().copied().unwrap_or(0) + 1;
        if let Value::Object(fields) = &mut timetable {
            fields.insert("id".to_string(), json!(id));
        }
        self.timetables.insert(id, timetable);
        json_ok(json!({
            "message": "Timetable generated successfully",
            "timetable_id": id
        }))
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, ApiError> {
        // The answer reflects the state at request time, even when delivery is delayed.
        let (response, latency) = {
            let mut state = self.state();
            state.requests.push(format!("{} {}", method, path));
            let failure = state.failures.get(path).cloned();
            let response = match failure {
                Some((status, text)) => reply(status, text),
                None => state.route(&method, path, body),
            };
            (response, state.delays.get(path).copied())
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        Ok(response)
    }
}
