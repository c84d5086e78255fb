use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::payload::{merge_payload, Payload};

/// The working state of one pipeline run: the payload plus the ordered,
/// append-only log of stage and ability events.
///
/// The state is moved by value through the stages; each stage receives the
/// current state and hands the next one on, so no stage can alias a payload
/// it no longer owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    pub run_id: Uuid,
    pub payload: Payload,
    pub logs: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PipelineState {
    pub fn new(initial: Payload) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            payload: initial,
            logs: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Shallow-merge ability result data into the payload (last write wins).
    pub fn merge(&mut self, data: Payload) {
        merge_payload(&mut self.payload, data);
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.payload.insert(key.into(), value);
    }

    /// Append one log entry. Entries are never removed or reordered.
    pub fn log(&mut self, entry: impl Into<String>) {
        self.logs.push(entry.into());
    }
}
