//! Wire shape of the structured task response and its fail-fast decoder.

use super::task::VerificationTask;
use crate::error::LlmError;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashSet;

pub const TASKS_SCHEMA_NAME: &str = "tasks";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskBatch {
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(rename = "taskDescription")]
    task_description: String,
}

/// `{ tasks: [ { id, title, taskDescription } ] }`, all strings, closed objects.
pub fn tasks_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string"},
                        "title": {"type": "string"},
                        "taskDescription": {"type": "string"}
                    },
                    "required": ["id", "title", "taskDescription"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["tasks"],
        "additionalProperties": false
    })
}

/// Decode assistant content into tasks, rejecting anything off-schema.
pub fn decode_tasks(content: &str) -> Result<Vec<VerificationTask>, LlmError> {
    let batch: TaskBatch =
        serde_json::from_str(content).map_err(|e| LlmError::Schema(e.to_string()))?;

    let mut seen = HashSet::with_capacity(batch.tasks.len());
    for record in &batch.tasks {
        if !seen.insert(record.id.as_str()) {
            return Err(LlmError::Schema(format!("duplicate task id {:?}", record.id)));
        }
    }

    Ok(batch
        .tasks
        .into_iter()
        .map(|record| VerificationTask::new(record.id, record.title, record.task_description))
        .collect())
}
