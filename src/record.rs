use crate::types::{Task, TaskError, TaskKind, When};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// On-disk shape of a task: one JSON object per save-file line.
/// `at` is set for point-in-time tasks, `from`/`to` for event ranges.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskRecord {
    #[serde(rename = "type")]
    kind: TaskKind,
    done: bool,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDateTime>,
}

impl TaskRecord {
    fn from_task(task: &Task) -> Self {
        let (at, from, to) = match task.when() {
            None => (None, None, None),
            Some(When::At(at)) => (Some(at), None, None),
            Some(When::Between(start, end)) => (None, Some(start), Some(end)),
        };

        TaskRecord {
            kind: task.kind(),
            done: task.is_completed(),
            description: task.description().to_string(),
            at,
            from,
            to,
        }
    }

    fn into_task(self) -> Result<Task, TaskError> {
        let when = match (self.at, self.from, self.to) {
            (None, None, None) => None,
            (Some(at), None, None) => Some(When::At(at)),
            (None, Some(start), Some(end)) => Some(When::Between(start, end)),
            _ => {
                return Err(TaskError::MalformedRecord(
                    "expected either 'at' or both 'from' and 'to'".to_string(),
                ));
            }
        };

        let mut task = Task::new(self.kind, &self.description, when)
            .map_err(|e| TaskError::MalformedRecord(e.to_string()))?;
        task.set_complete(self.done);
        Ok(task)
    }
}

impl Task {
    /// Single-line storage encoding; the inverse of [`Task::parse`].
    pub fn serialize(&self) -> Result<String, TaskError> {
        Ok(serde_json::to_string(&TaskRecord::from_task(self))?)
    }

    pub fn parse(line: &str) -> Result<Task, TaskError> {
        let record: TaskRecord = serde_json::from_str(line.trim())
            .map_err(|e| TaskError::MalformedRecord(e.to_string()))?;
        record.into_task()
    }
}
