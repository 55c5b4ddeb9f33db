use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    InvalidTask(String),
    #[error("{0}")]
    InvalidDate(String),
    #[error("'{0}' is not a task number")]
    NotANumber(String),
    #[error("no task at index {index} (the list has {len})")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("malformed task record: {0}")]
    MalformedRecord(String),
    #[error("could not encode task: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Todo,
    Deadline,
    Event,
}

impl TaskKind {
    pub fn marker(self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline => 'D',
            TaskKind::Event => 'E',
        }
    }

    pub fn article(self) -> &'static str {
        match self {
            TaskKind::Event => "an",
            _ => "a",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Todo => write!(f, "todo"),
            TaskKind::Deadline => write!(f, "deadline"),
            TaskKind::Event => write!(f, "event"),
        }
    }
}

/// Point in time or time window attached to deadlines and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    At(NaiveDateTime),
    Between(NaiveDateTime, NaiveDateTime),
}

impl When {
    pub fn start(&self) -> NaiveDateTime {
        match *self {
            When::At(at) => at,
            When::Between(start, _) => start,
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        match *self {
            When::At(at) => at,
            When::Between(_, end) => end,
        }
    }

    fn sort_key(&self) -> (NaiveDateTime, bool, NaiveDateTime) {
        (self.start(), matches!(self, When::Between(..)), self.end())
    }
}

/// A tracked item. Only `completed` can change once a task exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    kind: TaskKind,
    description: String,
    completed: bool,
    when: Option<When>,
}

impl Task {
    /// Builds a task after checking that the description is non-empty and
    /// that `when` matches what `kind` requires.
    pub fn new(kind: TaskKind, description: &str, when: Option<When>) -> Result<Self, TaskError> {
        let description = crate::utils::validate_description(description, kind)?;

        match (kind, when) {
            (TaskKind::Todo, Some(_)) => {
                return Err(TaskError::InvalidTask(
                    "A todo does not take a date.".to_string(),
                ));
            }
            (TaskKind::Deadline | TaskKind::Event, None) => {
                return Err(TaskError::InvalidTask(format!(
                    "{} {kind} needs a date.",
                    capitalize(kind.article())
                )));
            }
            (TaskKind::Deadline, Some(When::Between(..))) => {
                return Err(TaskError::InvalidTask(
                    "A deadline has a single due date, not a range.".to_string(),
                ));
            }
            (_, Some(When::Between(start, end))) if end < start => {
                return Err(TaskError::InvalidTask(
                    "An event cannot end before it starts.".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Task {
            kind,
            description: description.to_string(),
            completed: false,
            when,
        })
    }

    pub fn todo(description: &str) -> Result<Self, TaskError> {
        Task::new(TaskKind::Todo, description, None)
    }

    pub fn deadline(description: &str, by: NaiveDateTime) -> Result<Self, TaskError> {
        Task::new(TaskKind::Deadline, description, Some(When::At(by)))
    }

    pub fn event(description: &str, when: When) -> Result<Self, TaskError> {
        Task::new(TaskKind::Event, description, Some(when))
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn when(&self) -> Option<When> {
        self.when
    }

    pub fn set_complete(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Display ordering: undated tasks first, then by start, point-in-time
    /// before ranges sharing a start, then by end.
    pub fn chronological_cmp(&self, other: &Task) -> Ordering {
        let lhs = self.when.map(|w| w.sort_key());
        let rhs = other.when.map(|w| w.sort_key());
        lhs.cmp(&rhs)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    Exit,
    Nothing,
    List,
    Find { query: String },
    MarkDone { task_number: String },
    Delete { task_number: String },
    Add { kind: TaskKind, args: String },
    Reset,
    Unknown,
}
