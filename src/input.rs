// Turns the argument text of `todo`/`deadline`/`event` into a Task
use crate::types::{Task, TaskError, TaskKind, When};
use crate::utils::{find_keyword, parse_range, parse_when, split_keyword, validate_description};
use chrono::{Local, NaiveDateTime, Timelike};

const DEADLINE_USAGE: &str = "USAGE: deadline <description> /by <date>";
const EVENT_USAGE: &str =
    "USAGE: event <description> /at <date> [to <date>]  or  event <description> /from <date> /to <date>";

impl Task {
    pub fn from_command(args: &str, kind: TaskKind) -> Result<Self, TaskError> {
        let now = Local::now().naive_local();
        Task::from_command_at(args, kind, now.with_nanosecond(0).unwrap_or(now))
    }

    /// Same as [`Task::from_command`] with relative dates resolved against `now`.
    pub fn from_command_at(args: &str, kind: TaskKind, now: NaiveDateTime) -> Result<Self, TaskError> {
        match kind {
            TaskKind::Todo => Task::todo(args),
            TaskKind::Deadline => {
                let (description, date) = split_or_usage(args, "/by", kind, DEADLINE_USAGE)?;
                Task::deadline(description, parse_when(date, now)?)
            }
            TaskKind::Event => {
                let (description, when) = parse_event_args(args, now)?;
                Task::event(description, when)
            }
        }
    }
}

/// Splits at `marker`, reporting an empty description before a missing date.
fn split_or_usage<'a>(
    args: &'a str,
    marker: &str,
    kind: TaskKind,
    usage: &str,
) -> Result<(&'a str, &'a str), TaskError> {
    match split_keyword(args, marker) {
        Some((description, rest)) => {
            validate_description(description, kind)?;
            Ok((description, rest))
        }
        None => {
            validate_description(args, kind)?;
            Err(TaskError::InvalidTask(format!(
                "This {kind} is missing its date.\n{usage}"
            )))
        }
    }
}

fn parse_event_args(args: &str, now: NaiveDateTime) -> Result<(&str, When), TaskError> {
    let kind = TaskKind::Event;

    if let Some(from_pos) = find_keyword(args, "/from")
        && find_keyword(args, "/at").is_none_or(|at_pos| from_pos < at_pos)
    {
        let (description, window) = split_or_usage(args, "/from", kind, EVENT_USAGE)?;
        let (start, end) = split_keyword(window, "/to").ok_or_else(|| {
            TaskError::InvalidTask(format!("An event given with /from also needs /to.\n{EVENT_USAGE}"))
        })?;
        return Ok((description, range(start, end, now)?));
    }

    let (description, window) = split_or_usage(args, "/at", kind, EVENT_USAGE)?;
    match split_keyword(window, " to ") {
        Some((start, end)) => Ok((description, range(start, end, now)?)),
        None => Ok((description, When::At(parse_when(window, now)?))),
    }
}

fn range(start: &str, end: &str, now: NaiveDateTime) -> Result<When, TaskError> {
    let (start, end) = parse_range(start, end, now)?;
    Ok(When::Between(start, end))
}
