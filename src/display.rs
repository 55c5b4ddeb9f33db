use crate::types::{Task, TaskKind, When};
use chrono::NaiveDateTime;
use colored::*;
use std::fmt;
use terminal_size::{Width, terminal_size};
use textwrap::{Options, wrap};

const WRAP_COLUMN: usize = 80;
const MIN_WRAP_WIDTH: usize = 20;
const DATE_FORMAT: &str = "%b %d %Y %H:%M";
const CHECKED: &str = "[X]";
const UNCHECKED: &str = "[ ]";
const PROMPT: &str = "> ";

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]{} {}",
            self.kind().marker(),
            format_status(self.is_completed()),
            self.description()
        )?;

        match self.when() {
            None => Ok(()),
            Some(When::At(at)) if self.kind() == TaskKind::Deadline => {
                write!(f, " (by: {})", format_date(at))
            }
            Some(When::At(at)) => write!(f, " (at: {})", format_date(at)),
            Some(When::Between(start, end)) => {
                write!(f, " (at: {} - {})", format_date(start), format_date(end))
            }
        }
    }
}

pub fn format_status(completed: bool) -> &'static str {
    if completed { CHECKED } else { UNCHECKED }
}

pub fn format_date(dt: NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// One `%2d. <task>` line per task, numbered from 1 in iteration order.
pub fn format_numbered<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    tasks
        .into_iter()
        .enumerate()
        .map(|(idx, task)| format!("{:>2}. {}\n", idx + 1, task))
        .collect()
}

/// Wraps each line of a reply to `width`, continuing wrapped lines at the
/// original line's indentation.
pub fn wrap_reply(text: &str, width: usize) -> String {
    let width = width.max(MIN_WRAP_WIDTH);

    text.lines()
        .map(|line| {
            let body = line.trim_start();
            let indent = &line[..line.len() - body.len()];
            let options = Options::new(width)
                .initial_indent(indent)
                .subsequent_indent(indent);
            wrap(body, options).join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn reply_width() -> usize {
    term_width().min(WRAP_COLUMN)
}

pub fn format_prompt() -> ColoredString {
    PROMPT.bright_black()
}

pub fn format_warning(message: &str) -> ColoredString {
    message.bright_yellow()
}

pub fn format_error(message: &str) -> ColoredString {
    message.bright_red()
}

fn term_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(WRAP_COLUMN)
}
