use crate::display::format_numbered;
use crate::task_list::TaskList;
use crate::types::{Task, TaskCommand, TaskError, TaskKind};
use tracing::debug;

pub const FAREWELL: &str = "Goodbye!";
pub const CLEARED: &str = "Cleared";
pub const NOT_UNDERSTOOD: &str = "I did not understand, sorry!";
pub const NO_TASK_AT_INDEX: &str = "There is no task at that index.";
pub const TASK_NUMBER_USAGE: &str = "Which task are you interacting with?\n\
USAGE:\n\
{action} {task number}\n\
Example: > done 4\n         > delete 2\n\
Try the `list` command to see the list of tasks";

/// What the presentation layer gets back for one line of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    /// Set by `bye`; the caller shows `text` and then stops.
    pub exit: bool,
    /// The task list changed and should be saved.
    pub modified: bool,
}

impl Response {
    fn reply(text: impl Into<String>) -> Self {
        Response {
            text: text.into(),
            ..Response::default()
        }
    }

    fn changed(text: impl Into<String>) -> Self {
        Response {
            text: text.into(),
            modified: true,
            ..Response::default()
        }
    }

    fn exit(text: impl Into<String>) -> Self {
        Response {
            text: text.into(),
            exit: true,
            ..Response::default()
        }
    }
}

pub fn take_input(tasks: &mut TaskList, input: &str) -> Response {
    let command = parse_command(input);
    debug!(?command, "classified input");
    execute_command(tasks, command)
}

/// Classifies one line of input. Exact phrases and command keywords are
/// matched case-insensitively after trimming; the first match wins.
pub fn parse_command(input: &str) -> TaskCommand {
    let input = input.trim();

    if input.eq_ignore_ascii_case("bye") {
        TaskCommand::Exit
    } else if input.is_empty() {
        TaskCommand::Nothing
    } else if input.eq_ignore_ascii_case("list") {
        TaskCommand::List
    } else if let Some(query) = keyword_args("find", input) {
        TaskCommand::Find {
            query: query.to_string(),
        }
    } else if let Some(arg) = keyword_args("done", input).or_else(|| keyword_args("mark", input)) {
        TaskCommand::MarkDone {
            task_number: arg.to_string(),
        }
    } else if let Some(arg) = keyword_args("delete", input) {
        TaskCommand::Delete {
            task_number: arg.to_string(),
        }
    } else if let Some((kind, args)) = add_args(input) {
        TaskCommand::Add {
            kind,
            args: args.to_string(),
        }
    } else if input.eq_ignore_ascii_case("reset") {
        TaskCommand::Reset
    } else {
        TaskCommand::Unknown
    }
}

/// Text after `keyword` when `input` is the keyword alone or the keyword
/// followed by a space.
fn keyword_args<'a>(keyword: &str, input: &'a str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }

    let rest = &input[keyword.len()..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

fn add_args(input: &str) -> Option<(TaskKind, &str)> {
    [TaskKind::Todo, TaskKind::Deadline, TaskKind::Event]
        .into_iter()
        .find_map(|kind| keyword_args(&kind.to_string(), input).map(|args| (kind, args)))
}

pub fn execute_command(tasks: &mut TaskList, command: TaskCommand) -> Response {
    match command {
        TaskCommand::Exit => Response::exit(FAREWELL),

        TaskCommand::Nothing => Response::default(),

        TaskCommand::List => Response::reply(format_numbered(tasks.chronological())),

        TaskCommand::Find { query } => handle_find(tasks, &query),

        TaskCommand::MarkDone { task_number } => handle_mark_done(tasks, &task_number),

        TaskCommand::Delete { task_number } => handle_delete(tasks, &task_number),

        TaskCommand::Add { kind, args } => handle_add(tasks, kind, &args),

        TaskCommand::Reset => {
            tasks.clear();
            Response::changed(CLEARED)
        }

        TaskCommand::Unknown => Response::reply(NOT_UNDERSTOOD),
    }
}

fn handle_find(tasks: &TaskList, query: &str) -> Response {
    let matches = tasks.iter().filter(|task| task.to_string().contains(query));
    Response::reply(format_numbered(matches))
}

fn handle_add(tasks: &mut TaskList, kind: TaskKind, args: &str) -> Response {
    match Task::from_command(args, kind) {
        Ok(task) => {
            let text = format!("added: {task}");
            tasks.add(task);
            Response::changed(text)
        }
        Err(e) => Response::reply(e.to_string()),
    }
}

fn handle_mark_done(tasks: &mut TaskList, task_number: &str) -> Response {
    let index = match tasks.resolve(task_number) {
        Ok(index) => index,
        Err(e) => return task_number_error(e),
    };

    match tasks.get_mut(index) {
        Ok(task) => {
            task.set_complete(true);
            Response::changed(format!("Great! I've marked this task as done:\n    {task}"))
        }
        Err(e) => task_number_error(e),
    }
}

fn handle_delete(tasks: &mut TaskList, task_number: &str) -> Response {
    let index = match tasks.resolve(task_number) {
        Ok(index) => index,
        Err(e) => return task_number_error(e),
    };

    match tasks.remove_at(index) {
        Ok(task) => Response::changed(format!(
            "Noted. I have deleted the following:\n    {task}\nYou now have {} tasks in the list",
            tasks.len()
        )),
        Err(e) => task_number_error(e),
    }
}

fn task_number_error(err: TaskError) -> Response {
    match err {
        TaskError::NotANumber(_) => Response::reply(TASK_NUMBER_USAGE),
        TaskError::IndexOutOfRange { .. } => Response::reply(NO_TASK_AT_INDEX),
        other => Response::reply(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> TaskList {
        names.iter().map(|n| Task::todo(n).unwrap()).collect()
    }

    #[test]
    fn classifies_exact_phrases_case_insensitively() {
        assert_eq!(parse_command("  BYE "), TaskCommand::Exit);
        assert_eq!(parse_command("   "), TaskCommand::Nothing);
        assert_eq!(parse_command("List"), TaskCommand::List);
        assert_eq!(parse_command("reset"), TaskCommand::Reset);
    }

    #[test]
    fn exact_phrases_reject_trailing_words() {
        assert_eq!(parse_command("list all"), TaskCommand::Unknown);
        assert_eq!(parse_command("bye now"), TaskCommand::Unknown);
        assert_eq!(parse_command("reset please"), TaskCommand::Unknown);
    }

    #[test]
    fn classifies_prefix_commands() {
        assert_eq!(
            parse_command("FIND milk"),
            TaskCommand::Find {
                query: "milk".into()
            }
        );
        assert_eq!(
            parse_command("done 2"),
            TaskCommand::MarkDone {
                task_number: "2".into()
            }
        );
        assert_eq!(
            parse_command("mark  3 "),
            TaskCommand::MarkDone {
                task_number: "3".into()
            }
        );
        assert_eq!(
            parse_command("Delete 1"),
            TaskCommand::Delete {
                task_number: "1".into()
            }
        );
        assert_eq!(
            parse_command("todo buy milk"),
            TaskCommand::Add {
                kind: TaskKind::Todo,
                args: "buy milk".into()
            }
        );
        assert_eq!(
            parse_command("deadline x /by today"),
            TaskCommand::Add {
                kind: TaskKind::Deadline,
                args: "x /by today".into()
            }
        );
        assert_eq!(
            parse_command("EVENT x /at today"),
            TaskCommand::Add {
                kind: TaskKind::Event,
                args: "x /at today".into()
            }
        );
    }

    #[test]
    fn keyword_needs_a_word_boundary() {
        assert_eq!(parse_command("todos"), TaskCommand::Unknown);
        assert_eq!(parse_command("finder x"), TaskCommand::Unknown);
        assert_eq!(parse_command("todo\tbuy milk"), TaskCommand::Unknown);
        assert_eq!(parse_command("delete\t2"), TaskCommand::Unknown);
        assert_eq!(
            parse_command("todo"),
            TaskCommand::Add {
                kind: TaskKind::Todo,
                args: String::new()
            }
        );
    }

    #[test]
    fn unknown_input_gets_fixed_reply() {
        let mut tasks = TaskList::new();
        let response = take_input(&mut tasks, "blah");
        assert_eq!(response.text, NOT_UNDERSTOOD);
        assert!(!response.modified);
        assert!(!response.exit);
    }

    #[test]
    fn bye_requests_exit_without_touching_tasks() {
        let mut tasks = list_of(&["a"]);
        let response = take_input(&mut tasks, "bye");
        assert_eq!(response.text, FAREWELL);
        assert!(response.exit);
        assert!(!response.modified);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn empty_input_replies_with_empty_string() {
        let mut tasks = TaskList::new();
        assert_eq!(take_input(&mut tasks, ""), Response::default());
    }

    #[test]
    fn add_reports_rendered_task() {
        let mut tasks = TaskList::new();
        let response = take_input(&mut tasks, "todo buy milk");
        assert_eq!(response.text, "added: [T][ ] buy milk");
        assert!(response.modified);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn invalid_add_replies_with_message_and_changes_nothing() {
        let mut tasks = TaskList::new();
        let response = take_input(&mut tasks, "todo    ");
        assert_eq!(response.text, "The description of a todo cannot be empty.");
        assert!(!response.modified);
        assert!(tasks.is_empty());

        let response = take_input(&mut tasks, "deadline essay /by whenever");
        assert!(response.text.starts_with("Unable to parse 'whenever'"));
        assert!(tasks.is_empty());
    }

    #[test]
    fn done_marks_only_the_chosen_task() {
        let mut tasks = list_of(&["a", "b"]);
        let response = take_input(&mut tasks, "done 2");
        assert_eq!(response.text, "Great! I've marked this task as done:\n    [T][X] b");
        assert!(response.modified);
        assert!(!tasks.get(0).unwrap().is_completed());
        assert!(tasks.get(1).unwrap().is_completed());
    }

    #[test]
    fn non_numeric_task_number_returns_usage() {
        let mut tasks = list_of(&["a"]);
        let before = tasks.clone();
        for input in ["done x", "done", "delete two", "mark 1.5"] {
            let response = take_input(&mut tasks, input);
            assert_eq!(response.text, TASK_NUMBER_USAGE, "input: {input}");
            assert!(!response.modified);
        }
        assert_eq!(tasks, before);
    }

    #[test]
    fn out_of_range_task_number_is_reported() {
        let mut tasks = list_of(&["a"]);
        let before = tasks.clone();
        for input in ["delete 2", "done 0", "done -3", "delete 99"] {
            let response = take_input(&mut tasks, input);
            assert_eq!(response.text, NO_TASK_AT_INDEX, "input: {input}");
        }
        assert_eq!(tasks, before);
    }

    #[test]
    fn delete_reports_remaining_count() {
        let mut tasks = list_of(&["a", "b", "c"]);
        let response = take_input(&mut tasks, "delete 1");
        assert_eq!(
            response.text,
            "Noted. I have deleted the following:\n    [T][ ] a\nYou now have 2 tasks in the list"
        );
        assert!(response.modified);
        assert_eq!(tasks.get(0).unwrap().description(), "b");
    }

    #[test]
    fn reset_clears_everything() {
        let mut tasks = list_of(&["a", "b"]);
        let response = take_input(&mut tasks, "RESET");
        assert_eq!(response.text, CLEARED);
        assert!(response.modified);
        assert!(tasks.is_empty());
    }

    #[test]
    fn find_is_a_case_sensitive_substring_match() {
        let mut tasks = list_of(&["buy milk", "Buy bread", "sell car"]);
        assert_eq!(take_input(&mut tasks, "find buy").text, " 1. [T][ ] buy milk\n");
        assert_eq!(take_input(&mut tasks, "find xyz").text, "");
        assert_eq!(take_input(&mut tasks, "find").text.lines().count(), 3);
    }

    #[test]
    fn list_of_empty_list_is_empty_string() {
        let mut tasks = TaskList::new();
        assert_eq!(take_input(&mut tasks, "list").text, "");
    }
}
