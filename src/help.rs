use std::io;

use clap::{Arg, Command};

fn print_dates_help() -> io::Result<()> {
    let mut cmd = Command::new("--dates")
        .about("Date and time formats for deadlines and events")
        .override_usage("deadline <DESCRIPTION> /by <DATE>\n       event <DESCRIPTION> /at <DATE> [to <DATE>]\n       event <DESCRIPTION> /from <DATE> /to <DATE>")
        .arg(
            Arg::new("date")
                .help("Keyword (today, tomorrow), relative (2h, 45m, 1h30m) or absolute YYYY-MM-DD[ HH:MM[:SS]] / DD/MM/YYYY[ HHMM] date")
                .required(true)
                .value_name("DATE"),
        )
        .after_help(
"Format examples:
  today                today 23:59:59
  tomorrow             tomorrow 23:59:59
  2h                   N hours from now   (e.g. 2h, 6h)
  30m                  N minutes from now (e.g. 30m, 90m)
  1h30m                hours and minutes from now
  2025-08-01           YYYY-MM-DD, end of day
  2025-08-01 17:00     YYYY-MM-DD HH:MM
  2025-08-01 17:00:30  YYYY-MM-DD HH:MM:SS
  01/08/2025 1700      DD/MM/YYYY HHMM

An event end given as a bare HH:MM falls on the start's day.

Command Examples:
  deadline Pay rent /by today
  deadline Release v1.2 /by 2025-08-01 17:00
  event Team sync /at tomorrow
  event Party /at 2025-08-02 19:00 to 23:30
  event Trip /from 2025-08-05 /to 2025-08-07
"
        ).color(clap::ColorChoice::Auto);

    cmd.print_help()?;
    println!();
    Ok(())
}

/// What a `--help` invocation asks for beyond clap's own help.
#[derive(Debug, PartialEq, Eq)]
enum HelpRequest {
    /// No help flag, or `--help` alone: clap handles it.
    Clap,
    Dates,
    Unsupported(String),
}

fn help_request<S: AsRef<str>>(args: &[S]) -> HelpRequest {
    let is_help = |s: &str| s == "--help" || s == "-h";
    if !args.iter().any(|s| is_help(s.as_ref())) {
        return HelpRequest::Clap;
    }

    let rest: Vec<&str> = args
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !is_help(s))
        .collect();

    match rest.as_slice() {
        [] => HelpRequest::Clap,
        ["--dates"] => HelpRequest::Dates,
        other => HelpRequest::Unsupported(other.join(" ")),
    }
}

/// Answers `--help --dates` before clap sees the arguments, and rejects
/// other combinations with `--help`.
pub fn handle_flag_help() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match help_request(&args) {
        HelpRequest::Clap => Ok(()),
        HelpRequest::Dates => {
            print_dates_help()?;
            std::process::exit(0);
        }
        HelpRequest::Unsupported(extra) => {
            eprintln!(
                "error: '--help' cannot be combined with '{extra}' (try '--help' or '--help --dates')"
            );
            std::process::exit(2);
        }
    }
}
