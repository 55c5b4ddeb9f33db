use crate::config::{Config, DATA_DIR_ENV, DEFAULT_EXIT_DELAY};
use anyhow::Result;
use clap::{Arg, ArgMatches, Command, value_parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

const BIN_NAME: &str = "duke";

#[derive(Debug)]
pub enum Launch {
    Completions(Shell),
    /// Read commands from stdin until `bye` or end of input.
    Prompt(Config),
    /// Run the positional words as a single command.
    Once { config: Config, input: String },
}

pub fn build_cli() -> Command {
    Command::new(BIN_NAME)
        .about("A small task tracking assistant")
        .after_help(
            "Without COMMAND, reads commands from stdin (type `bye` to leave).\n\
             Use `--help --dates` for the date formats accepted by deadline and event.",
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .help("Print completion script for <SHELL> to stdout")
                .value_parser(value_parser!(Shell))
                .value_name("SHELL"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help(format!(
                    "Directory holding the save file [env: {DATA_DIR_ENV}] [default: ./data]"
                ))
                .value_parser(value_parser!(PathBuf))
                .value_name("DIR"),
        )
        .arg(
            Arg::new("exit-delay")
                .long("exit-delay")
                .help("Milliseconds to wait after the farewell before exiting")
                .value_parser(value_parser!(u64))
                .value_name("MS"),
        )
        .arg(
            Arg::new("command")
                .help("Run a single command, e.g. `duke todo buy milk`")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .value_name("COMMAND"),
        )
}

pub fn parse_launch() -> Result<Launch> {
    launch_from_matches(&build_cli().get_matches())
}

pub fn launch_from_matches(matches: &ArgMatches) -> Result<Launch> {
    if let Some(shell) = matches.get_one::<Shell>("completions") {
        return Ok(Launch::Completions(*shell));
    }

    let data_dir = matches.get_one::<PathBuf>("data-dir").cloned();
    let exit_delay = matches.get_one::<u64>("exit-delay").map(|ms| Duration::from_millis(*ms));

    let input = matches
        .get_many::<String>("command")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .filter(|input| !input.trim().is_empty());

    match input {
        Some(input) => {
            let config = Config::from_env(data_dir, exit_delay.unwrap_or(Duration::ZERO))?;
            Ok(Launch::Once { config, input })
        }
        None => {
            let config = Config::from_env(data_dir, exit_delay.unwrap_or(DEFAULT_EXIT_DELAY))?;
            Ok(Launch::Prompt(config))
        }
    }
}

pub fn print_completions(shell: Shell) -> Result<()> {
    let mut cmd = build_cli();
    generate(shell, &mut cmd, BIN_NAME, &mut io::stdout());
    Ok(())
}
