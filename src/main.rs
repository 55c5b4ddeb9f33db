use anyhow::Result;
use duke::cli::{self, Launch};
use duke::config::Config;
use duke::display::{format_error, format_prompt, format_warning, reply_width, wrap_reply};
use duke::{Storage, TaskList, help, logging, take_input};
use std::io::{self, BufRead, IsTerminal, Write};
use std::thread;
use tracing::warn;

fn main() -> Result<()> {
    help::handle_flag_help()?;
    logging::init();

    match cli::parse_launch()? {
        Launch::Completions(shell) => cli::print_completions(shell),
        Launch::Prompt(config) => run_prompt(&config),
        Launch::Once { config, input } => run_once(&config, &input),
    }
}

fn run_prompt(config: &Config) -> Result<()> {
    let storage = config.storage();
    let mut tasks = load_tasks(&storage);

    let interactive = io::stdin().is_terminal();
    let styled = io::stdout().is_terminal();
    let mut lines = io::stdin().lock().lines();
    let mut out = io::stdout().lock();

    loop {
        if interactive {
            write!(out, "{}", format_prompt())?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let response = take_input(&mut tasks, &line?);

        if response.modified {
            persist(&storage, &tasks);
        }
        show(&mut out, &response.text, styled)?;

        if response.exit {
            out.flush()?;
            thread::sleep(config.exit_delay);
            break;
        }
    }
    Ok(())
}

fn run_once(config: &Config, input: &str) -> Result<()> {
    let storage = config.storage();
    let mut tasks = load_tasks(&storage);

    let response = take_input(&mut tasks, input);
    if response.modified {
        persist(&storage, &tasks);
    }

    let mut out = io::stdout().lock();
    show(&mut out, &response.text, io::stdout().is_terminal())?;
    if response.exit {
        out.flush()?;
        thread::sleep(config.exit_delay);
    }
    Ok(())
}

fn load_tasks(storage: &Storage) -> TaskList {
    match storage.load() {
        Ok(loaded) => {
            if let Some(summary) = loaded.summary() {
                eprintln!("{}", format_warning(&summary));
            }
            loaded.tasks
        }
        Err(_) => {
            eprintln!(
                "{}",
                format_warning("Save file could not be read. It will be wiped on the next save.")
            );
            TaskList::new()
        }
    }
}

fn persist(storage: &Storage, tasks: &TaskList) {
    if let Err(e) = storage.save(tasks) {
        warn!(path = %storage.path().display(), error = %e, "save failed");
        eprintln!("{}", format_error(&format!("File could not be saved. - {e}")));
    }
}

fn show(out: &mut impl Write, text: &str, styled: bool) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    if styled {
        writeln!(out, "{}", wrap_reply(text, reply_width()))
    } else {
        writeln!(out, "{}", text.trim_end_matches('\n'))
    }
}
