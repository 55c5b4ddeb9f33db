use crate::task_list::TaskList;
use crate::types::{Task, TaskError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::{debug, info, warn};

pub const DATA_DIR_NAME: &str = "data";
pub const SAVE_FILE_NAME: &str = "tasks";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Result of reading the save file. Lines that could not be parsed are kept
/// verbatim in `failed_lines` and left out of `tasks`.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: TaskList,
    pub failed_lines: Vec<String>,
}

impl Loaded {
    /// Partial-read report for the user, or `None` when every line parsed.
    pub fn summary(&self) -> Option<String> {
        if self.failed_lines.is_empty() {
            return None;
        }

        let mut status = format!(
            "Save file was read partially. {} tasks added, {} tasks could not be understood:\n",
            self.tasks.len(),
            self.failed_lines.len()
        );
        for line in &self.failed_lines {
            status.push_str(line);
            status.push('\n');
        }
        Some(status)
    }
}

/// The save file: one serialized task per line.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Storage {
            path: data_dir.into().join(SAVE_FILE_NAME),
        }
    }

    /// `./data/tasks` under the current working directory.
    pub fn in_working_dir() -> Result<Self, TaskError> {
        Ok(Storage::new(env::current_dir()?.join(DATA_DIR_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty list. Lines are decoded one at a time, so
    /// a line that is not UTF-8 lands in `failed_lines` like any other
    /// unreadable record. Any other read failure is returned so the caller
    /// can warn and start from an empty list.
    pub fn load(&self) -> Result<Loaded, TaskError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no save file yet");
                return Ok(Loaded::default());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "save file could not be read");
                return Err(TaskError::Io(e));
            }
        };

        let mut loaded = Loaded::default();
        for raw in bytes.split(|&b| b == b'\n') {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    debug!(error = %e, "skipping task line that is not UTF-8");
                    loaded.failed_lines.push(String::from_utf8_lossy(raw).into_owned());
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match Task::parse(line) {
                Ok(task) => loaded.tasks.add(task),
                Err(e) => {
                    debug!(line, error = %e, "skipping unreadable task line");
                    loaded.failed_lines.push(line.to_string());
                }
            }
        }

        info!(
            path = %self.path.display(),
            tasks = loaded.tasks.len(),
            failed = loaded.failed_lines.len(),
            "read last save"
        );
        Ok(loaded)
    }

    /// Replaces the save file with `tasks` in canonical order.
    pub fn save(&self, tasks: &TaskList) -> Result<(), TaskError> {
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&task.serialize()?);
            contents.push_str(LINE_ENDING);
        }

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        atomic_write(&self.path, contents)?;

        info!(path = %self.path.display(), tasks = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Write to a `.tmp` sibling, then rename over the target.
fn atomic_write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), TaskError> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
