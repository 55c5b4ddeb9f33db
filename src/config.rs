use crate::storage::{DATA_DIR_NAME, Storage};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the data directory when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "DUKE_DATA_DIR";
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(1600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Pause after the farewell before the process ends.
    pub exit_delay: Duration,
}

impl Config {
    /// `--data-dir` beats `DUKE_DATA_DIR` beats `<cwd>/data`. Relative
    /// directories are taken from `cwd`.
    pub fn resolve(
        data_dir_flag: Option<PathBuf>,
        data_dir_env: Option<String>,
        exit_delay: Duration,
        cwd: &Path,
    ) -> Self {
        let data_dir = data_dir_flag
            .or_else(|| {
                data_dir_env
                    .filter(|dir| !dir.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME));

        Config {
            data_dir: cwd.join(data_dir),
            exit_delay,
        }
    }

    pub fn from_env(data_dir_flag: Option<PathBuf>, exit_delay: Duration) -> Result<Self> {
        let cwd = env::current_dir().context("Could not determine the working directory")?;
        Ok(Config::resolve(
            data_dir_flag,
            env::var(DATA_DIR_ENV).ok(),
            exit_delay,
            &cwd,
        ))
    }

    pub fn storage(&self) -> Storage {
        Storage::new(&self.data_dir)
    }
}
