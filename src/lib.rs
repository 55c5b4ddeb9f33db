pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod help;
pub mod input;
pub mod logging;
pub mod record;
pub mod storage;
pub mod task_list;
pub mod types;
pub mod utils;

pub use commands::{Response, take_input};
pub use storage::{Loaded, Storage};
pub use task_list::TaskList;
pub use types::*;
