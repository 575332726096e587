//! # TaskBot
//!
//! A personal task tracker you talk to one line at a time. It keeps three
//! kinds of task (to-dos, deadlines and events), finds the next free slot
//! between your events, and stores everything in a plain text file.
//!
//! ## Commands
//!
//! ```text
//! todo buy milk
//! deadline report /by 2/12/2025 1800
//! event meeting /from 2/12/2025 1600 /to 2/12/2025 1800
//! list
//! mark 2 | unmark 2 | delete 2
//! find book
//! free /duration 2
//! bye
//! ```
//!
//! ## Data Storage
//!
//! Tasks live in `tasks.txt` in your local data directory (on Linux
//! `~/.local/share/taskbot/`), one line per task in the same form `list`
//! shows them. Override the file with `--file` or the `TASKS_DB`
//! environment variable. Settings are read from `config.json` and logs are
//! written to `taskbot.log` in the same directory.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod repl;
pub mod responses;
pub mod scheduler;
pub mod storage;
pub mod task_list;
pub mod tui;

pub use commands::{Response, ResponseKind, Session};
pub use error::{Result, TrackerError};
pub use models::{Task, TaskKind};
pub use parser::Command;
pub use storage::FileStore;
pub use task_list::TaskList;
