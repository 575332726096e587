use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::models::Task;
use crate::task_list::TaskList;

const APP_DIR: &str = "taskbot";
const TASKS_FILE: &str = "tasks.txt";

/// Returns the directory holding the task file, the config and the log.
///
/// `~/.local/share/taskbot` on Linux, `./data` when no data directory is known.
pub fn data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(mut p) => {
            p.push(APP_DIR);
            p
        }
        None => PathBuf::from("data"),
    }
}

/// Returns the default path of the task file inside [`data_dir`].
pub fn default_tasks_path() -> PathBuf {
    data_dir().join(TASKS_FILE)
}

/// What a load produced: every task up to the first bad line, and the error
/// for that line if there was one.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub error: Option<TrackerError>,
}

/// Flat text store: one canonical task line per task, newline-terminated.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads tasks in file order, stopping at the first line that does not decode.
    ///
    /// A missing file is an empty list. Blank lines are skipped.
    pub fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();
        if !self.path.exists() {
            log::info!("No task file at {}, starting empty", self.path.display());
            return report;
        }

        let contents = match read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to read {}: {}", self.path.display(), e);
                report.error = Some(e);
                return report;
            }
        };

        for (i, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Task::decode_at(line, i + 1) {
                Ok(task) => report.tasks.push(task),
                Err(e) => {
                    log::warn!("Stopped loading {} at line {}: {:?}", self.path.display(), i + 1, line);
                    report.error = Some(e);
                    break;
                }
            }
        }

        log::info!("Loaded {} task(s) from {}", report.tasks.len(), self.path.display());
        report
    }

    /// Overwrites the file with the current list, creating its directory if needed.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut s = String::new();
        for task in tasks {
            s.push_str(&task.encode());
            s.push('\n');
        }

        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        log::debug!("Saved {} task(s) to {}", tasks.count(), self.path.display());
        Ok(())
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    let mut f = OpenOptions::new().read(true).open(path)?;
    let mut s = String::new();
    f.read_to_string(&mut s)?;
    Ok(s)
}
