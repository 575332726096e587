use std::fmt;

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Format users type dates in, e.g. `2/12/2025 1800`.
pub const INPUT_FORMAT: &str = "%d/%m/%Y %H%M";
/// Format dates are shown and stored in, e.g. `Dec 2 2025, 18:00`.
pub const DISPLAY_FORMAT: &str = "%b %-d %Y, %H:%M";
// chrono's day parser accepts one or two digits, so the padded form reads both.
const STORED_FORMAT: &str = "%b %d %Y, %H:%M";

static TODO_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[T\]\[([ X])\] (.+)$").expect("valid todo pattern"));
static DEADLINE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[D\]\[([ X])\] (.+) \(by: (.+)\)$").expect("valid deadline pattern")
});
static EVENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[E\]\[([ X])\] (.+) \(from: (.+?) to: (.+)\)$").expect("valid event pattern")
});

/// Parses a user-entered date/time in [`INPUT_FORMAT`].
pub fn parse_input_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), INPUT_FORMAT)
        .map_err(|_| TrackerError::InvalidDateTime(text.trim().to_string()))
}

/// Renders a date/time in [`DISPLAY_FORMAT`].
pub fn format_datetime(at: &NaiveDateTime) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}

fn parse_stored_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, STORED_FORMAT).ok()
}

/// What distinguishes the three kinds of task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    /// A plain to-do with no dates.
    Todo,
    /// A task that must be done by a point in time.
    Deadline { by: NaiveDateTime },
    /// A task occupying a time range. `from <= to` always holds.
    Event { from: NaiveDateTime, to: NaiveDateTime },
}

/// A single entry in the task list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// What the task is about. Never empty; the parser checks this.
    pub description: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Task {
        Task { description: description.into(), done: false, kind: TaskKind::Todo }
    }

    pub fn deadline(description: impl Into<String>, by: NaiveDateTime) -> Task {
        Task { description: description.into(), done: false, kind: TaskKind::Deadline { by } }
    }

    /// Builds a deadline from raw `d/M/yyyy HHmm` text.
    pub fn deadline_from_input(description: impl Into<String>, by: &str) -> Result<Task> {
        Ok(Task::deadline(description, parse_input_datetime(by)?))
    }

    /// Builds an event, rejecting one that ends before it starts.
    pub fn event(description: impl Into<String>, from: NaiveDateTime, to: NaiveDateTime) -> Result<Task> {
        if from > to {
            return Err(TrackerError::ScheduleConflict);
        }
        Ok(Task { description: description.into(), done: false, kind: TaskKind::Event { from, to } })
    }

    /// Builds an event from raw `d/M/yyyy HHmm` text.
    pub fn event_from_input(description: impl Into<String>, from: &str, to: &str) -> Result<Task> {
        Task::event(description, parse_input_datetime(from)?, parse_input_datetime(to)?)
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// `X` when done, a single space otherwise.
    pub fn status_icon(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }

    pub fn type_icon(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    /// The date a task is anchored to: a deadline's `by`, an event's `from`.
    pub fn when(&self) -> Option<NaiveDateTime> {
        match self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(by),
            TaskKind::Event { from, .. } => Some(from),
        }
    }

    /// The canonical line used both on screen and in the data file.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Reads back a line produced by [`Task::encode`].
    pub fn decode(line: &str) -> Result<Task> {
        Task::decode_at(line, 1)
    }

    /// Like [`Task::decode`], reporting `line_no` on failure.
    pub fn decode_at(line: &str, line_no: usize) -> Result<Task> {
        let corrupt = || TrackerError::CorruptRecord { line_no, line: line.to_string() };

        let (done, task) = if let Some(caps) = TODO_LINE.captures(line) {
            (&caps[1] == "X", Task::todo(&caps[2]))
        } else if let Some(caps) = DEADLINE_LINE.captures(line) {
            let by = parse_stored_datetime(&caps[3]).ok_or_else(corrupt)?;
            (&caps[1] == "X", Task::deadline(&caps[2], by))
        } else if let Some(caps) = EVENT_LINE.captures(line) {
            let from = parse_stored_datetime(&caps[3]).ok_or_else(corrupt)?;
            let to = parse_stored_datetime(&caps[4]).ok_or_else(corrupt)?;
            let task = Task::event(&caps[2], from, to).map_err(|_| corrupt())?;
            (&caps[1] == "X", task)
        } else {
            return Err(corrupt());
        };

        let mut task = task;
        task.done = done;
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}] {}", self.type_icon(), self.status_icon(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", format_datetime(by)),
            TaskKind::Event { from, to } => {
                write!(f, " (from: {} to: {})", format_datetime(from), format_datetime(to))
            }
        }
    }
}
