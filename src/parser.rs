//! Turns one line of user input into a [`Command`].
//!
//! Matching is a fixed precedence list; the first pattern that fits the line
//! decides the command. A line that fits a pattern structurally but carries
//! an empty or malformed argument is an error, not an unknown command.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Result, TrackerError};
use crate::scheduler::parse_hours;

static DEADLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^deadline(?:\s+(.*))?\s+/by(?:\s+(.*))?$").expect("valid deadline pattern")
});
static EVENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^event(?:\s+(.*))?\s+/from(?:\s+(.*))?\s+/to(?:\s+(.*))?$")
        .expect("valid event pattern")
});
static FREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^free(?:\s+/duration(?:\s+(.*))?)?$").expect("valid free pattern")
});

/// A parsed command with its validated arguments.
///
/// Task positions are 0-based and already checked against the list size.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    List,
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    AddTodo { description: String },
    AddDeadline { description: String, by: String },
    AddEvent { description: String, from: String, to: String },
    Search { term: String },
    FindFreeTime { hours: f64 },
    Unknown(String),
}

impl Command {
    /// Parses `input` against a list currently holding `task_count` tasks.
    pub fn parse(input: &str, task_count: usize) -> Result<Command> {
        let input = input.trim();

        if input == "bye" {
            return Ok(Command::Exit);
        }
        if input == "list" {
            return Ok(Command::List);
        }
        if let Some(token) = keyword_argument(input, "mark") {
            return Ok(Command::Mark(parse_index(token, task_count)?));
        }
        if let Some(token) = keyword_argument(input, "unmark") {
            return Ok(Command::Unmark(parse_index(token, task_count)?));
        }
        if let Some(token) = keyword_argument(input, "delete") {
            return Ok(Command::Delete(parse_index(token, task_count)?));
        }
        if let Some(text) = keyword_argument(input, "todo") {
            return Ok(Command::AddTodo { description: required(Some(text), "todo description")? });
        }
        if let Some(caps) = DEADLINE.captures(input) {
            return Ok(Command::AddDeadline {
                description: required(group(&caps, 1), "deadline description")?,
                by: required(group(&caps, 2), "deadline /by time")?,
            });
        }
        if let Some(caps) = EVENT.captures(input) {
            return Ok(Command::AddEvent {
                description: required(group(&caps, 1), "event description")?,
                from: required(group(&caps, 2), "event /from time")?,
                to: required(group(&caps, 3), "event /to time")?,
            });
        }
        if let Some(text) = keyword_argument(input, "find") {
            return Ok(Command::Search { term: required(Some(text), "search term")? });
        }
        if let Some(caps) = FREE.captures(input) {
            let text = required(group(&caps, 1), "duration")?;
            return Ok(Command::FindFreeTime { hours: parse_hours(&text)? });
        }

        Ok(Command::Unknown(input.to_string()))
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::List => "list",
            Command::Mark(_) => "mark",
            Command::Unmark(_) => "unmark",
            Command::Delete(_) => "delete",
            Command::AddTodo { .. } => "add-todo",
            Command::AddDeadline { .. } => "add-deadline",
            Command::AddEvent { .. } => "add-event",
            Command::Search { .. } => "search",
            Command::FindFreeTime { .. } => "find-free-time",
            Command::Unknown(_) => "unknown",
        }
    }

    /// Whether running this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Mark(_)
                | Command::Unmark(_)
                | Command::Delete(_)
                | Command::AddTodo { .. }
                | Command::AddDeadline { .. }
                | Command::AddEvent { .. }
        )
    }
}

/// `keyword` alone yields `Some("")`; `keyword <rest>` yields the rest.
fn keyword_argument<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(keyword)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn group<'a>(caps: &Captures<'a>, i: usize) -> Option<&'a str> {
    caps.get(i).map(|m| m.as_str())
}

fn required(text: Option<&str>, field: &'static str) -> Result<String> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(TrackerError::EmptyArgument(field)),
    }
}

/// Reads a 1-based task number and returns the matching 0-based position.
fn parse_index(token: &str, task_count: usize) -> Result<usize> {
    let number: i64 = token
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidIndex(token.trim().to_string()))?;
    if number < 1 || number as u64 > task_count as u64 {
        return Err(TrackerError::IndexOutOfRange { index: number, count: task_count });
    }
    Ok(number as usize - 1)
}
