use chrono::NaiveDateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::error::{Result, TrackerError};
use crate::models::{format_datetime, Task, TaskKind};
use crate::parser::Command;
use crate::responses;
use crate::scheduler::{find_free_slot, now_to_minute};
use crate::storage::FileStore;
use crate::task_list::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Normal,
    Error,
    /// The farewell; the presenter should stop reading input.
    Exit,
}

/// What the session hands back for one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub kind: ResponseKind,
}

impl Response {
    fn error(err: &TrackerError) -> Response {
        Response { message: err.to_string(), kind: ResponseKind::Error }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }

    pub fn is_exit(&self) -> bool {
        self.kind == ResponseKind::Exit
    }
}

/// Runs one parsed command against `tasks` and returns the message to show.
///
/// `now` is only read by the free-time search.
pub fn execute(tasks: &mut TaskList, command: &Command, now: NaiveDateTime) -> Result<String> {
    match command {
        Command::Exit => Ok(responses::farewell()),
        Command::List => Ok(responses::list_tasks(tasks)),
        Command::Mark(i) => {
            let task = tasks.get_mut(*i)?;
            task.mark_done();
            Ok(responses::marked_done(task))
        }
        Command::Unmark(i) => {
            let task = tasks.get_mut(*i)?;
            task.mark_undone();
            Ok(responses::marked_undone(task))
        }
        Command::Delete(i) => {
            let removed = tasks.delete(*i)?;
            Ok(responses::deleted(&removed, tasks.count()))
        }
        Command::AddTodo { description } => add(tasks, Task::todo(description.as_str())),
        Command::AddDeadline { description, by } => {
            add(tasks, Task::deadline_from_input(description.as_str(), by)?)
        }
        Command::AddEvent { description, from, to } => {
            add(tasks, Task::event_from_input(description.as_str(), from, to)?)
        }
        Command::Search { term } => Ok(responses::search_results(&tasks.search(term))),
        Command::FindFreeTime { hours } => {
            let slot = find_free_slot(tasks, now, *hours)?;
            Ok(responses::free_slot(&slot))
        }
        Command::Unknown(input) => Err(TrackerError::UnknownCommand(input.clone())),
    }
}

fn add(tasks: &mut TaskList, task: Task) -> Result<String> {
    let message = responses::added(&task, tasks.count() + 1);
    tasks.add(task);
    Ok(message)
}

/// One user's running conversation with the tracker.
///
/// Owns the task list and the store it came from; every successful
/// mutating command is followed by a full save.
pub struct Session {
    tasks: TaskList,
    store: FileStore,
    load_error: Option<TrackerError>,
}

impl Session {
    /// Loads whatever the store holds. A bad line ends the load; the error is
    /// kept for [`Session::take_load_error`].
    pub fn open(store: FileStore) -> Session {
        let report = store.load();
        log::info!(
            "Session opened on {} with {} task(s)",
            store.path().display(),
            report.tasks.len()
        );
        Session {
            tasks: TaskList::from(report.tasks),
            store,
            load_error: report.error,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// The startup load failure, formatted for display. Returns it only once.
    pub fn take_load_error(&mut self) -> Option<String> {
        self.load_error.take().map(|e| responses::loading_error(&e))
    }

    pub fn handle(&mut self, line: &str) -> Response {
        self.handle_at(line, now_to_minute())
    }

    /// Like [`Session::handle`] with an explicit clock.
    pub fn handle_at(&mut self, line: &str, now: NaiveDateTime) -> Response {
        let command = match Command::parse(line, self.tasks.count()) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("Rejected input {:?}: {}", line, e);
                return Response::error(&e);
            }
        };
        log::debug!("Running {} command", command.name());

        match execute(&mut self.tasks, &command, now) {
            Ok(message) => {
                if command.is_mutating() {
                    self.persist();
                }
                let kind = if matches!(command, Command::Exit) {
                    ResponseKind::Exit
                } else {
                    ResponseKind::Normal
                };
                Response { message, kind }
            }
            Err(e) => {
                log::debug!("{} command failed: {}", command.name(), e);
                Response::error(&e)
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.tasks) {
            log::error!("Failed to save tasks to {}: {}", self.store.path().display(), e);
        }
    }
}

/// Runs a single command line against the store and returns the response.
pub fn cmd_run(store: FileStore, words: &[String]) -> Response {
    let mut session = Session::open(store);
    if let Some(err) = session.take_load_error() {
        return Response { message: err, kind: ResponseKind::Error };
    }
    session.handle(&words.join(" "))
}

/// Renders the tasks as a table. With `by_date`, dated tasks come first in
/// date order and to-dos follow in list order; the first column is then the
/// row order rather than the task number.
pub fn cmd_table(tasks: &TaskList, by_date: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    let tasks = if by_date {
        tasks.sort_by(|a, b| (a.when().is_none(), a.when()).cmp(&(b.when().is_none(), b.when())))
    } else {
        tasks.clone()
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(if by_date { "Order" } else { "#" }).add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("When").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (i, t) in tasks.iter().enumerate() {
        let (kind, when) = match &t.kind {
            TaskKind::Todo => ("Todo", String::new()),
            TaskKind::Deadline { by } => ("Deadline", format!("by {}", format_datetime(by))),
            TaskKind::Event { from, to } => (
                "Event",
                format!("{} - {}", format_datetime(from), format_datetime(to)),
            ),
        };
        let (status, status_color) = if t.done {
            ("Done", Color::Green)
        } else {
            ("Pending", Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind),
            Cell::new(&t.description),
            Cell::new(when),
            Cell::new(status).fg(status_color),
        ]);
    }

    table.to_string()
}

/// The tasks as pretty JSON.
pub fn cmd_export_json(tasks: &TaskList) -> Result<String> {
    let all: Vec<&Task> = tasks.iter().collect();
    Ok(serde_json::to_string_pretty(&all)?)
}
