//! Error types shared by the parser, the task model and the store.

/// Every failure the tracker can report.
///
/// The `Display` text of each variant is what the user sees: the session
/// turns any error into an error response without further decoration.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// A structurally valid command is missing its text argument.
    #[error("OOPS!!! The {0} cannot be empty.")]
    EmptyArgument(&'static str),

    /// The task number token is not an integer.
    #[error("OOPS!!! Task number must be a valid integer, got '{0}'.")]
    InvalidIndex(String),

    /// The task number does not name an existing task.
    #[error("OOPS!!! Task {index} does not exist. You have {count} task(s) in the list.")]
    IndexOutOfRange { index: i64, count: usize },

    /// An event would end before it starts.
    #[error("OOPS!!! An event cannot end before it starts. Please check the dates and try again.")]
    ScheduleConflict,

    /// A free-time request for a non-positive or unreadable number of hours.
    #[error("OOPS!!! Duration must be a positive number of hours, got '{0}'.")]
    InvalidDuration(String),

    /// Date/time text that does not follow `d/M/yyyy HHmm`.
    #[error("OOPS!!! '{0}' is not a valid date. Use d/M/yyyy HHmm, e.g. 2/12/2025 1800.")]
    InvalidDateTime(String),

    /// A stored line that cannot be decoded back into a task.
    #[error("OOPS!!! Data file line {line_no} cannot be read: {line}")]
    CorruptRecord { line_no: usize, line: String },

    #[error("OOPS!!! I'm sorry, but I don't know what '{0}' means :-(")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrackerError>;
