use chrono::{Duration, Local, NaiveDateTime, Timelike};

use crate::error::{Result, TrackerError};
use crate::models::TaskKind;
use crate::task_list::TaskList;

/// A closed range of time, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> TimeRange {
        TimeRange { start, end }
    }
}

/// The current local time with seconds dropped.
pub fn now_to_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// The time ranges of every event in `tasks`, ascending by start.
///
/// Events sharing a start keep their list order.
pub fn event_ranges(tasks: &TaskList) -> Vec<TimeRange> {
    let mut ranges: Vec<TimeRange> = tasks
        .iter()
        .filter_map(|t| match t.kind {
            TaskKind::Event { from, to } => Some(TimeRange::new(from, to)),
            _ => None,
        })
        .collect();
    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Collapses ranges sorted by start into the minimal set of disjoint ranges
/// covering them. Touching ranges (`next.start == current.end`) merge.
pub fn merge_overlapping(sorted: &[TimeRange]) -> Vec<TimeRange> {
    let mut merged = Vec::new();
    let mut iter = sorted.iter();
    let Some(first) = iter.next() else {
        return merged;
    };

    let mut current = *first;
    for range in iter {
        if range.start <= current.end {
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = *range;
        }
    }
    merged.push(current);
    merged
}

/// Merged ranges covered by the events in `tasks`.
pub fn busy_ranges(tasks: &TaskList) -> Vec<TimeRange> {
    merge_overlapping(&event_ranges(tasks))
}

/// Reads a free-time request such as `2` or `1.5` as hours.
pub fn parse_hours(text: &str) -> Result<f64> {
    let hours: f64 = text
        .trim()
        .parse()
        .map_err(|_| TrackerError::InvalidDuration(text.trim().to_string()))?;
    hours_to_duration(hours)?;
    Ok(hours)
}

fn hours_to_duration(hours: f64) -> Result<Duration> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(TrackerError::InvalidDuration(hours.to_string()));
    }
    let minutes = (hours * 60.0).round();
    // anything over a century is not a slot anyone will book
    if minutes < 1.0 || minutes > 60.0 * 24.0 * 366.0 * 100.0 {
        return Err(TrackerError::InvalidDuration(hours.to_string()));
    }
    Ok(Duration::minutes(minutes as i64))
}

/// Finds the first slot of `hours` starting at or after `now` that no
/// future event overlaps.
///
/// Only events starting strictly after `now` are considered; one already in
/// progress does not block. The result never starts before `now`, and starts
/// exactly at `now` when no such event exists.
pub fn find_free_slot(tasks: &TaskList, now: NaiveDateTime, hours: f64) -> Result<TimeRange> {
    let duration = hours_to_duration(hours)?;

    let future: Vec<TimeRange> = event_ranges(tasks)
        .into_iter()
        .filter(|r| r.start > now)
        .collect();

    let mut candidate = now;
    for busy in merge_overlapping(&future) {
        if busy.start - duration >= candidate {
            break;
        }
        candidate = busy.end;
    }

    Ok(TimeRange::new(candidate, candidate + duration))
}
