//! User-facing message templates. Every function here is pure.

use crate::error::TrackerError;
use crate::models::{format_datetime, Task};
use crate::scheduler::TimeRange;
use crate::task_list::TaskList;

pub fn welcome(bot_name: &str) -> String {
    format!("Hello! I'm {bot_name}!\nWhat can I do for you?")
}

pub fn farewell() -> String {
    "Bye. Hope to see you again soon!".to_string()
}

pub fn list_tasks(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "You have no tasks in your list.".to_string();
    }
    format!("Here are the tasks in your list:\n{tasks}")
}

pub fn marked_done(task: &Task) -> String {
    format!("Nice! I've marked this task as done:\n  {task}")
}

pub fn marked_undone(task: &Task) -> String {
    format!("OK, I've marked this task as not done yet:\n  {task}")
}

pub fn added(task: &Task, total: usize) -> String {
    format!("Got it. I've added this task:\n  {task}\n{}", count_line(total))
}

pub fn deleted(task: &Task, total: usize) -> String {
    format!("Noted. I've removed this task:\n  {task}\n{}", count_line(total))
}

pub fn search_results(matches: &TaskList) -> String {
    if matches.is_empty() {
        return "No matching tasks found.".to_string();
    }
    format!("Here are the matching tasks in your list:\n{matches}")
}

/// The slot is half-open: it ends when the next commitment may begin.
pub fn free_slot(slot: &TimeRange) -> String {
    format!(
        "Your next available free time slot is [{}, {}).",
        format_datetime(&slot.start),
        format_datetime(&slot.end)
    )
}

pub fn loading_error(err: &TrackerError) -> String {
    format!("LOADING ERROR\n{err}\nTasks before that line were loaded.")
}

fn count_line(total: usize) -> String {
    format!("Now you have {total} task(s) in the list.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_inputs_still_format() {
        assert_eq!(list_tasks(&TaskList::new()), "You have no tasks in your list.");
        assert_eq!(search_results(&TaskList::new()), "No matching tasks found.");
    }

    #[test]
    fn counts_follow_the_task() {
        let message = added(&Task::todo("buy milk"), 3);
        assert!(message.contains("[T][ ] buy milk"));
        assert!(message.ends_with("Now you have 3 task(s) in the list."));

        let message = deleted(&Task::todo("buy milk"), 0);
        assert!(message.ends_with("Now you have 0 task(s) in the list."));
    }

    #[test]
    fn free_slot_is_half_open() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        let slot = TimeRange::new(
            day.and_hms_opt(18, 0, 0).unwrap(),
            day.and_hms_opt(20, 0, 0).unwrap(),
        );
        assert_eq!(
            free_slot(&slot),
            "Your next available free time slot is [Dec 2 2025, 18:00, Dec 2 2025, 20:00)."
        );
    }
}
