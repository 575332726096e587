use std::cmp::Ordering;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{Result, TrackerError};
use crate::models::Task;

/// Ordered collection of tasks. Insertion order is display and storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes and returns the task at the 0-based `index`.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    /// The task at the 0-based `index`.
    pub fn get(&self, index: usize) -> Result<&Task> {
        self.check(index)?;
        Ok(&self.tasks[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.check(index)?;
        Ok(&mut self.tasks[index])
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// A new list with the matching tasks, in their original relative order.
    pub fn filter<P>(&self, mut predicate: P) -> TaskList
    where
        P: FnMut(&Task) -> bool,
    {
        self.tasks.iter().filter(|t| predicate(*t)).cloned().collect()
    }

    /// A new list ordered by `compare`. Equal tasks keep their relative order.
    pub fn sort_by<F>(&self, compare: F) -> TaskList
    where
        F: FnMut(&Task, &Task) -> Ordering,
    {
        let mut tasks = self.tasks.clone();
        tasks.sort_by(compare);
        TaskList { tasks }
    }

    /// Tasks whose description contains `term` as a whole word, ignoring case.
    ///
    /// `book` finds "read book" and "Book club" but not "bookcase".
    pub fn search(&self, term: &str) -> TaskList {
        match whole_word(term.trim()) {
            Some(re) => self.filter(|t| re.is_match(&t.description)),
            None => TaskList::new(),
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TrackerError::IndexOutOfRange {
                index: index as i64 + 1,
                count: self.tasks.len(),
            })
        }
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        TaskList { tasks: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

fn whole_word(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    // \b misbehaves when the term itself starts or ends with punctuation
    let pattern = format!(r"(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(term));
    RegexBuilder::new(&pattern).case_insensitive(true).build().ok()
}

/// One task per line, prefixed with its 1-based index: `1.[T][ ] read book`.
impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, task) in self.tasks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}.{}", i + 1, task)?;
        }
        Ok(())
    }
}
