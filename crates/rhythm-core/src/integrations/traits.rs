use chrono::{FixedOffset, NaiveDate};

use crate::error::Result;
use crate::schedule::DaySchedule;
use crate::task::{LeafId, Subtask, Task, WorkItem};

/// The task tracker work comes from (Asana in practice).
///
/// Calls block until the remote side answers; any failure aborts the
/// enclosing operation.
pub trait TaskTracker {
    /// Incomplete tasks that have a due date, each with its subtasks.
    /// `completed_since` is forwarded to the tracker as its lower bound.
    fn open_tasks(&self, completed_since: NaiveDate) -> Result<Vec<Task>>;

    /// Current subtasks of `parent_gid`, completed ones included.
    fn subtasks(&self, parent_gid: &str) -> Result<Vec<Subtask>>;

    /// Mark a task or subtask complete.
    fn complete(&self, gid: &str) -> Result<()>;
}

/// A to-do list entry as read back from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEntry {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub completed: bool,
}

/// The to-do list the day's work items are pushed to (Google Tasks).
pub trait TodoList {
    fn add(&self, item: &WorkItem) -> Result<()>;

    /// Every entry on the list, hidden/completed ones included.
    fn entries(&self) -> Result<Vec<TodoEntry>>;

    fn remove(&self, id: &str) -> Result<()>;

    /// Leaf identifiers of every completed entry, read from the second line
    /// of its notes. Entries not created by the planner are skipped.
    fn completed_leaf_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.completed)
            .filter_map(|entry| LeafId::from_notes(&entry.notes))
            .map(|leaf| leaf.to_string())
            .collect())
    }

    /// Remove every entry.
    fn clear(&self) -> Result<usize> {
        let entries = self.entries()?;
        for entry in &entries {
            self.remove(&entry.id)?;
        }
        Ok(entries.len())
    }
}

/// The calendar the day's schedule is loaded into (Google Calendar).
pub trait CalendarSink {
    /// Create one event per segment on `date`.
    fn load_schedule(
        &self,
        schedule: &DaySchedule,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<usize>;
}
