//! Due-date distribution of tasks and subtasks.
//!
//! A task without open subtasks becomes one work item due on the task's own
//! due date. A task with N open subtasks becomes N work items spread between
//! the anchor date and the task's due date:
//!
//! ```text
//! ratio  = days(due - anchor) / N
//! due[i] = anchor + floor((i + 1) * ratio)
//! ```
//!
//! so the last subtask lands on the due date and earlier ones are spaced
//! evenly ahead of it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Task, WorkItem};

/// What to do with subtasks of a task whose due date is already behind the
/// anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverduePolicy {
    /// Treat the window as zero days: every subtask is due on the anchor date.
    #[default]
    ClampToAnchor,
    /// Leave every subtask due on the task's own (past) due date.
    TaskDueDate,
}

/// Spreads leaves of tasks across the window ending at each task's due date.
#[derive(Debug, Clone)]
pub struct Distributor {
    anchor: NaiveDate,
    policy: OverduePolicy,
}

impl Distributor {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            policy: OverduePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: OverduePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Work items for every leaf of every task, soonest due first.
    ///
    /// Completed tasks and tasks without a due date are skipped; the tracker
    /// normally filters those out already. Equal due dates keep input order.
    pub fn distribute(&self, tasks: &[Task]) -> Vec<WorkItem> {
        let mut items: Vec<WorkItem> = Vec::new();

        for task in tasks {
            let Some(due) = task.due_date else {
                tracing::debug!(gid = %task.gid, "skipping task without due date");
                continue;
            };
            if task.completed {
                tracing::debug!(gid = %task.gid, "skipping completed task");
                continue;
            }

            items.extend(self.leaves(task, due));
        }

        items.sort_by(|a, b| a.due.cmp(&b.due));
        items
    }

    fn leaves(&self, task: &Task, due: NaiveDate) -> Vec<WorkItem> {
        let open: Vec<_> = task.open_subtasks().collect();
        if open.is_empty() {
            return vec![WorkItem::for_task(task, due)];
        }

        let delta_days = (due - self.anchor).num_days();
        if delta_days < 0 && self.policy == OverduePolicy::TaskDueDate {
            return open
                .iter()
                .map(|subtask| WorkItem::for_subtask(task, subtask, due))
                .collect();
        }

        let dates = spread_dates(self.anchor, delta_days.max(0), open.len());
        open.iter()
            .zip(dates)
            .map(|(subtask, date)| WorkItem::for_subtask(task, subtask, date))
            .collect()
    }
}

/// `count` front-loaded dates across `window_days` days after `anchor`.
pub fn spread_dates(anchor: NaiveDate, window_days: i64, count: usize) -> Vec<NaiveDate> {
    if count == 0 {
        return Vec::new();
    }

    // floor((i + 1) * window / count) without going through floats
    let count = count as i64;
    (1..=count)
        .map(|position| anchor + Duration::days(position * window_days / count))
        .collect()
}

/// Keep the soonest-due items that fit into the day's free whole hours.
pub fn select_for_capacity(mut items: Vec<WorkItem>, free_minutes: u32) -> Vec<WorkItem> {
    let capacity = (free_minutes / 60) as usize;
    if items.len() > capacity {
        tracing::info!(
            capacity,
            dropped = items.len() - capacity,
            "trimming work items to free capacity"
        );
        items.truncate(capacity);
    }
    items
}
