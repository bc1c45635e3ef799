//! The day reset workflow.
//!
//! Resetting a day:
//! 1. completions ticked off on the to-do list are pushed back to the tracker
//! 2. the to-do list is cleared
//! 3. the day's ruleset is compiled into a schedule
//! 4. open tasks are distributed and cut down to the free hours
//! 5. the surviving work items are added to the to-do list
//! 6. the schedule is loaded into the calendar

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;

use crate::calendar::anchor_date;
use crate::error::Result;
use crate::integrations::{CalendarSink, TaskTracker, TodoList};
use crate::schedule::DaySchedule;
use crate::task::{
    propagate_completion, select_for_capacity, Distributor, OverduePolicy, PropagationReport,
    WorkItem,
};

/// Outcome of planning one day.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub schedule: DaySchedule,
    /// Admitted work items, soonest due first.
    pub items: Vec<WorkItem>,
    /// Work items that did not fit into the free hours.
    pub deferred: usize,
    #[serde(skip)]
    pub propagation: PropagationReport,
    /// Entries removed from the to-do list before pushing.
    pub cleared: usize,
    /// Calendar events created.
    pub events: usize,
}

/// Wires the schedule compiler and task distribution to the collaborators.
pub struct Planner<'a> {
    tracker: &'a dyn TaskTracker,
    todo: &'a dyn TodoList,
    calendar: &'a dyn CalendarSink,
    policy: OverduePolicy,
    offset: FixedOffset,
}

impl<'a> Planner<'a> {
    pub fn new(
        tracker: &'a dyn TaskTracker,
        todo: &'a dyn TodoList,
        calendar: &'a dyn CalendarSink,
    ) -> Self {
        Self {
            tracker,
            todo,
            calendar,
            policy: OverduePolicy::default(),
            offset: Utc.fix(),
        }
    }

    pub fn with_policy(mut self, policy: OverduePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Compile the ruleset and pick the day's work items without touching
    /// the to-do list or the calendar.
    pub fn preview(&self, weekday: &str, ruleset: &str, today: NaiveDate) -> Result<DayPlan> {
        preview_day(self.tracker, self.policy, weekday, ruleset, today)
    }

    /// Run the full reset for `weekday`.
    pub fn reset_day(&self, weekday: &str, ruleset: &str, today: NaiveDate) -> Result<DayPlan> {
        // validate the weekday before any side effect
        anchor_date(weekday, today)?;

        let completed = self.todo.completed_leaf_ids()?;
        let propagation = propagate_completion(self.tracker, &completed)?;

        let cleared = self.todo.clear()?;
        tracing::info!(cleared, "cleared to-do list");

        let mut plan = self.preview(weekday, ruleset, today)?;

        // pushed newest-first so the soonest item ends up on top
        for item in plan.items.iter().rev() {
            self.todo.add(item)?;
        }

        plan.events = self
            .calendar
            .load_schedule(&plan.schedule, plan.date, self.offset)?;
        plan.propagation = propagation;
        plan.cleared = cleared;

        tracing::info!(
            date = %plan.date,
            items = plan.items.len(),
            deferred = plan.deferred,
            events = plan.events,
            "day reset"
        );
        Ok(plan)
    }
}

/// Plan a day from the tracker alone: compile, anchor, distribute and cut
/// to capacity.
pub fn preview_day(
    tracker: &dyn TaskTracker,
    policy: OverduePolicy,
    weekday: &str,
    ruleset: &str,
    today: NaiveDate,
) -> Result<DayPlan> {
    let date = anchor_date(weekday, today)?;
    let schedule = DaySchedule::compile(ruleset);

    let tasks = tracker.open_tasks(date)?;
    let items = Distributor::new(date).with_policy(policy).distribute(&tasks);
    let total = items.len();
    let items = select_for_capacity(items, schedule.free_minutes);

    Ok(DayPlan {
        date,
        deferred: total - items.len(),
        schedule,
        items,
        propagation: PropagationReport::default(),
        cleared: 0,
        events: 0,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::integrations::TodoEntry;
    use crate::task::{Subtask, Task};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[derive(Default)]
    struct FakeTracker {
        tasks: Vec<Task>,
        completed: RefCell<Vec<String>>,
    }

    impl TaskTracker for FakeTracker {
        fn open_tasks(&self, _completed_since: NaiveDate) -> Result<Vec<Task>> {
            Ok(self.tasks.clone())
        }

        fn subtasks(&self, parent_gid: &str) -> Result<Vec<Subtask>> {
            let done = self.completed.borrow();
            Ok(self
                .tasks
                .iter()
                .filter(|t| t.gid == parent_gid)
                .flat_map(|t| t.subtasks.clone())
                .map(|mut s| {
                    s.completed |= done.contains(&s.gid);
                    s
                })
                .collect())
        }

        fn complete(&self, gid: &str) -> Result<()> {
            self.completed.borrow_mut().push(gid.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeTodo {
        entries: RefCell<Vec<TodoEntry>>,
    }

    impl TodoList for FakeTodo {
        fn add(&self, item: &WorkItem) -> Result<()> {
            let mut entries = self.entries.borrow_mut();
            let id = format!("todo-{}", entries.len());
            entries.push(TodoEntry {
                id,
                title: item.title.clone(),
                notes: item.notes.clone(),
                completed: false,
            });
            Ok(())
        }

        fn entries(&self) -> Result<Vec<TodoEntry>> {
            Ok(self.entries.borrow().clone())
        }

        fn remove(&self, id: &str) -> Result<()> {
            self.entries.borrow_mut().retain(|e| e.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeCalendar {
        loaded: RefCell<Vec<(NaiveDate, usize)>>,
    }

    impl CalendarSink for FakeCalendar {
        fn load_schedule(
            &self,
            schedule: &DaySchedule,
            date: NaiveDate,
            _offset: FixedOffset,
        ) -> Result<usize> {
            self.loaded.borrow_mut().push((date, schedule.segments.len()));
            Ok(schedule.segments.len())
        }
    }

    fn tracker() -> FakeTracker {
        FakeTracker {
            tasks: vec![
                Task::new("1", "Essay", Some(date(2026, 10, 24))).with_subtasks(vec![
                    Subtask::new("11", "Outline", false),
                    Subtask::new("12", "Draft", false),
                ]),
                Task::new("2", "Laundry", Some(date(2026, 10, 20))),
                Task::new("3", "Taxes", Some(date(2026, 11, 30))),
            ],
            ..Default::default()
        }
    }

    // a Sunday
    fn today() -> NaiveDate {
        date(2026, 10, 18)
    }

    #[test]
    fn preview_leaves_collaborators_untouched() {
        let tracker = tracker();
        let todo = FakeTodo::default();
        let calendar = FakeCalendar::default();
        let planner = Planner::new(&tracker, &todo, &calendar);

        let plan = planner.preview("monday", "Sleep, 0:00, 22:00", today()).unwrap();

        assert_eq!(plan.date, date(2026, 10, 19));
        assert_eq!(plan.schedule.free_minutes, 120);
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.deferred, 2);
        assert!(todo.entries.borrow().is_empty());
        assert!(calendar.loaded.borrow().is_empty());
    }

    #[test]
    fn reset_pushes_soonest_item_last() {
        let tracker = tracker();
        let todo = FakeTodo::default();
        let calendar = FakeCalendar::default();
        let planner = Planner::new(&tracker, &todo, &calendar);

        let plan = planner.reset_day("Monday", "", today()).unwrap();

        let titles: Vec<String> = todo.entries.borrow().iter().map(|e| e.title.clone()).collect();
        let mut expected: Vec<String> = plan.items.iter().map(|i| i.title.clone()).collect();
        expected.reverse();
        assert_eq!(titles, expected);
        assert_eq!(plan.items.len(), 4);
        assert_eq!(titles.last().map(String::as_str), Some("Laundry"));
        assert_eq!(*calendar.loaded.borrow(), vec![(date(2026, 10, 19), 1)]);
        assert_eq!(plan.events, 1);
    }

    #[test]
    fn reset_propagates_and_clears_previous_day() {
        let tracker = tracker();
        let todo = FakeTodo::default();
        todo.entries.borrow_mut().extend([
            TodoEntry {
                id: "a".into(),
                title: "Outline | Essay".into(),
                notes: "Other | Other\n11 1".into(),
                completed: true,
            },
            TodoEntry {
                id: "b".into(),
                title: "Draft | Essay".into(),
                notes: "Other | Other\n12 1".into(),
                completed: true,
            },
            TodoEntry {
                id: "c".into(),
                title: "Groceries".into(),
                notes: String::new(),
                completed: true,
            },
        ]);
        let calendar = FakeCalendar::default();
        let planner = Planner::new(&tracker, &todo, &calendar);

        let plan = planner.reset_day("tuesday", "", today()).unwrap();

        assert_eq!(plan.cleared, 3);
        assert_eq!(*tracker.completed.borrow(), vec!["11", "12", "1"]);
        assert_eq!(plan.propagation.completed_parents, vec!["1".to_string()]);
    }

    #[test]
    fn bad_weekday_has_no_side_effects() {
        let tracker = tracker();
        let todo = FakeTodo::default();
        todo.add(&WorkItem::for_task(&tracker.tasks[1], today())).unwrap();
        let calendar = FakeCalendar::default();
        let planner = Planner::new(&tracker, &todo, &calendar);

        assert!(planner.reset_day("someday", "", today()).is_err());
        assert_eq!(todo.entries.borrow().len(), 1);
        assert!(calendar.loaded.borrow().is_empty());
    }
}
