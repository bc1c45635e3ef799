//! # Rhythm Core Library
//!
//! Core logic for Rhythm, a daily planner that turns a weekday's ruleset into
//! a minute-accurate schedule, fits open tracker tasks into the free hours
//! and keeps the to-do list, tracker and calendar in step.
//!
//! ## Architecture
//!
//! - **Schedule**: ruleset parser, 1440-minute grid allocator and run-length
//!   compressor
//! - **Calendar**: weekday anchoring and local timestamps
//! - **Task**: due-date distribution, capacity selection and completion
//!   propagation
//! - **Integrations**: Asana, Google Tasks and Google Calendar behind traits
//! - **Storage**: TOML configuration and ruleset files
//!
//! ## Key Components
//!
//! - [`DaySchedule`]: compiled schedule for one day
//! - [`Distributor`]: assigns due dates to open work
//! - [`Planner`]: the full day reset
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod integrations;
pub mod logging;
pub mod planner;
pub mod schedule;
pub mod storage;
pub mod task;

pub use calendar::{anchor_date, day_to_date, parse_weekday};
pub use error::{ConfigError, CoreError, ValidationError};
pub use integrations::{
    AsanaTracker, CalendarSink, GoogleCalendar, GoogleTasksList, TaskTracker, TodoEntry, TodoList,
};
pub use planner::{preview_day, DayPlan, Planner};
pub use schedule::{DaySchedule, MinuteGrid, Rule, Segment};
pub use storage::{Config, RulesetStore};
pub use task::{
    propagate_completion, select_for_capacity, Distributor, LeafId, OverduePolicy,
    PropagationReport, Subtask, Task, WorkItem,
};
