//! Tracker tasks and the to-do items derived from them.
//!
//! A [`Task`] comes from the external tracker and may carry subtasks. The
//! [`distribute`] module turns tasks into dated [`WorkItem`]s, one per leaf;
//! [`propagate`] later rolls completed leaves back up to their parents.

pub mod distribute;
pub mod propagate;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub use distribute::{select_for_capacity, Distributor, OverduePolicy};
pub use propagate::{propagate_completion, PropagationReport};

/// Section/project label used when the tracker reports no membership.
pub const UNFILED: &str = "Other";

/// A task read from the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub gid: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub section: String,
    pub project: String,
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(
        gid: impl Into<String>,
        title: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            gid: gid.into(),
            title: title.into(),
            due_date,
            section: UNFILED.to_string(),
            project: UNFILED.to_string(),
            completed: false,
            subtasks: Vec::new(),
        }
    }

    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.subtasks = subtasks;
        self
    }

    pub fn with_membership(
        mut self,
        section: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        self.section = section.into();
        self.project = project.into();
        self
    }

    /// Subtasks that still need doing, in tracker order.
    pub fn open_subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks.iter().filter(|s| !s.completed)
    }

    /// First line of every work item's notes.
    fn membership_line(&self) -> String {
        format!("{} | {}", self.section, self.project)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub gid: String,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(gid: impl Into<String>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            gid: gid.into(),
            title: title.into(),
            completed,
        }
    }
}

/// Identifies a completed leaf: a whole task, or a subtask with its parent.
///
/// The string form is `"<gid>"` or `"<subtask_gid> <parent_gid>"`; it is
/// stored on the second line of a work item's notes so completion can be
/// read back from the to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafId {
    Task { gid: String },
    Subtask { gid: String, parent: String },
}

impl LeafId {
    /// The gid to mark complete in the tracker.
    pub fn gid(&self) -> &str {
        match self {
            LeafId::Task { gid } | LeafId::Subtask { gid, .. } => gid,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            LeafId::Task { .. } => None,
            LeafId::Subtask { parent, .. } => Some(parent),
        }
    }

    /// Pull the identifier off the second line of work item notes.
    pub fn from_notes(notes: &str) -> Option<Self> {
        notes.lines().nth(1)?.parse().ok()
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafId::Task { gid } => write!(f, "{gid}"),
            LeafId::Subtask { gid, parent } => write!(f, "{gid} {parent}"),
        }
    }
}

impl FromStr for LeafId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(gid), None, None) => Ok(LeafId::Task {
                gid: gid.to_string(),
            }),
            (Some(gid), Some(parent), None) => Ok(LeafId::Subtask {
                gid: gid.to_string(),
                parent: parent.to_string(),
            }),
            _ => Err(ValidationError::InvalidLeafId(s.to_string())),
        }
    }
}

/// A dated to-do entry for one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub title: String,
    pub notes: String,
    #[serde(with = "due_format")]
    pub due: NaiveDateTime,
}

impl WorkItem {
    /// Work item for a task with no open subtasks, due at midnight.
    pub fn for_task(task: &Task, due: NaiveDate) -> Self {
        let leaf = LeafId::Task {
            gid: task.gid.clone(),
        };
        Self {
            title: task.title.clone(),
            notes: format!("{}\n{}", task.membership_line(), leaf),
            due: due.and_time(NaiveTime::MIN),
        }
    }

    /// Work item for one open subtask, due at midnight.
    pub fn for_subtask(task: &Task, subtask: &Subtask, due: NaiveDate) -> Self {
        let leaf = LeafId::Subtask {
            gid: subtask.gid.clone(),
            parent: task.gid.clone(),
        };
        Self {
            title: format!("{} | {}", subtask.title, task.title),
            notes: format!("{}\n{}", task.membership_line(), leaf),
            due: due.and_time(NaiveTime::MIN),
        }
    }

    pub fn leaf_id(&self) -> Option<LeafId> {
        LeafId::from_notes(&self.notes)
    }

    /// `due` as sent to the to-do list, e.g. `2026-10-20T00:00:00Z`.
    pub fn due_rfc3339(&self) -> String {
        due_format::render(&self.due)
    }
}

/// ISO-8601 with a literal `Z`; the to-do list treats `due` as UTC.
pub mod due_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn render(due: &NaiveDateTime) -> String {
        due.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(due: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&render(due))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| {
                chrono::DateTime::parse_from_rfc3339(&raw).map(|dt| dt.naive_utc())
            })
            .map_err(serde::de::Error::custom)
    }
}
