//! Rule-to-schedule compiler.
//!
//! Ruleset text goes through three stages:
//! - [`rule`] parses lines into named minute intervals
//! - [`grid`] folds those intervals into a 1440-minute grid
//! - [`segment`] run-length compresses the grid into ordered segments
//!
//! [`DaySchedule`] bundles the segments with the number of minutes no rule
//! claimed; that number sizes how many tasks the planner admits for the day.

pub mod grid;
pub mod rule;
pub mod segment;

use serde::{Deserialize, Serialize};

pub use grid::{MinuteGrid, FREE_LABEL, MINUTES_PER_DAY};
pub use rule::{parse_rules, time_to_minutes, Rule};
pub use segment::{compress, format_minute, Segment};

/// A compiled day: segments covering `[0, 1440)` plus the free-minute budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub segments: Vec<Segment>,
    pub free_minutes: u32,
}

impl DaySchedule {
    /// Compile ruleset text into a schedule.
    pub fn compile(ruleset: &str) -> Self {
        let rules = parse_rules(ruleset.lines());
        Self::from_rules(&rules)
    }

    pub fn from_rules(rules: &[Rule]) -> Self {
        let grid = MinuteGrid::from_rules(rules);
        let schedule = Self {
            segments: compress(&grid),
            free_minutes: grid.free_minutes(),
        };
        tracing::debug!(
            segments = schedule.segments.len(),
            free_minutes = schedule.free_minutes,
            "compiled day schedule"
        );
        schedule
    }

    /// Read back schedule text. Malformed lines are skipped; free minutes are
    /// recounted from segments labelled [`FREE_LABEL`].
    pub fn from_text(text: &str) -> Self {
        let segments: Vec<Segment> = text.lines().filter_map(Segment::parse_line).collect();
        let free_minutes = segments
            .iter()
            .filter(|s| s.label == FREE_LABEL)
            .map(|s| u32::from(s.duration_minutes()))
            .sum();
        Self {
            segments,
            free_minutes,
        }
    }

    /// One `name, H:MM, H:MM` line per segment, no trailing newline.
    pub fn to_text(&self) -> String {
        self.segments
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whole free hours; the planner admits this many work items.
    pub fn capacity_hours(&self) -> usize {
        (self.free_minutes / 60) as usize
    }
}
