//! Run-length compression of the minute grid into schedule segments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{MinuteGrid, MINUTES_PER_DAY};
use super::rule::time_to_minutes;

/// A contiguous span of the day with a single label, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl Segment {
    pub fn new(label: impl Into<String>, start_minute: u16, end_minute: u16) -> Self {
        Self {
            label: label.into(),
            start_minute,
            end_minute,
        }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Parse one `name, H:MM, H:MM` schedule line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim().split(", ").collect();
        if fields.len() != 3 {
            return None;
        }
        let start = time_to_minutes(fields[1])?;
        let end = time_to_minutes(fields[2])?;
        Some(Self::new(fields[0], start, end))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.label,
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        )
    }
}

/// Format minutes since midnight as `H:MM` (1440 renders as `24:00`).
pub fn format_minute(minute: u16) -> String {
    format!("{}:{:02}", minute / 60, minute % 60)
}

/// Split the grid into maximal runs of equal labels.
pub fn compress(grid: &MinuteGrid) -> Vec<Segment> {
    let slots = grid.slots();
    let mut segments = Vec::new();
    let mut start = 0;

    while start < slots.len() {
        let label = &slots[start];
        let end = slots[start..]
            .iter()
            .position(|s| s != label)
            .map_or(MINUTES_PER_DAY, |offset| start + offset);

        segments.push(Segment::new(label.clone(), start as u16, end as u16));
        start = end;
    }

    segments
}
