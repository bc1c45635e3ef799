//! Minute-of-day grid.
//!
//! The grid is a fixed arena of 1440 labels. Rules are folded into it in
//! order, so a later rule always overwrites an earlier one where they
//! overlap.

use super::rule::Rule;

/// Minutes in one day.
pub const MINUTES_PER_DAY: usize = 24 * 60;

/// Label of every minute no rule claimed.
pub const FREE_LABEL: &str = "Todo List";

/// One label per minute of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteGrid {
    slots: Vec<String>,
}

impl MinuteGrid {
    /// A grid with every minute free.
    pub fn new() -> Self {
        Self {
            slots: vec![FREE_LABEL.to_string(); MINUTES_PER_DAY],
        }
    }

    /// Fold rules into a fresh grid in the order given.
    pub fn from_rules(rules: &[Rule]) -> Self {
        rules.iter().fold(Self::new(), |mut grid, rule| {
            grid.apply(rule);
            grid
        })
    }

    /// Overwrite `[start, end)` with the rule name. Empty or inverted ranges
    /// write nothing; ranges running past midnight stop at 1440.
    pub fn apply(&mut self, rule: &Rule) {
        let start = usize::from(rule.start_minute).min(MINUTES_PER_DAY);
        let end = usize::from(rule.end_minute).min(MINUTES_PER_DAY);

        if start >= end {
            tracing::trace!(rule = %rule.name, start, end, "empty range, nothing to write");
            return;
        }

        for slot in &mut self.slots[start..end] {
            slot.clone_from(&rule.name);
        }
    }

    pub fn label(&self, minute: usize) -> &str {
        &self.slots[minute]
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Minutes still carrying [`FREE_LABEL`].
    pub fn free_minutes(&self) -> u32 {
        self.slots.iter().filter(|s| s.as_str() == FREE_LABEL).count() as u32
    }
}

impl Default for MinuteGrid {
    fn default() -> Self {
        Self::new()
    }
}
