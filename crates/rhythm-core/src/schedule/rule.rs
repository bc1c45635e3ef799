//! Ruleset line parsing.
//!
//! A ruleset is plain text, one rule per line:
//!
//! ```text
//! Weekday
//! Sleep, 0:00, 7:30
//! Work, 9:00, 17:00   # lunch overrides below
//! Lunch, 12:00, 13:00
//! ```
//!
//! Anything that does not look like `name, HH:MM, HH:MM` is skipped without
//! complaint, which is what lets the first line carry a title.

use serde::{Deserialize, Serialize};

/// A named, half-open minute interval taken from one ruleset line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl Rule {
    pub fn new(name: impl Into<String>, start_minute: u16, end_minute: u16) -> Self {
        Self {
            name: name.into(),
            start_minute,
            end_minute,
        }
    }

    /// Parse a single line. Returns `None` for comments, titles and
    /// anything malformed.
    pub fn parse_line(line: &str) -> Option<Self> {
        let body = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let body = body.trim();

        let fields: Vec<&str> = body.split(", ").collect();
        if fields.len() != 3 {
            return None;
        }

        let start_minute = time_to_minutes(fields[1])?;
        let end_minute = time_to_minutes(fields[2])?;

        Some(Self::new(fields[0], start_minute, end_minute))
    }
}

/// Convert `HH:MM` into minutes since midnight.
///
/// Exactly two `:`-separated unsigned integers are required; no range check
/// is applied here, the allocator clamps on write.
pub fn time_to_minutes(time: &str) -> Option<u16> {
    let (hours, minutes) = time.split_once(':')?;
    if minutes.contains(':') {
        return None;
    }

    let hours: u16 = hours.trim().parse().ok()?;
    let minutes: u16 = minutes.trim().parse().ok()?;

    hours.checked_mul(60)?.checked_add(minutes)
}

/// Parse every line of a ruleset, keeping file order.
pub fn parse_rules<'a, I>(lines: I) -> Vec<Rule>
where
    I: IntoIterator<Item = &'a str>,
{
    let rules: Vec<Rule> = lines.into_iter().filter_map(Rule::parse_line).collect();
    tracing::debug!(count = rules.len(), "parsed ruleset");
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_rule() {
        let rule = Rule::parse_line("Work, 09:00, 17:30").unwrap();
        assert_eq!(rule, Rule::new("Work", 540, 1050));
    }

    #[test]
    fn strips_trailing_comment() {
        let rule = Rule::parse_line("Gym, 6:00, 7:00 # legs day").unwrap();
        assert_eq!(rule, Rule::new("Gym", 360, 420));
    }

    #[test]
    fn comment_only_line_is_skipped() {
        assert!(Rule::parse_line("# Sleep, 0:00, 7:00").is_none());
    }

    #[test]
    fn title_line_is_skipped() {
        assert!(Rule::parse_line("Monday").is_none());
        assert!(Rule::parse_line("").is_none());
    }

    #[test]
    fn wrong_field_count_is_skipped() {
        assert!(Rule::parse_line("Work, 9:00").is_none());
        assert!(Rule::parse_line("Work, 9:00, 10:00, 11:00").is_none());
        // separator must be comma + space
        assert!(Rule::parse_line("Work,9:00,10:00").is_none());
    }

    #[test]
    fn malformed_time_skips_rule() {
        assert!(Rule::parse_line("Work, 9, 10:00").is_none());
        assert!(Rule::parse_line("Work, 9:00:00, 10:00").is_none());
        assert!(Rule::parse_line("Work, nine:00, 10:00").is_none());
        assert!(Rule::parse_line("Work, 9:00, -1:00").is_none());
    }

    #[test]
    fn time_to_minutes_values() {
        assert_eq!(time_to_minutes("0:00"), Some(0));
        assert_eq!(time_to_minutes("07:05"), Some(425));
        assert_eq!(time_to_minutes("24:00"), Some(1440));
        assert_eq!(time_to_minutes("7"), None);
    }

    #[test]
    fn parse_rules_keeps_order() {
        let text = "Day\nA, 1:00, 2:00\nnonsense\nB, 0:30, 1:30";
        let rules = parse_rules(text.lines());
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name, "A");
        assert_eq!(rules[1].name, "B");
    }
}
