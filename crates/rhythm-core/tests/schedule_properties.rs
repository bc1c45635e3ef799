//! Property and end-to-end tests for the rule-to-schedule compiler.

use indoc::indoc;
use proptest::prelude::*;

use rhythm_core::schedule::{MinuteGrid, Rule, FREE_LABEL, MINUTES_PER_DAY};
use rhythm_core::DaySchedule;

fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        prop::sample::select(vec!["Sleep", "Work", "Gym", "Lunch", ""]),
        0u16..=1440,
        0u16..=1440,
    )
        .prop_map(|(name, start, end)| Rule::new(name, start, end))
}

proptest! {
    #[test]
    fn segments_partition_the_day(rules in prop::collection::vec(rule_strategy(), 0..12)) {
        let schedule = DaySchedule::from_rules(&rules);

        prop_assert!(!schedule.segments.is_empty());
        prop_assert_eq!(schedule.segments[0].start_minute, 0);
        prop_assert_eq!(
            schedule.segments.last().unwrap().end_minute as usize,
            MINUTES_PER_DAY
        );
        for pair in schedule.segments.windows(2) {
            prop_assert_eq!(pair[0].end_minute, pair[1].start_minute);
            prop_assert_ne!(&pair[0].label, &pair[1].label);
        }
        for segment in &schedule.segments {
            prop_assert!(segment.start_minute < segment.end_minute);
        }
    }

    #[test]
    fn free_and_busy_minutes_sum_to_a_day(rules in prop::collection::vec(rule_strategy(), 0..12)) {
        let schedule = DaySchedule::from_rules(&rules);
        let busy: u32 = schedule
            .segments
            .iter()
            .filter(|s| s.label != FREE_LABEL)
            .map(|s| u32::from(s.duration_minutes()))
            .sum();
        prop_assert_eq!(schedule.free_minutes + busy, MINUTES_PER_DAY as u32);
    }

    #[test]
    fn later_rules_win_overlaps(
        rules in prop::collection::vec(rule_strategy(), 1..8),
        minute in 0usize..1440,
    ) {
        let grid = MinuteGrid::from_rules(&rules);
        let expected = rules
            .iter()
            .rev()
            .find(|r| usize::from(r.start_minute) <= minute && minute < usize::from(r.end_minute))
            .map_or(FREE_LABEL, |r| r.name.as_str());
        prop_assert_eq!(grid.label(minute), expected);
    }

    #[test]
    fn text_form_reads_back(rules in prop::collection::vec(rule_strategy(), 0..12)) {
        let schedule = DaySchedule::from_rules(&rules);
        prop_assert_eq!(DaySchedule::from_text(&schedule.to_text()), schedule);
    }
}

#[test]
fn test_weekday_ruleset_compiles() {
    let ruleset = indoc! {"
        Weekday
        Sleep, 0:00, 7:00
        Breakfast, 7:00, 7:30   # quick
        Work, 9:00, 17:00
        Gym, 18:00, 19:00
        Sleep, 23:00, 24:00
    "};

    let schedule = DaySchedule::compile(ruleset);

    assert_eq!(
        schedule.to_text(),
        indoc! {"
            Sleep, 0:00, 7:00
            Breakfast, 7:00, 7:30
            Todo List, 7:30, 9:00
            Work, 9:00, 17:00
            Todo List, 17:00, 18:00
            Gym, 18:00, 19:00
            Todo List, 19:00, 23:00
            Sleep, 23:00, 24:00"}
    );
    assert_eq!(schedule.free_minutes, 90 + 60 + 240);
    assert_eq!(schedule.capacity_hours(), 6);
}

#[test]
fn test_overlapping_rules_last_one_wins() {
    let ruleset = indoc! {"
        Work, 9:00, 17:00
        Lunch, 12:00, 13:00
    "};

    let schedule = DaySchedule::compile(ruleset);
    let labels: Vec<&str> = schedule.segments.iter().map(|s| s.label.as_str()).collect();

    assert_eq!(
        labels,
        vec!["Todo List", "Work", "Lunch", "Work", "Todo List"]
    );
    assert_eq!(schedule.free_minutes, 1440 - 480);
}

#[test]
fn test_malformed_lines_are_ignored() {
    let ruleset = indoc! {"
        Title line
        Work, 9:00
        Nap, 25:00
        Reading, 20:00, 21:00
    "};

    let schedule = DaySchedule::compile(ruleset);

    assert_eq!(schedule.segments.len(), 3);
    assert_eq!(schedule.segments[1].label, "Reading");
    assert_eq!(schedule.free_minutes, 1380);
}
