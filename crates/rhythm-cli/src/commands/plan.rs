use clap::Subcommand;
use rhythm_core::{
    preview_day, AsanaTracker, DayPlan, GoogleCalendar, GoogleTasksList, Planner, RulesetStore,
};

use super::{load_config, today, weekday, CmdResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show the work items a reset would push, without changing anything
    Preview {
        /// Weekday name
        day: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Propagate completions, clear the to-do list, push the day's work
    /// items and load the schedule into the calendar
    Reset {
        /// Weekday name
        day: String,
    },
}

pub fn run(action: PlanAction) -> CmdResult {
    match action {
        PlanAction::Preview { day, json } => preview(&day, json),
        PlanAction::Reset { day } => reset(&day),
    }
}

pub fn preview(day: &str, json: bool) -> CmdResult {
    let config = load_config()?;
    let ruleset = RulesetStore::open_default()?.read_day(weekday(day)?)?;
    let tracker = AsanaTracker::from_config(&config.asana)?;

    let plan = preview_day(
        &tracker,
        config.planner.overdue_policy,
        day,
        &ruleset,
        today(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_items(&plan);
    }
    Ok(())
}

pub fn reset(day: &str) -> CmdResult {
    let config = load_config()?;
    let ruleset = RulesetStore::open_default()?.read_day(weekday(day)?)?;

    let tracker = AsanaTracker::from_config(&config.asana)?;
    let todo = GoogleTasksList::from_config(&config.google)?;
    let calendar = GoogleCalendar::from_config(&config.google)?;

    let plan = Planner::new(&tracker, &todo, &calendar)
        .with_policy(config.planner.overdue_policy)
        .with_offset(config.planner.offset()?)
        .reset_day(day, &ruleset, today())?;

    println!(
        "completed {} item(s), {} parent task(s)",
        plan.propagation.completed_leaves.len(),
        plan.propagation.completed_parents.len()
    );
    println!("cleared {} to-do entries", plan.cleared);
    print_items(&plan);
    println!("loaded {} calendar event(s)", plan.events);
    Ok(())
}

fn print_items(plan: &DayPlan) {
    println!(
        "{} ({} free min, {} slot(s))",
        plan.date,
        plan.schedule.free_minutes,
        plan.schedule.capacity_hours()
    );
    for item in &plan.items {
        println!("  {}  {}", item.due.date(), item.title);
    }
    if plan.deferred > 0 {
        println!("  ... {} more deferred", plan.deferred);
    }
}
