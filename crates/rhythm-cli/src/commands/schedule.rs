use std::path::PathBuf;

use clap::Subcommand;
use rhythm_core::{anchor_date, CalendarSink, DaySchedule, GoogleCalendar, RulesetStore};

use super::{load_config, today, weekday, CmdResult};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Compile the ruleset in force for a weekday
    Show {
        /// Weekday name (e.g. "monday", "fri")
        day: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a ruleset file
    Compile {
        /// Path to a ruleset file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load schedule text (as printed by `compile`) into the calendar
    Load {
        /// Path to a schedule file
        file: PathBuf,
        /// Weekday the schedule is for
        day: String,
    },
}

pub fn run(action: ScheduleAction) -> CmdResult {
    match action {
        ScheduleAction::Show { day, json } => show(&day, json),
        ScheduleAction::Compile { file, json } => {
            let ruleset = std::fs::read_to_string(&file)?;
            print_schedule(&DaySchedule::compile(&ruleset), json)
        }
        ScheduleAction::Load { file, day } => load(&file, &day),
    }
}

pub fn load(file: &std::path::Path, day: &str) -> CmdResult {
    let text = std::fs::read_to_string(file)?;
    let schedule = DaySchedule::from_text(&text);
    if schedule.segments.is_empty() {
        return Err(format!("no schedule lines in {}", file.display()).into());
    }

    let config = load_config()?;
    let date = anchor_date(day, today())?;
    let calendar = GoogleCalendar::from_config(&config.google)?;
    let events = calendar.load_schedule(&schedule, date, config.planner.offset()?)?;
    println!("loaded {events} calendar event(s) on {date}");
    Ok(())
}

pub fn show(day: &str, json: bool) -> CmdResult {
    let store = RulesetStore::open_default()?;
    let ruleset = store.read_day(weekday(day)?)?;
    print_schedule(&DaySchedule::compile(&ruleset), json)
}

fn print_schedule(schedule: &DaySchedule, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(schedule)?);
    } else {
        println!("{}", schedule.to_text());
        println!(
            "free: {} min ({} h)",
            schedule.free_minutes,
            schedule.capacity_hours()
        );
    }
    Ok(())
}
