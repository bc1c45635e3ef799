pub mod config;
pub mod plan;
pub mod rules;
pub mod schedule;
pub mod shell;
pub mod tasklists;

use chrono::{Local, NaiveDate, Weekday};
use rhythm_core::{parse_weekday, Config};

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Config from disk with env token overrides applied.
pub fn load_config() -> CmdResult<Config> {
    Ok(Config::load()?.with_env_overrides())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn weekday(name: &str) -> CmdResult<Weekday> {
    Ok(parse_weekday(name)?)
}

/// Open `path` in `$EDITOR` (falling back to `vi`) and wait for it.
pub fn edit_file(path: &std::path::Path) -> CmdResult {
    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());

    let status = std::process::Command::new(&editor).arg(path).status()?;
    if !status.success() {
        return Err(format!("{editor} exited with {status}").into());
    }
    Ok(())
}
