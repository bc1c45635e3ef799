//! Ruleset files on disk.
//!
//! ```text
//! <data dir>/
//!   rulesets/<name>.txt          reusable templates
//!   current_rulesets/<day>.txt   the ruleset in force for each weekday
//! ```
//!
//! The first line of every file is its title.

use std::path::{Path, PathBuf};

use chrono::Weekday;

use super::data_dir;
use crate::error::{Result, ValidationError};

const TEMPLATES_DIR: &str = "rulesets";
const CURRENT_DIR: &str = "current_rulesets";

pub struct RulesetStore {
    root: PathBuf,
}

impl RulesetStore {
    /// Store rooted at `root`; both subdirectories are created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { root: root.into() };
        std::fs::create_dir_all(store.templates_dir())?;
        std::fs::create_dir_all(store.current_dir())?;
        Ok(store)
    }

    /// Store under the default data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(data_dir()?)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn current_dir(&self) -> PathBuf {
        self.root.join(CURRENT_DIR)
    }

    pub fn template_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.templates_dir().join(file_name(name)?))
    }

    pub fn day_path(&self, day: Weekday) -> PathBuf {
        self.current_dir().join(format!("{}.txt", day_key(day)))
    }

    /// Titles of every template, ordered by file name.
    pub fn list_templates(&self) -> Result<Vec<String>> {
        list_titles(&self.templates_dir())
    }

    /// Titles of every per-day ruleset, ordered by file name.
    pub fn list_current(&self) -> Result<Vec<String>> {
        list_titles(&self.current_dir())
    }

    /// Create a template whose only line is its title. An existing template
    /// is left untouched.
    pub fn create_template(&self, name: &str) -> Result<PathBuf> {
        let path = self.template_path(name)?;
        if !path.exists() {
            std::fs::write(&path, format!("{name}\n"))?;
            tracing::info!(path = %path.display(), "created ruleset");
        }
        Ok(path)
    }

    /// Path of the day's ruleset, seeding it with the day name if missing.
    pub fn ensure_day(&self, day: Weekday) -> Result<PathBuf> {
        let path = self.day_path(day);
        if !path.exists() {
            std::fs::write(&path, capitalize(&day_key(day)))?;
        }
        Ok(path)
    }

    /// Contents of the day's ruleset, or an empty ruleset if none exists.
    pub fn read_day(&self, day: Weekday) -> Result<String> {
        let path = self.day_path(day);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no ruleset for day, whole day is free");
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Lowercase full weekday name, as used for file names.
pub fn day_key(day: Weekday) -> String {
    let name = match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    };
    name.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn file_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed.starts_with('.') {
        return Err(ValidationError::InvalidRulesetName(name.to_string()).into());
    }
    Ok(format!("{trimmed}.txt"))
}

fn list_titles(dir: &Path) -> Result<Vec<String>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut titles = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(&path)?;
        titles.push(text.lines().next().unwrap_or_default().trim().to_string());
    }
    Ok(titles)
}
