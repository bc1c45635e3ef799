//! TOML-based application configuration.
//!
//! Stores:
//! - Asana access token, assignee and workspace
//! - Google access token, task list, calendar and event color
//! - Planner options (overdue policy, UTC offset for calendar events)
//!
//! Configuration is stored at `~/.config/rhythm/config.toml`. Access tokens
//! can also come from `RHYTHM_ASANA_TOKEN` / `RHYTHM_GOOGLE_TOKEN`.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::parse_utc_offset;
use crate::error::{ConfigError, Result};
use crate::integrations::{asana, google_calendar, google_tasks};
use crate::task::OverduePolicy;

pub const ASANA_TOKEN_ENV: &str = "RHYTHM_ASANA_TOKEN";
pub const GOOGLE_TOKEN_ENV: &str = "RHYTHM_GOOGLE_TOKEN";

/// Asana connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsanaConfig {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub assignee_gid: String,
    #[serde(default)]
    pub workspace_gid: String,
    #[serde(default = "default_asana_base_url")]
    pub base_url: String,
}

/// Google Tasks + Calendar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub access_token: String,
    /// Task list the day's work items go to; see `rhythm tasklists`.
    #[serde(default)]
    pub tasklist_id: String,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default)]
    pub color_id: Option<String>,
    #[serde(default = "default_tasks_base_url")]
    pub tasks_base_url: String,
    #[serde(default = "default_calendar_base_url")]
    pub calendar_base_url: String,
}

/// Planner behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub overdue_policy: OverduePolicy,
    /// Offset written on calendar event timestamps, e.g. `-04:00`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/rhythm/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub asana: AsanaConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

// Default functions
fn default_asana_base_url() -> String {
    asana::DEFAULT_BASE_URL.into()
}
fn default_calendar_id() -> String {
    "primary".into()
}
fn default_tasks_base_url() -> String {
    google_tasks::DEFAULT_BASE_URL.into()
}
fn default_calendar_base_url() -> String {
    google_calendar::DEFAULT_BASE_URL.into()
}
fn default_utc_offset() -> String {
    "+00:00".into()
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            assignee_gid: String::new(),
            workspace_gid: String::new(),
            base_url: default_asana_base_url(),
        }
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            tasklist_id: String::new(),
            calendar_id: default_calendar_id(),
            color_id: None,
            tasks_base_url: default_tasks_base_url(),
            calendar_base_url: default_calendar_base_url(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            overdue_policy: OverduePolicy::default(),
            utc_offset: default_utc_offset(),
        }
    }
}

impl PlannerConfig {
    pub fn offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid(format!("'{key}' is a section, not a value")));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (including an unparseable UTC offset or overdue policy).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.planner.offset()?;
        *self = updated;
        Ok(())
    }

    /// Copy of this config with access tokens taken from the environment
    /// where set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(ASANA_TOKEN_ENV) {
            if !token.is_empty() {
                self.asana.access_token = token;
            }
        }
        if let Ok(token) = std::env::var(GOOGLE_TOKEN_ENV) {
            if !token.is_empty() {
                self.google.access_token = token;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.google.calendar_id, "primary");
        assert_eq!(parsed.planner.overdue_policy, OverduePolicy::ClampToAnchor);
        assert_eq!(parsed.asana.base_url, asana::DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_file_gets_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.planner.utc_offset, "+00:00");
        assert!(parsed.google.color_id.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("google.calendar_id").as_deref(), Some("primary"));
        assert_eq!(
            cfg.get("planner.overdue_policy").as_deref(),
            Some("clamp_to_anchor")
        );
        assert!(cfg.get("google.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_string() {
        let mut cfg = Config::default();
        cfg.set("asana.workspace_gid", "1200").unwrap();
        assert_eq!(cfg.asana.workspace_gid, "1200");
    }

    #[test]
    fn set_optional_color() {
        let mut cfg = Config::default();
        cfg.set("google.color_id", "7").unwrap();
        assert_eq!(cfg.google.color_id.as_deref(), Some("7"));
    }

    #[test]
    fn set_overdue_policy() {
        let mut cfg = Config::default();
        cfg.set("planner.overdue_policy", "task_due_date").unwrap();
        assert_eq!(cfg.planner.overdue_policy, OverduePolicy::TaskDueDate);
        assert!(cfg.set("planner.overdue_policy", "never").is_err());
    }

    #[test]
    fn set_rejects_unknown_key_and_sections() {
        let mut cfg = Config::default();
        assert!(cfg.set("google.nonexistent_key", "x").is_err());
        assert!(cfg.set("google", "x").is_err());
        assert!(cfg.set("", "x").is_err());
    }

    #[test]
    fn set_rejects_bad_offset() {
        let mut cfg = Config::default();
        assert!(cfg.set("planner.utc_offset", "EST").is_err());
        assert_eq!(cfg.planner.utc_offset, "+00:00");
        cfg.set("planner.utc_offset", "-04:00").unwrap();
        assert_eq!(cfg.planner.offset().unwrap().local_minus_utc(), -14400);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.google.calendar_id, "primary");
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "asana = 3").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
