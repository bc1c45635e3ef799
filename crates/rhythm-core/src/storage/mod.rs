pub mod config;
pub mod rulesets;

pub use config::Config;
pub use rulesets::RulesetStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `RHYTHM_HOME` wins when set. Otherwise `~/.config/rhythm[-dev]/` based on
/// `RHYTHM_ENV` (set `RHYTHM_ENV=dev` for a development data directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("RHYTHM_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("RHYTHM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("rhythm-dev")
            } else {
                base_dir.join("rhythm")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
