use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatementError};
use crate::format::parse_bool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Raw `true`/`false`/`1`/`0` value, validated when a conversion runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_memo: Option<String>,
}

impl Settings {
    /// Clean mode from the command line, falling back to the saved setting.
    pub fn resolve_clean_memo(&self, flag: Option<&str>) -> Result<bool> {
        match flag.or(self.clean_memo.as_deref()) {
            Some(value) => parse_bool(value),
            None => Err(StatementError::Config(
                "clean-memo is not set; pass --clean-memo true|false or save it with `seb-statement config --clean-memo <value>`"
                    .to_string(),
            )),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("seb-statement")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// A missing file reads as default settings.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| StatementError::Settings(format!("{}: {e}", path.display())))
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| StatementError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
