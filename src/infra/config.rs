//! Defaults file store.
//!
//! Reads the optional YAML defaults at `~/.azprov/config.yaml` (override
//! the location with `AZPROV_CONFIG`). Absent file means built-in
//! defaults; a present but malformed file is an error the operator should
//! see, not silently ignore.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::FileDefaults;

/// YAML-backed defaults store.
pub struct YamlConfigStore;

impl YamlConfigStore {
    /// Load the defaults file, or built-in defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<FileDefaults> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(FileDefaults::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Location of the defaults file.
    ///
    /// # Errors
    ///
    /// Returns an error when the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("AZPROV_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".azprov").join("config.yaml"))
    }
}
