// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Runtime configuration (`mesa-config.yaml`).
//!
//! Every field has a default so the core runs with no file present; the
//! outer layer decides where the file lives.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MesaConfig {
    pub storage: StorageSettings,
    pub email: EmailSettings,
    pub events: EventSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory the local storage adapter writes under.
    pub root: PathBuf,
    /// Base URL prefixed to stored file paths.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub enabled: bool,
    pub sender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Broadcast channel capacity for the event bus.
    pub capacity: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/uploads"),
            base_url: "http://localhost:8080/files".to_string(),
        }
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self { enabled: false, sender: "no-reply@mesa.mx".to_string() }
    }
}

impl Default for EventSettings {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

impl Default for MesaConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            email: EmailSettings::default(),
            events: EventSettings::default(),
        }
    }
}

impl MesaConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("failed to parse config file {path:?}"))
    }

    /// Load the file if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(?path, "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = MesaConfig::default();
        assert_eq!(config.storage.root, PathBuf::from("data/uploads"));
        assert!(!config.email.enabled);
        assert_eq!(config.events.capacity, 1000);
    }

    #[test]
    fn partial_yaml_fills_the_rest_with_defaults() {
        let config: MesaConfig = serde_yaml::from_str(
            r#"
storage:
  root: /var/lib/mesa/files
email:
  enabled: true
"#,
        )
        .unwrap();
        assert_eq!(config.storage.root, PathBuf::from("/var/lib/mesa/files"));
        assert_eq!(config.storage.base_url, "http://localhost:8080/files");
        assert!(config.email.enabled);
        assert_eq!(config.email.sender, "no-reply@mesa.mx");
    }

    #[test]
    fn load_or_default_without_file() {
        let config = MesaConfig::load_or_default("no-such-mesa-config.yaml").unwrap();
        assert_eq!(config.events.capacity, 1000);
    }
}
